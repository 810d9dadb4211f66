//! # ヘルスチェックハンドラ
//!
//! - `/health`: Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready`: Readiness Check（DB の接続状態を確認）
//!
//! レスポンス型は [`todos_shared::HealthResponse`] / [`todos_shared::ReadinessResponse`] を参照。

use std::{sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sqlx::SqlitePool;
use todos_infra::db;
use todos_shared::{CheckStatus, HealthResponse, ReadinessResponse};

/// DB チェックのタイムアウト
const DATABASE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Todo Service のヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
   Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Readiness Check 用の State
pub struct ReadinessState {
   pub pool: SqlitePool,
}

/// Todo Service の Readiness Check エンドポイント
///
/// DB チェック OK → 200、失敗 → 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
   let response = ReadinessResponse::from_checks([("database", check_database(&state.pool).await)]);

   let http_status = if response.is_ready() {
      StatusCode::OK
   } else {
      StatusCode::SERVICE_UNAVAILABLE
   };

   (http_status, Json(response))
}

/// `SELECT 1` で DB への疎通を確認する（タイムアウト: 5 秒）
async fn check_database(pool: &SqlitePool) -> CheckStatus {
   match tokio::time::timeout(DATABASE_CHECK_TIMEOUT, db::ping(pool)).await {
      Ok(Ok(())) => CheckStatus::Ok,
      Ok(Err(e)) => {
         tracing::warn!(error = %e, "readiness check: database ping failed");
         CheckStatus::Error
      }
      Err(_) => {
         tracing::warn!("readiness check: database check timed out");
         CheckStatus::Error
      }
   }
}
