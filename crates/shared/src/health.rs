//! # ヘルスチェック型
//!
//! - `GET /health`: [`HealthResponse`]。プロセスが応答できれば常に `healthy`
//! - `GET /health/ready`: [`ReadinessResponse`]。依存先ごとの結果と全体の判定

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Liveness レスポンス
///
/// ```
/// use todos_shared::HealthResponse;
///
/// let response = HealthResponse::healthy("0.1.0");
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
   pub status:  String,
   /// Cargo.toml のバージョン
   pub version: String,
}

impl HealthResponse {
   pub fn healthy(version: impl Into<String>) -> Self {
      Self {
         status:  "healthy".to_string(),
         version: version.into(),
      }
   }
}

/// 依存先 1 つ分のチェック結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
   Ok,
   Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
   Ready,
   NotReady,
}

/// Readiness レスポンス
///
/// `checks` のキーは依存先の名前（Todo Service では `"database"` のみ）。
/// 全体の `status` は [`ReadinessResponse::from_checks`] が決める。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessResponse {
   pub status: ReadinessStatus,
   pub checks: BTreeMap<String, CheckStatus>,
}

impl ReadinessResponse {
   /// チェック結果から全体の判定を組み立てる
   ///
   /// 1 つでも [`CheckStatus::Error`] があれば [`ReadinessStatus::NotReady`]。
   pub fn from_checks<K: Into<String>>(checks: impl IntoIterator<Item = (K, CheckStatus)>) -> Self {
      let checks: BTreeMap<String, CheckStatus> =
         checks.into_iter().map(|(name, status)| (name.into(), status)).collect();

      let status = if checks.values().all(|s| *s == CheckStatus::Ok) {
         ReadinessStatus::Ready
      } else {
         ReadinessStatus::NotReady
      };

      Self { status, checks }
   }

   pub fn is_ready(&self) -> bool {
      self.status == ReadinessStatus::Ready
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_healthyはバージョン付きのjsonになる() {
      let json = serde_json::to_value(HealthResponse::healthy("1.2.3")).unwrap();

      assert_eq!(json, serde_json::json!({ "status": "healthy", "version": "1.2.3" }));
   }

   #[test]
   fn test_全チェックokならready() {
      let response = ReadinessResponse::from_checks([("database", CheckStatus::Ok)]);

      assert!(response.is_ready());
      assert_eq!(
         serde_json::to_value(&response).unwrap(),
         serde_json::json!({ "status": "ready", "checks": { "database": "ok" } })
      );
   }

   #[test]
   fn test_1つでもerrorならnot_ready() {
      let response = ReadinessResponse::from_checks([
         ("database", CheckStatus::Error),
         ("disk", CheckStatus::Ok),
      ]);

      assert!(!response.is_ready());
      assert_eq!(
         serde_json::to_value(&response).unwrap()["status"],
         "not_ready"
      );
   }

   #[test]
   fn test_readiness_responseはjsonから読み戻せる() {
      let json = r#"{"status":"not_ready","checks":{"database":"error"}}"#;

      let response: ReadinessResponse = serde_json::from_str(json).unwrap();

      assert_eq!(
         response,
         ReadinessResponse::from_checks([("database", CheckStatus::Error)])
      );
   }
}
