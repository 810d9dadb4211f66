//! # ルーター構築
//!
//! `main.rs` と統合テストが同じルーターを使えるよう、組み立てをここに集約する。

use std::sync::Arc;

use axum::{Router, routing::get};
use sqlx::SqlitePool;
use todos_domain::clock::Clock;
use todos_infra::repository::{SqliteTodoRepository, TodoRepository};
use todos_shared::{canonical_log::CanonicalLogLineLayer, observability::make_request_span};
use tower_http::{
   request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
   trace::TraceLayer,
};

use crate::{
   handler::{
      ReadinessState,
      TodoState,
      create_todo,
      delete_todo,
      get_todo,
      health_check,
      list_todos,
      readiness_check,
      update_todo,
   },
   usecase::TodoUseCaseImpl,
};

/// Todo リソースのルート
pub fn todo_routes(state: Arc<TodoState>) -> Router {
   Router::new()
      .route("/api/v1/todos", get(list_todos).post(create_todo))
      .route(
         "/api/v1/todos/{id}",
         get(get_todo).put(update_todo).delete(delete_todo),
      )
      .with_state(state)
}

/// アプリケーション全体のルーターを構築する
pub fn build_router(pool: SqlitePool, clock: Arc<dyn Clock>) -> Router {
   // Readiness Check 用 State（pool が move される前に clone）
   let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

   let todo_repository: Arc<dyn TodoRepository> = Arc::new(SqliteTodoRepository::new(pool));
   let todo_state = Arc::new(TodoState {
      usecase: TodoUseCaseImpl::new(todo_repository, clock),
   });

   Router::new()
      .route("/health", get(health_check))
      .merge(
         Router::new()
            .route("/health/ready", get(readiness_check))
            .with_state(readiness_state),
      )
      .merge(todo_routes(todo_state))
      // 下に書いたものが外側
      // 1. SetRequestIdLayer（最外）: UUID を生成（またはクライアント提供値を使用）
      // 2. TraceLayer: スパンに request_id を含める
      // 3. CanonicalLogLineLayer: リクエスト完了時に 1 行サマリログを出力（スパン内）
      // 4. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
      .layer(PropagateRequestIdLayer::x_request_id())
      .layer(CanonicalLogLineLayer)
      .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
      .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
