//! ヘルスチェックとリクエスト ID の統合テスト

mod common;

use axum::{
   body::Body,
   http::{Method, Request, StatusCode},
};
use common::{TestApp, assert_status, body_json};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_healthはバージョンを返す() {
   let app = TestApp::empty().await;

   let response = app.get("/health").await;

   assert_status(&response, StatusCode::OK);
   assert_eq!(
      body_json(response).await,
      json!({ "status": "healthy", "version": env!("CARGO_PKG_VERSION") })
   );
}

#[tokio::test]
async fn test_health_readyはdb接続可能ならready() {
   let app = TestApp::empty().await;

   let response = app.get("/health/ready").await;

   assert_status(&response, StatusCode::OK);
   assert_eq!(body_json(response).await["status"], "ready");
   app.teardown().await;
}

#[tokio::test]
async fn test_レスポンスにリクエストidが付与される() {
   let app = TestApp::empty().await;

   let response = app.get("/health").await;

   let request_id = response.headers()["x-request-id"].to_str().unwrap();
   assert_eq!(request_id.len(), 36);
}

#[tokio::test]
async fn test_クライアント提供のリクエストidがそのまま返る() {
   let app = TestApp::seeded().await;
   let request = Request::builder()
      .method(Method::GET)
      .uri("/api/v1/todos")
      .header("x-request-id", "test-request-1")
      .body(Body::empty())
      .unwrap();

   let response = app.send(request).await;

   assert_status(&response, StatusCode::OK);
   assert_eq!(response.headers()["x-request-id"], "test-request-1");
   app.teardown().await;
}
