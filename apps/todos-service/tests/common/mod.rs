//! テスト共通フィクスチャ
//!
//! インメモリ SQLite に `test1` / `test2` / `test3` を投入し、
//! 実リポジトリを使ったルーターを組み立てる。

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
   Router,
   body::Body,
   http::{Method, Request, StatusCode, header},
   response::Response,
};
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::SqlitePool;
use todos_domain::{
   clock::ManualClock,
   todo::{NewTodo, TodoName},
};
use todos_infra::{
   db,
   repository::{SqliteTodoRepository, TodoRepository},
};
use todos_service::app::build_router;
use tower::ServiceExt;

pub const SEED_NAMES: [&str; 3] = ["test1", "test2", "test3"];

pub fn fixed_now() -> DateTime<Utc> {
   DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// テスト用のアプリケーションと、検証用に同じ DB を指すプール
pub struct TestApp {
   pub router: Router,
   pub pool:   SqlitePool,
}

impl TestApp {
   /// シードデータ 3 件入りのアプリケーション
   pub async fn seeded() -> Self {
      let app = Self::empty().await;
      let seeds: Vec<NewTodo> = SEED_NAMES
         .iter()
         .map(|name| NewTodo::new(TodoName::new(*name).unwrap(), fixed_now()))
         .collect();
      SqliteTodoRepository::new(app.pool.clone())
         .insert_many(&seeds)
         .await
         .unwrap();
      app
   }

   /// テーブルのみ作成した空のアプリケーション
   pub async fn empty() -> Self {
      let pool = db::create_pool("sqlite::memory:", 1).await.unwrap();
      db::ensure_schema(&pool).await.unwrap();
      let router = build_router(pool.clone(), Arc::new(ManualClock::new(fixed_now())));
      Self { router, pool }
   }

   pub async fn send(&self, request: Request<Body>) -> Response {
      self.router.clone().oneshot(request).await.unwrap()
   }

   pub async fn get(&self, uri: &str) -> Response {
      self.send(
         Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
      )
      .await
   }

   pub async fn send_form(&self, method: Method, uri: &str, body: &str) -> Response {
      self.send(
         Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
      )
      .await
   }

   pub async fn delete(&self, uri: &str) -> Response {
      self.send(
         Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
      )
      .await
   }

   /// `todo` テーブルの件数
   pub async fn count(&self) -> i64 {
      SqliteTodoRepository::new(self.pool.clone())
         .count()
         .await
         .unwrap()
   }

   /// テーブルを削除してプールを閉じる
   pub async fn teardown(self) {
      db::drop_tables(&self.pool).await.unwrap();
      self.pool.close().await;
   }
}

pub async fn body_json(response: Response) -> JsonValue {
   let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
   serde_json::from_slice(&bytes).unwrap()
}

pub fn assert_status(response: &Response, expected: StatusCode) {
   assert_eq!(response.status(), expected, "unexpected status: {response:?}");
}
