//! テスト共通フィクスチャ
//!
//! インメモリ SQLite を使う統合テストの共通セットアップ。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use todos_domain::todo::{NewTodo, TodoName};
use todos_infra::{
   db,
   repository::{SqliteTodoRepository, TodoRepository},
};

/// シードデータの Todo 名
pub const SEED_NAMES: [&str; 3] = ["test1", "test2", "test3"];

/// テスト用の固定日時
pub fn test_now() -> DateTime<Utc> {
   DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

pub fn new_todo(name: &str) -> NewTodo {
   NewTodo::new(TodoName::new(name).unwrap(), test_now())
}

/// テーブル作成済みの空のインメモリ DB を用意する
pub async fn setup_empty() -> SqlitePool {
   let pool = db::create_pool("sqlite::memory:", 1).await.unwrap();
   db::ensure_schema(&pool).await.unwrap();
   pool
}

/// シードデータ 3 件を一括挿入したインメモリ DB を用意する
pub async fn setup_seeded() -> SqlitePool {
   let pool = setup_empty().await;
   let seeds: Vec<NewTodo> = SEED_NAMES.iter().map(|name| new_todo(name)).collect();
   SqliteTodoRepository::new(pool.clone())
      .insert_many(&seeds)
      .await
      .unwrap();
   pool
}

/// テーブルを削除する
pub async fn teardown(pool: SqlitePool) {
   db::drop_tables(&pool).await.unwrap();
   pool.close().await;
}
