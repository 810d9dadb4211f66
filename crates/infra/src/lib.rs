//! # Todos インフラ層
//!
//! 外部システム（SQLite）との接続を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: SQLite への接続プール管理とスキーマ作成
//! - **リポジトリ実装**: Todo の永続化
//!
//! ## 依存関係
//!
//! ```text
//! service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - SQLite 接続管理とスキーマ初期化
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todos_infra::{db, repository::{SqliteTodoRepository, TodoRepository}};
//!
//! async fn setup() -> Result<(), todos_infra::InfraError> {
//!     db::initialize("sqlite://todos.sqlite?mode=rwc").await?;
//!
//!     let pool = db::create_pool("sqlite://todos.sqlite?mode=rwc", 5).await?;
//!     let repo = SqliteTodoRepository::new(pool);
//!     let todos = repo.find_all().await?;
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
