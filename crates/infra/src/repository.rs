//! # リポジトリ実装
//!
//! - **データベース抽象化**: sqlx を使用し、SQLite 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod todo_repository;

pub use todo_repository::{SqliteTodoRepository, TodoRepository};
