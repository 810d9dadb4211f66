//! # Todo
//!
//! Todo API が扱う唯一のリソース。
//!
//! ## ライフサイクル
//!
//! - 作成: [`NewTodo`] を組み立て、DB が `id` を採番した時点で [`Todo`] になる
//! - 更新: 名前のみ変更可能（[`Todo::renamed`]）。`id` と `created_at` は不変
//! - 削除: リポジトリから物理削除する
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use todos_domain::todo::{NewTodo, Todo, TodoId, TodoName};
//!
//! let now = chrono::Utc::now();
//! let new_todo = NewTodo::new(TodoName::new("test1")?, now);
//!
//! // DB が採番した id で復元
//! let todo = Todo::from_db(TodoId::new(1), new_todo.name().clone(), now);
//! let renamed = todo.renamed(TodoName::new("test2")?);
//!
//! assert_eq!(renamed.id(), &TodoId::new(1));
//! assert_eq!(renamed.name().as_str(), "test2");
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Todo の一意識別子
///
/// DB の `INTEGER PRIMARY KEY AUTOINCREMENT` で採番されるため、
/// アプリケーション側では生成しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct TodoId(i64);

impl TodoId {
   pub fn new(value: i64) -> Self {
      Self(value)
   }

   pub fn as_i64(&self) -> i64 {
      self.0
   }
}

// =========================================================================
// TodoName（Todo 名）
// =========================================================================

/// Todo 名の最大文字数（DB: `VARCHAR(255)`）
pub const MAX_TODO_NAME_LENGTH: usize = 255;

/// Todo 名（値オブジェクト）
///
/// # 不変条件
///
/// - 前後の空白を除去済み
/// - 空文字列ではない
/// - 最大 255 文字
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoName(String);

impl TodoName {
   pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
      let value = value.into().trim().to_string();

      if value.is_empty() {
         return Err(DomainError::Validation(
            "name を入力してください".to_string(),
         ));
      }

      if value.chars().count() > MAX_TODO_NAME_LENGTH {
         return Err(DomainError::Validation(format!(
            "name は {MAX_TODO_NAME_LENGTH} 文字以内で入力してください"
         )));
      }

      Ok(Self(value))
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }
}

impl std::fmt::Display for TodoName {
   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      write!(f, "{}", self.0)
   }
}

// =========================================================================
// NewTodo / Todo
// =========================================================================

/// 未保存の Todo
///
/// `id` は INSERT 時に DB が採番する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
   name:       TodoName,
   created_at: DateTime<Utc>,
}

impl NewTodo {
   pub fn new(name: TodoName, now: DateTime<Utc>) -> Self {
      Self {
         name,
         created_at: now,
      }
   }

   pub fn name(&self) -> &TodoName {
      &self.name
   }

   pub fn created_at(&self) -> DateTime<Utc> {
      self.created_at
   }
}

/// Todo エンティティ
///
/// # 不変条件
///
/// - `id` は一意で、作成後に変わらない
/// - `created_at` は作成後に変わらない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
   id:         TodoId,
   name:       TodoName,
   created_at: DateTime<Utc>,
}

impl Todo {
   /// データベースから Todo を復元する
   pub fn from_db(id: TodoId, name: TodoName, created_at: DateTime<Utc>) -> Self {
      Self {
         id,
         name,
         created_at,
      }
   }

   /// 名前だけを差し替えた Todo を返す
   pub fn renamed(self, name: TodoName) -> Self {
      Self { name, ..self }
   }

   pub fn id(&self) -> &TodoId {
      &self.id
   }

   pub fn name(&self) -> &TodoName {
      &self.name
   }

   pub fn created_at(&self) -> DateTime<Utc> {
      self.created_at
   }
}
