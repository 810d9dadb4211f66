//! # TodoRepository
//!
//! Todo の永続化を担当するリポジトリ。
//!
//! - `id` は DB が採番するため、挿入系メソッドは `RETURNING` で保存後の行を返す
//! - 一括挿入（[`TodoRepository::insert_many`]）は 1 トランザクション・1 文で実行する

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use todos_domain::todo::{NewTodo, Todo, TodoId, TodoName};

use crate::error::InfraError;

/// Todo リポジトリトレイト
#[async_trait]
pub trait TodoRepository: Send + Sync {
   /// 全 Todo を id 昇順で取得する
   async fn find_all(&self) -> Result<Vec<Todo>, InfraError>;

   /// ID で Todo を検索する
   async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError>;

   /// Todo を挿入し、採番済みの Todo を返す
   async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, InfraError>;

   /// 複数の Todo をトランザクション内で一括挿入し、挿入件数を返す
   async fn insert_many(&self, new_todos: &[NewTodo]) -> Result<u64, InfraError>;

   /// 名前を更新する。対象が存在しない場合は `None`
   async fn update_name(&self, id: &TodoId, name: &TodoName)
   -> Result<Option<Todo>, InfraError>;

   /// Todo を削除する。削除した行があれば `true`
   async fn delete(&self, id: &TodoId) -> Result<bool, InfraError>;

   /// 件数を取得する
   async fn count(&self) -> Result<i64, InfraError>;
}

/// `todo` テーブルの 1 行
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
   id:         i64,
   name:       String,
   created_at: DateTime<Utc>,
}

impl TodoRow {
   fn into_todo(self) -> Result<Todo, InfraError> {
      let name = TodoName::new(self.name).map_err(|e| InfraError::invalid_row(self.id, e))?;
      Ok(Todo::from_db(TodoId::new(self.id), name, self.created_at))
   }
}

/// SQLite 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct SqliteTodoRepository {
   pool: SqlitePool,
}

impl SqliteTodoRepository {
   pub fn new(pool: SqlitePool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
   #[tracing::instrument(skip_all, level = "debug")]
   async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
      let rows = sqlx::query_as::<_, TodoRow>(
         r#"
         SELECT id, name, created_at
         FROM todo
         ORDER BY id ASC
         "#,
      )
      .fetch_all(&self.pool)
      .await?;

      rows.into_iter().map(TodoRow::into_todo).collect()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
      let row = sqlx::query_as::<_, TodoRow>(
         r#"
         SELECT id, name, created_at
         FROM todo
         WHERE id = ?
         "#,
      )
      .bind(id.as_i64())
      .fetch_optional(&self.pool)
      .await?;

      row.map(TodoRow::into_todo).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug")]
   async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, InfraError> {
      let row = sqlx::query_as::<_, TodoRow>(
         r#"
         INSERT INTO todo (name, created_at)
         VALUES (?, ?)
         RETURNING id, name, created_at
         "#,
      )
      .bind(new_todo.name().as_str())
      .bind(new_todo.created_at())
      .fetch_one(&self.pool)
      .await?;

      row.into_todo()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(count = new_todos.len()))]
   async fn insert_many(&self, new_todos: &[NewTodo]) -> Result<u64, InfraError> {
      if new_todos.is_empty() {
         return Ok(0);
      }

      let mut tx = self.pool.begin().await?;

      let mut builder: QueryBuilder<Sqlite> =
         QueryBuilder::new("INSERT INTO todo (name, created_at) ");
      builder.push_values(new_todos, |mut row, todo| {
         row.push_bind(todo.name().as_str())
            .push_bind(todo.created_at());
      });
      let result = builder.build().execute(&mut *tx).await?;

      tx.commit().await?;

      Ok(result.rows_affected())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn update_name(
      &self,
      id: &TodoId,
      name: &TodoName,
   ) -> Result<Option<Todo>, InfraError> {
      let row = sqlx::query_as::<_, TodoRow>(
         r#"
         UPDATE todo
         SET name = ?
         WHERE id = ?
         RETURNING id, name, created_at
         "#,
      )
      .bind(name.as_str())
      .bind(id.as_i64())
      .fetch_optional(&self.pool)
      .await?;

      row.map(TodoRow::into_todo).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn delete(&self, id: &TodoId) -> Result<bool, InfraError> {
      let result = sqlx::query("DELETE FROM todo WHERE id = ?")
         .bind(id.as_i64())
         .execute(&self.pool)
         .await?;

      Ok(result.rows_affected() > 0)
   }

   #[tracing::instrument(skip_all, level = "debug")]
   async fn count(&self) -> Result<i64, InfraError> {
      let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM todo")
         .fetch_one(&self.pool)
         .await?;

      Ok(count)
   }
}
