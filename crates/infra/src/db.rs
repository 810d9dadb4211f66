//! # SQLite データベース接続管理
//!
//! 接続プールの作成と、`todo` テーブルのスキーマ初期化を行う。
//!
//! ## スキーマ初期化
//!
//! テーブルは `CREATE TABLE IF NOT EXISTS` で作成するため、
//! [`initialize`] / [`ensure_schema`] は何度呼び出しても安全。
//!
//! ## インメモリ DB
//!
//! `sqlite::memory:` は接続ごとに別の DB になる。[`create_pool`] は
//! インメモリ URL を検出すると、プールを寿命無制限の 1 接続に固定する。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todos_infra::db;
//!
//! async fn example() -> Result<(), todos_infra::InfraError> {
//!     let pool = db::create_pool("sqlite::memory:", 5).await?;
//!     db::ensure_schema(&pool).await?;
//!
//!     let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todo")
//!         .fetch_one(&pool)
//!         .await?;
//!     Ok(())
//! }
//! ```

use std::{str::FromStr, time::Duration};

use sqlx::{
   Connection,
   Executor,
   Sqlite,
   SqliteConnection,
   SqlitePool,
   sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::error::InfraError;

/// `todo` テーブル定義
///
/// `AUTOINCREMENT` により、削除済みの id は再利用されない。
const CREATE_TODO_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todo (
   id         INTEGER PRIMARY KEY AUTOINCREMENT,
   name       VARCHAR(255) NOT NULL,
   created_at TEXT NOT NULL
)
"#;

const DROP_TODO_TABLE: &str = "DROP TABLE IF EXISTS todo";

/// URL がインメモリ DB を指しているか判定する
pub fn is_in_memory(database_url: &str) -> bool {
   database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn connect_options(database_url: &str) -> Result<SqliteConnectOptions, InfraError> {
   Ok(SqliteConnectOptions::from_str(database_url)?.create_if_missing(true))
}

/// 接続を開いてテーブルを作成し、接続を閉じる
///
/// プロセス起動時に呼び出す。テーブルが既に存在する場合は何もしない。
#[tracing::instrument(skip_all, level = "debug")]
pub async fn initialize(database_url: &str) -> Result<(), InfraError> {
   let mut conn = SqliteConnection::connect_with(&connect_options(database_url)?).await?;
   ensure_schema(&mut conn).await?;
   conn.close().await?;
   Ok(())
}

/// 既存の接続（またはプール）上でテーブルを作成する
pub async fn ensure_schema<'e, E>(executor: E) -> Result<(), InfraError>
where
   E: Executor<'e, Database = Sqlite>,
{
   executor.execute(CREATE_TODO_TABLE).await?;
   Ok(())
}

/// テーブルを削除する（テストのティアダウン用）
pub async fn drop_tables<'e, E>(executor: E) -> Result<(), InfraError>
where
   E: Executor<'e, Database = Sqlite>,
{
   executor.execute(DROP_TODO_TABLE).await?;
   Ok(())
}

/// SQLite 接続プールを作成する
///
/// # 引数
///
/// * `database_url` - `sqlite://todos.sqlite?mode=rwc` や `sqlite::memory:` など
/// * `max_connections` - 最大接続数。インメモリ DB では無視され 1 になる
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, InfraError> {
   let pool_options = if is_in_memory(database_url) {
      SqlitePoolOptions::new()
         .max_connections(1)
         .min_connections(1)
         .idle_timeout(None)
         .max_lifetime(None)
   } else {
      SqlitePoolOptions::new().max_connections(max_connections)
   };

   let pool = pool_options
      .acquire_timeout(Duration::from_secs(5))
      .connect_with(connect_options(database_url)?)
      .await?;
   Ok(pool)
}

/// DB への疎通を確認する（Readiness Check 用）
pub async fn ping(pool: &SqlitePool) -> Result<(), InfraError> {
   pool.execute("SELECT 1").await?;
   Ok(())
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   async fn table_exists(pool: &SqlitePool) -> bool {
      let count: i64 = sqlx::query_scalar(
         "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'todo'",
      )
      .fetch_one(pool)
      .await
      .unwrap();
      count == 1
   }

   #[test]
   fn test_is_in_memoryの判定() {
      assert!(is_in_memory("sqlite::memory:"));
      assert!(is_in_memory("sqlite://file:todos?mode=memory&cache=shared"));
      assert!(!is_in_memory("sqlite://todos.sqlite?mode=rwc"));
   }

   #[tokio::test]
   async fn test_インメモリプールは同じdbを共有する() {
      let pool = create_pool("sqlite::memory:", 5).await.unwrap();

      ensure_schema(&pool).await.unwrap();

      // 別のクエリからもテーブルが見えること
      assert!(table_exists(&pool).await);
      assert_eq!(pool.options().get_max_connections(), 1);
   }

   #[tokio::test]
   async fn test_ensure_schemaは冪等である() {
      let pool = create_pool("sqlite::memory:", 1).await.unwrap();

      ensure_schema(&pool).await.unwrap();
      ensure_schema(&pool).await.unwrap();

      assert!(table_exists(&pool).await);
   }

   #[tokio::test]
   async fn test_drop_tablesでテーブルが削除される() {
      let pool = create_pool("sqlite::memory:", 1).await.unwrap();
      ensure_schema(&pool).await.unwrap();

      drop_tables(&pool).await.unwrap();

      assert!(!table_exists(&pool).await);
      // 存在しない状態で再度呼んでもエラーにならない
      drop_tables(&pool).await.unwrap();
   }

   #[tokio::test]
   async fn test_pingが成功する() {
      let pool = create_pool("sqlite::memory:", 1).await.unwrap();
      assert!(ping(&pool).await.is_ok());
   }
}
