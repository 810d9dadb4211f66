//! # Todo Service サーバー
//!
//! Todo リソースの CRUD API を提供する HTTP サーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `TODO_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `TODO_PORT` | No | ポート番号（デフォルト: `8000`） |
//! | `DATABASE_URL` | No | SQLite 接続 URL（デフォルト: `sqlite://todos.sqlite?mode=rwc`） |
//! | `DATABASE_MAX_CONNECTIONS` | No | 接続プールの最大接続数（デフォルト: `5`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p todos-service
//!
//! # インメモリ DB で起動
//! DATABASE_URL=sqlite::memory: cargo run -p todos-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use todos_domain::clock::SystemClock;
use todos_infra::db;
use todos_service::{app::build_router, config::TodoConfig};
use todos_shared::observability::TracingConfig;
use tokio::net::TcpListener;

/// Todo Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   let tracing_config = TracingConfig::from_env("todos-service");
   let service_name = tracing_config.service_name.clone();
   todos_shared::observability::init_tracing(tracing_config)
      .context("トレーシングの初期化に失敗しました")?;
   let _tracing_guard = tracing::info_span!("app", service = %service_name).entered();

   // 設定読み込み
   let config = TodoConfig::from_env().context("設定の読み込みに失敗しました")?;

   tracing::info!(
      "Todo Service サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   // スキーマ初期化（インメモリ DB はプールの接続上で行う）
   if !db::is_in_memory(&config.database_url) {
      db::initialize(&config.database_url)
         .await
         .context("データベースの初期化に失敗しました")?;
   }

   let pool = db::create_pool(&config.database_url, config.database_max_connections)
      .await
      .context("データベース接続に失敗しました")?;
   if db::is_in_memory(&config.database_url) {
      db::ensure_schema(&pool)
         .await
         .context("スキーマの作成に失敗しました")?;
   }
   tracing::info!("データベースに接続しました");

   let app = build_router(pool, Arc::new(SystemClock));

   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .context("アドレスのパースに失敗しました")?;

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("Todo Service サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await?;

   Ok(())
}
