//! # Observability 基盤
//!
//! トレーシングの初期化と、HTTP リクエストスパンの作成を提供する。
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|-----------|------|
//! | `LOG_FORMAT` | `pretty` | `json` または `pretty` |
//! | `RUST_LOG` | `info,todos=debug` | `EnvFilter` のディレクティブ |

use std::str::FromStr;

use thiserror::Error;

/// リクエスト ID を運ぶ HTTP ヘッダ名
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,todos=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
   /// 1 イベント 1 行の JSON（本番環境向け）
   Json,
   /// 人間が読みやすい形式（開発環境向け）
   #[default]
   Pretty,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("LOG_FORMAT は json または pretty を指定してください: {0:?}")]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
   type Err = UnknownLogFormat;

   fn from_str(s: &str) -> Result<Self, Self::Err> {
      match s {
         "json" => Ok(Self::Json),
         "pretty" => Ok(Self::Pretty),
         other => Err(UnknownLogFormat(other.to_string())),
      }
   }
}

/// トレーシング初期化設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
   /// サービス名（`app` スパンの `service` フィールドに使う）
   pub service_name: String,
   pub log_format:   LogFormat,
   /// `EnvFilter` のディレクティブ
   pub filter:       String,
}

impl TracingConfig {
   pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
      Self {
         service_name: service_name.into(),
         log_format,
         filter: DEFAULT_LOG_FILTER.to_string(),
      }
   }

   pub fn from_env(service_name: impl Into<String>) -> Self {
      Self::from_lookup(service_name, |name| std::env::var(name).ok())
   }

   /// 任意の変数ソースから読み取る
   ///
   /// 不正な `LOG_FORMAT` は起動を止めず [`LogFormat::Pretty`] にフォールバックする。
   /// subscriber 初期化前なので警告は stderr に直接出す。
   pub fn from_lookup(
      service_name: impl Into<String>,
      lookup: impl Fn(&str) -> Option<String>,
   ) -> Self {
      let log_format = match lookup("LOG_FORMAT").map(|v| v.parse::<LogFormat>()) {
         None => LogFormat::default(),
         Some(Ok(format)) => format,
         Some(Err(e)) => {
            eprintln!("WARNING: {e}, falling back to pretty");
            LogFormat::Pretty
         }
      };

      let mut config = Self::new(service_name, log_format);
      if let Some(filter) = lookup("RUST_LOG").filter(|f| !f.trim().is_empty()) {
         config.filter = filter;
      }
      config
   }
}

/// グローバル subscriber を登録する
///
/// - `EnvFilter`: [`TracingConfig::filter`]。パースできなければ [`DEFAULT_LOG_FILTER`]
/// - fmt: `LOG_FORMAT` に応じて JSON / Pretty
/// - `ErrorLayer`: `InfraError` が `SpanTrace` を記録できるようにする
///
/// 2 回目以降の呼び出しはエラーになる。
#[cfg(feature = "observability")]
pub fn init_tracing(
   config: TracingConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
   use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

   let env_filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|e| {
      eprintln!("WARNING: invalid RUST_LOG={:?} ({e}), using {DEFAULT_LOG_FILTER}", config.filter);
      EnvFilter::new(DEFAULT_LOG_FILTER)
   });

   let fmt_layer = match config.log_format {
      LogFormat::Json => tracing_subscriber::fmt::layer()
         .json()
         .flatten_event(true)
         .with_current_span(true)
         .with_span_list(false)
         .boxed(),
      LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
   };

   tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt_layer)
      .with(tracing_error::ErrorLayer::default())
      .try_init()
}

/// HTTP リクエスト用のスパンを作成する
///
/// `TraceLayer::make_span_with` に渡す。`SetRequestIdLayer` の内側に置くことで
/// 採番済みの `x-request-id` が `request_id` フィールドに入る。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
   let request_id = request
      .headers()
      .get(REQUEST_ID_HEADER)
      .and_then(|v| v.to_str().ok())
      .unwrap_or("-");

   tracing::info_span!(
      "request",
      method = %request.method(),
      uri = %request.uri(),
      request_id = %request_id,
   )
}
