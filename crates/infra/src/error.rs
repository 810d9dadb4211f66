//! # インフラ層エラー
//!
//! [`InfraError`] は種別（[`InfraErrorKind`]）と、生成時点の [`SpanTrace`] を持つ。
//! `ErrorLayer` 付き subscriber の下では、どのリポジトリ操作の中で
//! 失敗したかをサービス層のログから辿れる。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// 種別で分岐する場合は [`kind()`](InfraError::kind) を使う。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
   kind:       InfraErrorKind,
   span_trace: SpanTrace,
}

#[derive(Debug, Error)]
pub enum InfraErrorKind {
   /// sqlx が返したエラー（接続失敗、SQL 実行失敗、プールのクローズなど）
   #[error("データベースエラー: {0}")]
   Database(#[source] sqlx::Error),

   /// `todo` テーブルの行がドメインの不変条件を満たさない
   #[error("不正な行です (id={id}): {reason}")]
   InvalidRow { id: i64, reason: String },
}

impl InfraError {
   fn new(kind: InfraErrorKind) -> Self {
      Self {
         kind,
         span_trace: SpanTrace::capture(),
      }
   }

   pub fn kind(&self) -> &InfraErrorKind {
      &self.kind
   }

   pub fn span_trace(&self) -> &SpanTrace {
      &self.span_trace
   }

   pub fn invalid_row(id: i64, reason: impl fmt::Display) -> Self {
      Self::new(InfraErrorKind::InvalidRow {
         id,
         reason: reason.to_string(),
      })
   }
}

impl fmt::Debug for InfraError {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("InfraError")
         .field("kind", &self.kind)
         .field("span_trace", &self.span_trace)
         .finish()
   }
}

impl std::error::Error for InfraError {
   fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
      std::error::Error::source(&self.kind)
   }
}

impl From<sqlx::Error> for InfraError {
   fn from(source: sqlx::Error) -> Self {
      Self::new(InfraErrorKind::Database(source))
   }
}
