//! # Todo API の問題詳細（RFC 9457）
//!
//! 4xx / 5xx のボディはすべて [`ErrorResponse`] になる。`type` は
//! [`ProblemKind`] ごとに固定の URI で、クライアントはこれで原因を分岐できる。
//!
//! | 種別 | status | 発生箇所 |
//! |------|--------|---------|
//! | `bad-request` | 400 | id が整数でない、ボディを読めない |
//! | `validation-error` | 400 | `name` が無い・空・255 文字超 |
//! | `not-found` | 404 | id の Todo が無い、一覧が空 |
//! | `internal-error` | 500 | DB 障害 |
//!
//! axum への変換は todos-service 側で行う。

use serde::{Deserialize, Serialize};

const PROBLEM_TYPE_BASE: &str = "https://todos.example.com/errors";

/// Todo API が返す問題の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
   BadRequest,
   Validation,
   NotFound,
   Internal,
}

impl ProblemKind {
   fn slug(self) -> &'static str {
      match self {
         Self::BadRequest => "bad-request",
         Self::Validation => "validation-error",
         Self::NotFound => "not-found",
         Self::Internal => "internal-error",
      }
   }

   fn title(self) -> &'static str {
      match self {
         Self::BadRequest => "Bad Request",
         Self::Validation => "Validation Error",
         Self::NotFound => "Not Found",
         Self::Internal => "Internal Server Error",
      }
   }

   pub fn status(self) -> u16 {
      match self {
         Self::BadRequest | Self::Validation => 400,
         Self::NotFound => 404,
         Self::Internal => 500,
      }
   }

   /// `type` フィールドに入る URI
   pub fn type_uri(self) -> String {
      format!("{PROBLEM_TYPE_BASE}/{}", self.slug())
   }
}

/// エラーレスポンスのボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   #[serde(rename = "type")]
   pub error_type: String,
   pub title:      String,
   pub status:     u16,
   pub detail:     String,
}

impl ErrorResponse {
   pub fn new(kind: ProblemKind, detail: impl Into<String>) -> Self {
      Self {
         error_type: kind.type_uri(),
         title:      kind.title().to_string(),
         status:     kind.status(),
         detail:     detail.into(),
      }
   }

   /// リクエストを読み取れなかった（`TodoServiceError::BadRequest`）
   pub fn bad_request(detail: impl Into<String>) -> Self {
      Self::new(ProblemKind::BadRequest, detail)
   }

   /// `name` の検証に失敗した（`TodoServiceError::Validation`）
   pub fn validation_error(detail: impl Into<String>) -> Self {
      Self::new(ProblemKind::Validation, detail)
   }

   pub fn not_found(detail: impl Into<String>) -> Self {
      Self::new(ProblemKind::NotFound, detail)
   }

   /// DB 障害など。原因はログにだけ残し、detail は固定文言にする
   pub fn internal_error() -> Self {
      Self::new(ProblemKind::Internal, "内部エラーが発生しました")
   }
}
