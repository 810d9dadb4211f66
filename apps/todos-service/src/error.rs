//! # Todo Service エラー定義
//!
//! Todo Service 固有のエラーと、HTTP レスポンスへの変換を定義する。

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use thiserror::Error;
use todos_domain::DomainError;
use todos_shared::ErrorResponse;

/// Todo Service で発生するエラー
#[derive(Debug, Error)]
pub enum TodoServiceError {
   /// リソースが見つからない
   #[error("リソースが見つかりません: {0}")]
   NotFound(String),

   /// リクエストを読み取れない（id が整数でない、ボディが壊れている、Content-Type 不一致）
   #[error("不正なリクエスト: {0}")]
   BadRequest(String),

   /// `name` が無い・空・長すぎる
   #[error("バリデーションエラー: {0}")]
   Validation(String),

   /// データベースエラー
   #[error("データベースエラー: {0}")]
   Database(#[from] todos_infra::InfraError),
}

impl From<DomainError> for TodoServiceError {
   fn from(error: DomainError) -> Self {
      match error {
         DomainError::Validation(msg) => Self::Validation(msg),
         e @ DomainError::NotFound { .. } => Self::NotFound(e.to_string()),
      }
   }
}

impl IntoResponse for TodoServiceError {
   fn into_response(self) -> Response {
      let body = match self {
         TodoServiceError::NotFound(msg) => ErrorResponse::not_found(msg),
         TodoServiceError::BadRequest(msg) => ErrorResponse::bad_request(msg),
         TodoServiceError::Validation(msg) => ErrorResponse::validation_error(msg),
         TodoServiceError::Database(e) => {
            // 内部エラー詳細はログのみ
            tracing::error!(
               error = %e,
               span_trace = %e.span_trace(),
               "データベースエラー"
            );
            ErrorResponse::internal_error()
         }
      };

      let status = StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
      (status, Json(body)).into_response()
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   #[rstest]
   #[case(TodoServiceError::NotFound("Todo".to_string()), StatusCode::NOT_FOUND)]
   #[case(TodoServiceError::BadRequest("name".to_string()), StatusCode::BAD_REQUEST)]
   #[case(TodoServiceError::Validation("name".to_string()), StatusCode::BAD_REQUEST)]
   #[case(
      TodoServiceError::Database(todos_infra::InfraError::from(sqlx::Error::PoolClosed)),
      StatusCode::INTERNAL_SERVER_ERROR
   )]
   fn test_エラー種別ごとのステータスコード(
      #[case] error: TodoServiceError,
      #[case] expected: StatusCode,
   ) {
      assert_eq!(error.into_response().status(), expected);
   }

   #[test]
   fn test_domain_errorのバリデーションはvalidationになる() {
      let error: TodoServiceError = DomainError::Validation("name を入力してください".into()).into();

      assert!(matches!(error, TodoServiceError::Validation(msg) if msg == "name を入力してください"));
   }

   #[test]
   fn test_domain_errorのnot_foundはnot_foundになる() {
      let error: TodoServiceError = DomainError::NotFound {
         entity_type: "Todo",
         id:          "200".to_string(),
      }
      .into();

      assert!(matches!(error, TodoServiceError::NotFound(msg) if msg == "Todo が見つかりません: 200"));
   }

   #[rstest]
   #[case::読み取れないリクエスト(TodoServiceError::BadRequest("id".to_string()), "bad-request")]
   #[case::名前の検証失敗(TodoServiceError::Validation("name".to_string()), "validation-error")]
   #[tokio::test]
   async fn test_400の問題種別は原因で分かれる(
      #[case] error: TodoServiceError,
      #[case] expected_suffix: &str,
   ) {
      let bytes = axum::body::to_bytes(error.into_response().into_body(), usize::MAX)
         .await
         .unwrap();
      let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();

      assert_eq!(
         body.error_type,
         format!("https://todos.example.com/errors/{expected_suffix}")
      );
      assert_eq!(body.status, 400);
   }
}
