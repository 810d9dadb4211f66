//! # Todo ハンドラ
//!
//! Todo リソースの CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /api/v1/todos` - Todo 一覧
//! - `POST /api/v1/todos` - Todo 作成
//! - `GET /api/v1/todos/{id}` - Todo 取得
//! - `PUT /api/v1/todos/{id}` - Todo 更新（名前のみ）
//! - `DELETE /api/v1/todos/{id}` - Todo 削除
//!
//! リクエストボディは `application/x-www-form-urlencoded` と
//! `application/json` のどちらでも受け付ける。

use std::sync::Arc;

use axum::{
   Form,
   Json,
   extract::{FromRequest, Path, Request, State, rejection::PathRejection},
   http::{StatusCode, header},
   response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use todos_domain::todo::{Todo, TodoId};
use todos_shared::ApiResponse;

use crate::{
   error::TodoServiceError,
   usecase::todo::{CreateTodoInput, TodoUseCaseImpl, UpdateTodoInput},
};

/// Todo コレクションのパス
pub const TODOS_PATH: &str = "/api/v1/todos";

/// Todo API の共有状態
pub struct TodoState {
   pub usecase: TodoUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// Todo 作成・更新リクエスト
#[derive(Debug, Deserialize)]
pub struct TodoRequest {
   pub name: Option<String>,
}

/// Content-Type に応じて JSON またはフォームとして読み取ったリクエスト
///
/// どちらの形式でも、読み取れない場合や `name` が無い場合は 400 を返す。
#[derive(Debug)]
pub struct TodoPayload {
   pub name: String,
}

/// メディアタイプ部分が `application/json` か（大文字小文字は区別しない）
fn is_json_media_type(content_type: &str) -> bool {
   let media_type = content_type.split(';').next().unwrap_or_default().trim();
   media_type.eq_ignore_ascii_case("application/json")
}

impl<S> FromRequest<S> for TodoPayload
where
   S: Send + Sync,
{
   type Rejection = TodoServiceError;

   async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
      let is_json = req
         .headers()
         .get(header::CONTENT_TYPE)
         .and_then(|value| value.to_str().ok())
         .is_some_and(is_json_media_type);

      let request = if is_json {
         let Json(request) = Json::<TodoRequest>::from_request(req, state)
            .await
            .map_err(|e| TodoServiceError::BadRequest(e.body_text()))?;
         request
      } else {
         let Form(request) = Form::<TodoRequest>::from_request(req, state)
            .await
            .map_err(|e| TodoServiceError::BadRequest(e.body_text()))?;
         request
      };

      let name = request
         .name
         .ok_or_else(|| TodoServiceError::Validation("name を指定してください".to_string()))?;
      Ok(Self { name })
   }
}

/// Todo DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TodoDto {
   pub id:         i64,
   pub name:       String,
   pub created_at: String,
}

impl From<&Todo> for TodoDto {
   fn from(todo: &Todo) -> Self {
      Self {
         id:         todo.id().as_i64(),
         name:       todo.name().as_str().to_string(),
         created_at: todo.created_at().to_rfc3339(),
      }
   }
}

/// パスパラメータの id を取り出す。整数でなければ 400
fn todo_id(path: Result<Path<i64>, PathRejection>) -> Result<TodoId, TodoServiceError> {
   let Path(id) = path.map_err(|e| TodoServiceError::BadRequest(e.body_text()))?;
   Ok(TodoId::new(id))
}

fn todo_location(id: &TodoId) -> String {
   format!("{TODOS_PATH}/{id}")
}

// --- ハンドラ ---

/// GET /api/v1/todos
///
/// Todo 一覧を id 順で取得する。
///
/// ## レスポンス
///
/// - `200 OK`: Todo 一覧
/// - `404 Not Found`: Todo が 1 件も無い
#[tracing::instrument(skip_all)]
pub async fn list_todos(
   State(state): State<Arc<TodoState>>,
) -> Result<impl IntoResponse, TodoServiceError> {
   let todos = state.usecase.list_todos().await?;

   let items: Vec<TodoDto> = todos.iter().map(TodoDto::from).collect();

   let response = ApiResponse::new(items);
   Ok((StatusCode::OK, Json(response)))
}

/// POST /api/v1/todos
///
/// Todo を作成する。
///
/// ## レスポンス
///
/// - `201 Created`: 作成された Todo（`Location` ヘッダ付き）
/// - `400 Bad Request`: `name` が無い・空・長すぎる
#[tracing::instrument(skip_all)]
pub async fn create_todo(
   State(state): State<Arc<TodoState>>,
   payload: TodoPayload,
) -> Result<impl IntoResponse, TodoServiceError> {
   let input = CreateTodoInput { name: payload.name };

   let todo = state.usecase.create_todo(input).await?;

   let response = ApiResponse::new(TodoDto::from(&todo));
   Ok((
      StatusCode::CREATED,
      [(header::LOCATION, todo_location(todo.id()))],
      Json(response),
   ))
}

/// GET /api/v1/todos/{id}
///
/// ## レスポンス
///
/// - `200 OK`: Todo
/// - `400 Bad Request`: id が整数でない
/// - `404 Not Found`: Todo が見つからない
#[tracing::instrument(skip_all)]
pub async fn get_todo(
   State(state): State<Arc<TodoState>>,
   path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, TodoServiceError> {
   let id = todo_id(path)?;

   let todo = state.usecase.get_todo(&id).await?;

   let response = ApiResponse::new(TodoDto::from(&todo));
   Ok((StatusCode::OK, Json(response)))
}

/// PUT /api/v1/todos/{id}
///
/// Todo の名前を更新する。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の Todo（`Location` ヘッダ付き）
/// - `400 Bad Request`: id が整数でない、`name` が不正
/// - `404 Not Found`: Todo が見つからない
#[tracing::instrument(skip_all)]
pub async fn update_todo(
   State(state): State<Arc<TodoState>>,
   path: Result<Path<i64>, PathRejection>,
   payload: TodoPayload,
) -> Result<impl IntoResponse, TodoServiceError> {
   let input = UpdateTodoInput {
      id:   todo_id(path)?,
      name: payload.name,
   };

   let todo = state.usecase.update_todo(input).await?;

   let response = ApiResponse::new(TodoDto::from(&todo));
   Ok((
      StatusCode::OK,
      [(header::LOCATION, todo_location(todo.id()))],
      Json(response),
   ))
}

/// DELETE /api/v1/todos/{id}
///
/// ## レスポンス
///
/// - `204 No Content`: 削除成功（`Location` はコレクション）
/// - `400 Bad Request`: id が整数でない
/// - `404 Not Found`: Todo が見つからない
#[tracing::instrument(skip_all)]
pub async fn delete_todo(
   State(state): State<Arc<TodoState>>,
   path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, TodoServiceError> {
   let id = todo_id(path)?;

   state.usecase.delete_todo(&id).await?;

   Ok((StatusCode::NO_CONTENT, [(header::LOCATION, TODOS_PATH)]))
}
