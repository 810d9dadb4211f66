//! Todo 管理ユースケース

use std::sync::Arc;

use todos_domain::{
   DomainError,
   clock::Clock,
   todo::{NewTodo, Todo, TodoId, TodoName},
};
use todos_infra::repository::TodoRepository;

use crate::error::TodoServiceError;

/// Todo 作成の入力
pub struct CreateTodoInput {
   pub name: String,
}

/// Todo 更新の入力（名前のみ変更可能）
pub struct UpdateTodoInput {
   pub id:   TodoId,
   pub name: String,
}

fn todo_not_found(id: &TodoId) -> TodoServiceError {
   DomainError::NotFound {
      entity_type: "Todo",
      id:          id.to_string(),
   }
   .into()
}

/// Todo 管理ユースケース
pub struct TodoUseCaseImpl {
   todo_repository: Arc<dyn TodoRepository>,
   clock:           Arc<dyn Clock>,
}

impl TodoUseCaseImpl {
   pub fn new(todo_repository: Arc<dyn TodoRepository>, clock: Arc<dyn Clock>) -> Self {
      Self {
         todo_repository,
         clock,
      }
   }

   /// Todo 一覧を取得する（id 順）
   ///
   /// 1 件も登録されていない場合は NotFound を返す。
   pub async fn list_todos(&self) -> Result<Vec<Todo>, TodoServiceError> {
      let todos = self.todo_repository.find_all().await?;
      if todos.is_empty() {
         return Err(TodoServiceError::NotFound(
            "Todo が 1 件も登録されていません".to_string(),
         ));
      }
      Ok(todos)
   }

   /// Todo を作成する
   pub async fn create_todo(&self, input: CreateTodoInput) -> Result<Todo, TodoServiceError> {
      let name = TodoName::new(input.name)?;
      let new_todo = NewTodo::new(name, self.clock.now());

      let todo = self.todo_repository.insert(&new_todo).await?;
      tracing::info!(todo_id = %todo.id(), "Todo を作成しました");

      Ok(todo)
   }

   pub async fn get_todo(&self, id: &TodoId) -> Result<Todo, TodoServiceError> {
      self.todo_repository
         .find_by_id(id)
         .await?
         .ok_or_else(|| todo_not_found(id))
   }

   /// Todo の名前を更新する
   ///
   /// 名前のバリデーションを先に行うため、不正な名前は存在確認より優先して 400 になる。
   pub async fn update_todo(&self, input: UpdateTodoInput) -> Result<Todo, TodoServiceError> {
      let name = TodoName::new(input.name)?;

      let todo = self
         .todo_repository
         .update_name(&input.id, &name)
         .await?
         .ok_or_else(|| todo_not_found(&input.id))?;
      tracing::info!(todo_id = %todo.id(), "Todo を更新しました");

      Ok(todo)
   }

   pub async fn delete_todo(&self, id: &TodoId) -> Result<(), TodoServiceError> {
      if !self.todo_repository.delete(id).await? {
         return Err(todo_not_found(id));
      }
      tracing::info!(todo_id = %id, "Todo を削除しました");

      Ok(())
   }
}
