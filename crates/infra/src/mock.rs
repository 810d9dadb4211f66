//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todos-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use todos_domain::todo::{NewTodo, Todo, TodoId, TodoName};

use crate::{error::InfraError, repository::TodoRepository};

#[derive(Default)]
struct MockState {
   todos:   Vec<Todo>,
   last_id: i64,
}

impl MockState {
   fn push(&mut self, new_todo: &NewTodo) -> Todo {
      self.last_id += 1;
      let todo = Todo::from_db(
         TodoId::new(self.last_id),
         new_todo.name().clone(),
         new_todo.created_at(),
      );
      self.todos.push(todo.clone());
      todo
   }
}

/// インメモリの TodoRepository
///
/// id は SQLite の `AUTOINCREMENT` と同様に単調増加し、再利用しない。
#[derive(Clone, Default)]
pub struct MockTodoRepository {
   state: Arc<Mutex<MockState>>,
}

impl MockTodoRepository {
   pub fn new() -> Self {
      Self::default()
   }

   /// 既存の Todo を登録した状態で作成する
   pub fn with_todos(todos: Vec<Todo>) -> Self {
      let last_id = todos.iter().map(|t| t.id().as_i64()).max().unwrap_or(0);
      Self {
         state: Arc::new(Mutex::new(MockState { todos, last_id })),
      }
   }

   /// 現在保持している Todo のスナップショット
   pub fn snapshot(&self) -> Vec<Todo> {
      self.state.lock().unwrap().todos.clone()
   }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
   async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
      Ok(self.snapshot())
   }

   async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
      let state = self.state.lock().unwrap();
      Ok(state.todos.iter().find(|t| t.id() == id).cloned())
   }

   async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, InfraError> {
      Ok(self.state.lock().unwrap().push(new_todo))
   }

   async fn insert_many(&self, new_todos: &[NewTodo]) -> Result<u64, InfraError> {
      let mut state = self.state.lock().unwrap();
      for new_todo in new_todos {
         state.push(new_todo);
      }
      Ok(new_todos.len() as u64)
   }

   async fn update_name(
      &self,
      id: &TodoId,
      name: &TodoName,
   ) -> Result<Option<Todo>, InfraError> {
      let mut state = self.state.lock().unwrap();
      let Some(todo) = state.todos.iter_mut().find(|t| t.id() == id) else {
         return Ok(None);
      };
      *todo = todo.clone().renamed(name.clone());
      Ok(Some(todo.clone()))
   }

   async fn delete(&self, id: &TodoId) -> Result<bool, InfraError> {
      let mut state = self.state.lock().unwrap();
      let before = state.todos.len();
      state.todos.retain(|t| t.id() != id);
      Ok(state.todos.len() < before)
   }

   async fn count(&self) -> Result<i64, InfraError> {
      Ok(self.state.lock().unwrap().todos.len() as i64)
   }
}
