use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    repository::TodoRepository,
    todo::{Todo, TodoId, TodoPayload},
};

/// Process-local store. Contents live as long as the server; kept in
/// insertion order so listings are stable.
#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    items: Arc<RwLock<Vec<Todo>>>,
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn init(&self) -> Result<()> { Ok(()) }

    async fn create(&self, input: TodoPayload) -> Result<Todo> {
        let todo = input.into_todo(TodoId::generate());
        self.items.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>> {
        Ok(self.items.read().await.iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Todo>> { Ok(self.items.read().await.clone()) }

    async fn update(&self, id: TodoId, input: TodoPayload) -> Result<Option<Todo>> {
        let mut items = self.items.write().await;
        let Some(slot) = items.iter_mut().find(|t| t.id == id) else { return Ok(None) };
        *slot = input.into_todo(id);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: TodoId) -> Result<bool> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|t| t.id != id);
        Ok(items.len() < before)
    }
}
