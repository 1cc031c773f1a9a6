use crate::domain::repository::TodoRepository;
use crate::domain::todo::{DueDate, Todo, TodoId, TodoPayload};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn create(&self, input: TodoPayload) -> Result<Todo>;
    async fn get(&self, id: TodoId) -> Result<Option<Todo>>;
    async fn list(&self) -> Result<Vec<Todo>>;
    async fn update(&self, id: TodoId, input: TodoPayload) -> Result<Option<Todo>>;
    async fn delete(&self, id: TodoId) -> Result<bool>;
    /// Inserts `sample` only when the store holds nothing yet.
    async fn seed_if_empty(&self, sample: TodoPayload) -> Result<Option<Todo>>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn create(&self, input: TodoPayload) -> Result<Todo> { self.repo.create(input).await }
    async fn get(&self, id: TodoId) -> Result<Option<Todo>> { self.repo.get(id).await }
    async fn list(&self) -> Result<Vec<Todo>> { self.repo.list().await }
    async fn update(&self, id: TodoId, input: TodoPayload) -> Result<Option<Todo>> { self.repo.update(id, input).await }
    async fn delete(&self, id: TodoId) -> Result<bool> { self.repo.delete(id).await }

    async fn seed_if_empty(&self, sample: TodoPayload) -> Result<Option<Todo>> {
        if !self.repo.list().await?.is_empty() { return Ok(None); }
        self.repo.create(sample).await.map(Some)
    }
}

/// The todo a fresh deployment starts with, due today.
pub fn example_todo() -> TodoPayload {
    TodoPayload {
        description: "Try out the todo API".to_string(),
        completed: false,
        due_date: DueDate::from(Utc::now().date_naive()),
    }
}
