use async_trait::async_trait;
use super::todo::{Todo, TodoId, TodoPayload};

/// Storage seam for todos. Lookups never validate id shape; an id the store
/// never issued is just absent.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn create(&self, input: TodoPayload) -> anyhow::Result<Todo>;
    async fn get(&self, id: TodoId) -> anyhow::Result<Option<Todo>>;
    async fn list(&self) -> anyhow::Result<Vec<Todo>>;
    /// Replaces every mutable field. `None` when the id is unknown.
    async fn update(&self, id: TodoId, input: TodoPayload) -> anyhow::Result<Option<Todo>>;
    /// `true` when a row was removed.
    async fn delete(&self, id: TodoId) -> anyhow::Result<bool>;
}
