use async_trait::async_trait;
use super::todo::{CreateTodo, Todo, TodoId};

#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Creates the `todos` table if missing. Production databases ship with it.
    async fn init(&self) -> anyhow::Result<()>;
    async fn create(&self, input: CreateTodo) -> anyhow::Result<Todo>;
    async fn get(&self, id: TodoId) -> anyhow::Result<Option<Todo>>;
    /// Newest first.
    async fn list(&self) -> anyhow::Result<Vec<Todo>>;
    /// Returns `false` when no row matched.
    async fn update(&self, todo: &Todo) -> anyhow::Result<bool>;
    /// Returns `false` when no row matched.
    async fn delete(&self, id: TodoId) -> anyhow::Result<bool>;
}
