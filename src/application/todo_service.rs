use std::sync::Arc;

use crate::domain::repository::TodoRepository;
use crate::domain::todo::{validate_content, ContentError, CreateTodo, Todo, TodoId, UpdateTodo};
use crate::notify::{Notification, Notifier};
use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    InvalidContent(#[from] ContentError),
    #[error("Todo does NOT exist")]
    DoesNotExist,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn create(&self, input: CreateTodo) -> Result<Todo, ServiceError>;
    async fn get(&self, id: TodoId) -> Result<Option<Todo>>;
    async fn list(&self) -> Result<Vec<Todo>>;
    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<Todo, ServiceError>;
    async fn delete(&self, id: TodoId) -> Result<(), ServiceError>;
}

/// Mutations notify through `notifier` once the row is written; delivery is
/// never awaited.
#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
    notifier: Arc<dyn Notifier>,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R, notifier: Arc<dyn Notifier>) -> Self { Self { repo, notifier } }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn create(&self, input: CreateTodo) -> Result<Todo, ServiceError> {
        validate_content(&input.content)?;
        let todo = self.repo.create(input).await?;
        tracing::info!(id = %todo.id, "todo created");
        self.notifier.notify(Notification::created(&todo));
        Ok(todo)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>> { self.repo.get(id).await }

    async fn list(&self) -> Result<Vec<Todo>> { self.repo.list().await }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<Todo, ServiceError> {
        let Some(mut todo) = self.repo.get(id).await? else { return Err(ServiceError::DoesNotExist) };
        if let Some(content) = &input.content { validate_content(content)?; }
        todo.apply(input);
        // The row can vanish between the read and the write.
        if !self.repo.update(&todo).await? { return Err(ServiceError::DoesNotExist); }
        tracing::info!(id = %todo.id, "todo updated");
        self.notifier.notify(Notification::updated(&todo));
        Ok(todo)
    }

    async fn delete(&self, id: TodoId) -> Result<(), ServiceError> {
        if self.repo.get(id).await?.is_none() { return Err(ServiceError::DoesNotExist); }
        if !self.repo.delete(id).await? { return Err(ServiceError::DoesNotExist); }
        tracing::info!(%id, "todo deleted");
        self.notifier.notify(Notification::Deleted { id });
        Ok(())
    }
}
