use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};

use crate::domain::{
    repository::TodoRepository,
    todo::{CreateTodo, Priority, Todo, TodoId},
};

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    /// Opens an existing database file. A missing file is an error; the
    /// database is never created implicitly.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("database file {} does not exist", path.display());
        }
        let options = SqliteConnectOptions::new().filename(path).create_if_missing(false);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| format!("opening database {}", path.display()))?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                priority INTEGER NOT NULL,
                content VARCHAR(50) NOT NULL,
                completed INTEGER NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn create(&self, input: CreateTodo) -> Result<Todo> {
        let priority = input.priority.unwrap_or_default();
        let completed = input.completed.unwrap_or(false);
        let result = sqlx::query("INSERT INTO todos (priority, content, completed) VALUES (?1, ?2, ?3)")
            .bind(i64::from(priority))
            .bind(&input.content)
            .bind(completed as i64)
            .execute(&*self.pool)
            .await?;
        Ok(Todo { id: TodoId(result.last_insert_rowid()), priority, content: input.content, completed })
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>> {
        let row = sqlx::query("SELECT rowid AS id, priority, content, completed FROM todos WHERE rowid = ?1")
            .bind(id.0)
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_todo).transpose()
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        let rows = sqlx::query("SELECT rowid AS id, priority, content, completed FROM todos ORDER BY rowid DESC")
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter().map(row_to_todo).collect()
    }

    async fn update(&self, todo: &Todo) -> Result<bool> {
        let result = sqlx::query("UPDATE todos SET priority = ?2, content = ?3, completed = ?4 WHERE rowid = ?1")
            .bind(todo.id.0)
            .bind(i64::from(todo.priority))
            .bind(&todo.content)
            .bind(todo.completed as i64)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: TodoId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE rowid = ?1")
            .bind(id.0)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_todo(row: SqliteRow) -> Result<Todo> {
    let id: i64 = row.try_get("id")?;
    let priority: i64 = row.try_get("priority")?;
    let content: String = row.try_get("content")?;
    let completed: i64 = row.try_get("completed")?;

    let priority = Priority::try_from(priority).map_err(|e| anyhow::anyhow!("todo #{id}: {e}"))?;

    Ok(Todo { id: TodoId(id), priority, content, completed: completed != 0 })
}
