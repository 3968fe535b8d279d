use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{routing::{get, post}, Json, Router};
use serde_json::{json, Value};

use crate::application::todo_service::{ServiceError, TodoService};
use crate::domain::todo::{CreateTodo, Todo, TodoId, UpdateTodo};
use crate::http::types::{decode_json, ApiError, ApiJson};

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/todos", get(list_todos::<S>))
        .route("/todo", post(create_todo::<S>))
        .route("/todo/:id", get(get_todo::<S>).put(update_todo::<S>).delete(delete_todo::<S>))
        .with_state(state)
}

async fn list_todos<S: TodoService>(State(state): State<AppState<S>>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.service.list().await.map_err(ApiError::internal)?;
    Ok(Json(todos))
}

async fn create_todo<S: TodoService>(State(state): State<AppState<S>>, ApiJson(payload): ApiJson<CreateTodo>) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    match state.service.get(id).await.map_err(ApiError::internal)? {
        Some(t) => Ok(Json(t)),
        None => Err(ApiError::NotFound("Todo not found".into())),
    }
}

/// A missing todo is reported before the body is looked at.
async fn update_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>, body: Result<Bytes, BytesRejection>) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    if state.service.get(id).await.map_err(ApiError::internal)?.is_none() {
        return Err(ServiceError::DoesNotExist.into());
    }
    let payload: UpdateTodo = decode_json(&body.map_err(|_| ApiError::invalid_payload())?)?;
    let todo = state.service.update(id, payload).await?;
    Ok(Json(todo))
}

async fn delete_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    state.service.delete(id).await?;
    Ok(Json(json!({ "result": "success" })))
}

/// Digits only; a sign, whitespace or overflow is rejected.
fn parse_id(s: &str) -> Result<TodoId, ApiError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) { return Err(ApiError::invalid_id()); }
    s.parse().map(TodoId).map_err(|_| ApiError::invalid_id())
}

#[cfg(test)]
mod tests {
    use super::parse_id;
    use crate::domain::todo::TodoId;

    #[test]
    fn ids_are_plain_digits() {
        assert_eq!(parse_id("42").unwrap(), TodoId(42));
        assert_eq!(parse_id("007").unwrap(), TodoId(7));
        for bad in ["", "-1", "+1", "abc", "1.5", " 1", "99999999999999999999"] {
            assert!(parse_id(bad).is_err(), "{bad:?} should be rejected");
        }
    }
}
