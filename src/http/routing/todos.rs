use axum::extract::{rejection::JsonRejection, Path, State};
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use axum::http::StatusCode;
use axum::http::header::LOCATION;

use crate::{
    application::todo_service::TodoService,
    domain::todo::{Todo, TodoId, TodoPayload},
    http::types::ApiError,
};

pub const TODOS_PATH: &str = "/api/todos";

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route(TODOS_PATH, get(list_todos::<S>).post(create_todo::<S>))
        .route(&format!("{TODOS_PATH}/:id"), get(get_todo::<S>).put(update_todo::<S>).delete(delete_todo::<S>))
        .with_state(state)
}

/// URI a todo can be fetched from, as sent in `Location`.
pub fn todo_location(id: &TodoId) -> String { format!("{TODOS_PATH}/{id}") }

async fn list_todos<S: TodoService + Clone>(State(state): State<AppState<S>>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.service.list().await?))
}

async fn get_todo<S: TodoService + Clone>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<Todo>, ApiError> {
    state.service.get(TodoId(id)).await?.map(Json).ok_or(ApiError::NotFound)
}

async fn create_todo<S: TodoService + Clone>(State(state): State<AppState<S>>, payload: Result<Json<TodoPayload>, JsonRejection>) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let todo = state.service.create(payload).await?;
    tracing::debug!(id = %todo.id, "created todo");
    Ok((StatusCode::CREATED, [(LOCATION, todo_location(&todo.id))], Json(todo)))
}

async fn update_todo<S: TodoService + Clone>(State(state): State<AppState<S>>, Path(id): Path<String>, payload: Result<Json<TodoPayload>, JsonRejection>) -> Result<StatusCode, ApiError> {
    let Json(payload) = payload?;
    match state.service.update(TodoId(id), payload).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::NotFound),
    }
}

// Absent and malformed ids both count as deleted.
async fn delete_todo<S: TodoService + Clone>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let removed = state.service.delete(TodoId(id.clone())).await?;
    tracing::debug!(%id, removed, "delete todo");
    Ok(StatusCode::NO_CONTENT)
}
