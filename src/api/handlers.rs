//! API handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::api::{ApiError, AppState};
use crate::types::{CreateTodoRequest, MessageResponse, Todo, UpdateTodoRequest};
use crate::Error;

const CREATE_FAILED: &str = "could not create todo";
const LIST_FAILED: &str = "could not list todos";
const UPDATE_FAILED: &str = "could not update todo";
const DELETE_FAILED: &str = "could not delete todo";

/// Liveness greeting; never touches the store
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Server is up", body = String))
)]
pub async fn hello() -> &'static str {
    "Hello World!"
}

/// Create a new todo
#[utoipa::path(
    post,
    path = "/todos",
    tag = "Todos",
    request_body(content = CreateTodoRequest, description = "New todo object"),
    responses(
        (status = 200, description = "New todo created", body = Todo),
        (status = 400, description = "Bad request", body = MessageResponse),
        (status = 401, description = "Title is missing", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(payload) = payload?;

    let new_todo = payload.validate().map_err(|err| match err {
        Error::MissingTitle => ApiError::missing_field("required field are empty"),
        err => ApiError::from_error(err, CREATE_FAILED, state.expose_errors),
    })?;

    let todo = state
        .store
        .insert(new_todo)
        .await
        .map_err(|e| ApiError::from_error(e, CREATE_FAILED, state.expose_errors))?;

    tracing::info!(id = %todo.id, status = %todo.status, "Created todo");
    Ok(Json(todo))
}

/// Get all todos
#[utoipa::path(
    get,
    path = "/todos",
    tag = "Todos",
    responses(
        (status = 200, description = "List of todos", body = [Todo]),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state
        .store
        .find_all()
        .await
        .map_err(|e| ApiError::from_error(e, LIST_FAILED, state.expose_errors))?;

    Ok(Json(todos))
}

/// Update a todo by ID
///
/// Responds with the todo as it was before the update.
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "Todos",
    params(("id" = String, Path, description = "ID of the todo to update")),
    request_body(content = UpdateTodoRequest, description = "Updated todo object"),
    responses(
        (status = 200, description = "Todo updated", body = Todo),
        (status = 400, description = "Bad request", body = MessageResponse),
        (status = 401, description = "Title is missing", body = MessageResponse),
        (status = 404, description = "Todo not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(payload) = payload?;

    let patch = payload.validate().map_err(|err| match err {
        Error::MissingTitle => ApiError::missing_field("title cannot be empty"),
        err => ApiError::from_error(err, UPDATE_FAILED, state.expose_errors),
    })?;

    let previous = state
        .store
        .find_by_id_and_update(&id, patch)
        .await
        .map_err(|e| ApiError::from_error(e, UPDATE_FAILED, state.expose_errors))?
        .ok_or_else(|| ApiError::not_found("todo not found"))?;

    tracing::info!(%id, "Updated todo");
    Ok(Json(previous))
}

/// Delete a todo by ID
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "Todos",
    params(("id" = String, Path, description = "ID of the todo to delete")),
    responses(
        (status = 200, description = "Todo deleted", body = MessageResponse),
        (status = 404, description = "Todo not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .store
        .find_by_id_and_delete(&id)
        .await
        .map_err(|e| ApiError::from_error(e, DELETE_FAILED, state.expose_errors))?
        .ok_or_else(|| ApiError::not_found("could not find todo"))?;

    tracing::info!(%id, "Deleted todo");
    Ok(Json(MessageResponse::new("deleted todo")))
}
