//! `/api` handlers.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::AppError,
    extract::Payload,
    model::{Todo, UpdateTodo},
    store::Db,
    validate,
};

#[derive(Debug, Serialize)]
pub struct Hello {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TodoCreated {
    pub todo: Todo,
}

#[derive(Debug, Serialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}

/// Serializes as `{}`.
#[derive(Debug, Serialize)]
pub struct Empty {}

pub async fn hello() -> Json<Hello> {
    Json(Hello { message: "Hi!" })
}

pub async fn create_todo(
    State(db): State<Db>,
    Payload(body): Payload<Value>,
) -> Result<(StatusCode, Json<TodoCreated>), AppError> {
    let value = validate::create_todo(&body)?;
    let todo = db.insert(value).await?;
    tracing::info!(todo_id = %todo.id, order = todo.order, "created todo");
    Ok((StatusCode::CREATED, Json(TodoCreated { todo })))
}

pub async fn list_todos(State(db): State<Db>) -> Json<TodoList> {
    Json(TodoList {
        todos: db.list().await,
    })
}

pub async fn update_todo(
    State(db): State<Db>,
    id: Result<Path<Uuid>, PathRejection>,
    Payload(body): Payload<UpdateTodo>,
) -> Result<Json<Empty>, AppError> {
    let Path(id) = id?;
    let patch = validate::update_todo(body)?;
    db.update(id, patch).await?.ok_or(AppError::NotFound)?;
    Ok(Json(Empty {}))
}

pub async fn delete_todo(
    State(db): State<Db>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Empty>, AppError> {
    let Path(id) = id?;
    db.remove(id).await?.ok_or(AppError::NotFound)?;
    tracing::info!(todo_id = %id, "deleted todo");
    Ok(Json(Empty {}))
}
