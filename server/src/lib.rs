//! Todo list REST service.
//!
//! # Overview
//! An axum router over a single document collection (`TodoStore`). JSON
//! routes live under `/api`; every other path is served from the assets
//! directory.
//!
//! # Design
//! - Handlers validate, call one store operation, and shape the JSON reply.
//! - Every failure becomes an `AppError`, rendered as `{"errorMessage": ...}`.
//! - Store mutations are serialized by one write lock, so ordering and the
//!   reorder swap never interleave.

use std::path::Path;

use axum::{
    routing::{get, patch},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod routes;
pub mod store;
pub mod telemetry;
pub mod validate;

pub use error::AppError;
pub use model::{Todo, TodoPatch, UpdateTodo};
pub use store::{Db, StoreError, TodoStore};

/// The `/api` routes alone.
pub fn api(db: Db) -> Router {
    let todos = Router::new()
        .route("/", get(routes::hello))
        .route("/todos", get(routes::list_todos).post(routes::create_todo))
        .route(
            "/todos/{todo_id}",
            patch(routes::update_todo).delete(routes::delete_todo),
        )
        .with_state(db);

    Router::new().nest("/api", todos)
}

/// The full application: `/api`, static assets, and request tracing.
pub fn app(db: Db, assets_dir: &Path) -> Router {
    api(db)
        .fallback_service(ServeDir::new(assets_dir))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, db: Db, assets_dir: &Path) -> Result<(), std::io::Error> {
    axum::serve(listener, app(db, assets_dir)).await
}
