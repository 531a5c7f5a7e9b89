//! The todo document collection.
//!
//! Documents live in memory behind an async `RwLock`. A store opened with a
//! snapshot path rewrites the whole collection to that file after every
//! mutation, while still holding the write lock, so the file always matches
//! some serial order of writes.

use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::model::{Todo, TodoPatch};

/// Shared handle used as router state.
pub type Db = Arc<TodoStore>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("snapshot {} is not a valid todo collection: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode todo collection: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("no order left above {0}")]
    OrderExhausted(i64),
}

#[derive(Debug, Default)]
pub struct TodoStore {
    docs: RwLock<HashMap<Uuid, Todo>>,
    snapshot: Option<PathBuf>,
}

impl TodoStore {
    /// A store that keeps nothing across restarts.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a store backed by the snapshot at `path`. A missing file is an
    /// empty collection.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let docs: HashMap<Uuid, Todo> = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let todos: Vec<Todo> =
                    serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
                        path: path.clone(),
                        source,
                    })?;
                todos.into_iter().map(|todo| (todo.id, todo)).collect()
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        info!(path = %path.display(), todos = docs.len(), "opened todo snapshot");

        Ok(Self {
            docs: RwLock::new(docs),
            snapshot: Some(path),
        })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot.as_deref()
    }

    /// Insert a new todo ranked above every existing one.
    pub async fn insert(&self, value: String) -> Result<Todo, StoreError> {
        let mut docs = self.docs.write().await;
        let order = match docs.values().map(|todo| todo.order).max() {
            Some(max) => max.checked_add(1).ok_or(StoreError::OrderExhausted(max))?,
            None => 1,
        };
        let todo = Todo::new(value, order);
        docs.insert(todo.id, todo.clone());
        self.flush(&docs).await?;

        debug!(todo_id = %todo.id, order, "inserted todo");
        Ok(todo)
    }

    /// All todos, highest order first. Equal orders fall back to id.
    pub async fn list(&self) -> Vec<Todo> {
        let docs = self.docs.read().await;
        let mut todos: Vec<Todo> = docs.values().cloned().collect();
        sort_for_display(&mut todos);
        todos
    }

    pub async fn get(&self, id: Uuid) -> Option<Todo> {
        self.docs.read().await.get(&id).cloned()
    }

    /// Apply `patch` to the todo with `id`. Returns `Ok(None)` if there is no
    /// such todo.
    ///
    /// When the patch moves the todo to an order another todo already holds,
    /// the two swap orders within this single write.
    pub async fn update(&self, id: Uuid, patch: TodoPatch) -> Result<Option<Todo>, StoreError> {
        let mut docs = self.docs.write().await;
        let Some(current_order) = docs.get(&id).map(|todo| todo.order) else {
            return Ok(None);
        };

        if let Some(order) = patch.order {
            let displaced = docs
                .values()
                .filter(|todo| todo.id != id && todo.order == order)
                .map(|todo| todo.id)
                .min();
            if let Some(target) = displaced {
                if let Some(todo) = docs.get_mut(&target) {
                    todo.order = current_order;
                    debug!(todo_id = %target, order = current_order, "displaced todo");
                }
            }
        }

        let updated = match docs.get_mut(&id) {
            Some(todo) => {
                todo.apply(&patch, Utc::now());
                todo.clone()
            }
            None => return Ok(None),
        };
        self.flush(&docs).await?;

        debug!(todo_id = %id, order = updated.order, "updated todo");
        Ok(Some(updated))
    }

    pub async fn remove(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let mut docs = self.docs.write().await;
        let Some(removed) = docs.remove(&id) else {
            return Ok(None);
        };
        self.flush(&docs).await?;

        debug!(todo_id = %id, "removed todo");
        Ok(Some(removed))
    }

    async fn flush(&self, docs: &HashMap<Uuid, Todo>) -> Result<(), StoreError> {
        let Some(path) = &self.snapshot else {
            return Ok(());
        };

        let mut todos: Vec<&Todo> = docs.values().collect();
        todos.sort_by_key(|todo| todo.id);
        let bytes = serde_json::to_vec_pretty(&todos).map_err(StoreError::Encode)?;

        let tmp = tmp_path(path);
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|source| StoreError::Io {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })
    }
}

fn sort_for_display(todos: &mut [Todo]) {
    todos.sort_by(|a, b| b.order.cmp(&a.order).then_with(|| a.id.cmp(&b.id)));
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
