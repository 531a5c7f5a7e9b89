//! The todo document and the request payloads that act on it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A single todo document.
///
/// Larger `order` values rank first. Orders are assumed unique but nothing
/// enforces it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(rename = "todoId")]
    pub id: Uuid,
    pub value: String,
    pub order: i64,
    pub done_at: Option<DateTime<Utc>>,
}

impl Todo {
    pub fn new(value: String, order: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            value,
            order,
            done_at: None,
        }
    }

    /// Apply the non-order parts of a patch. Reordering touches two documents
    /// and is handled by the store.
    pub fn apply(&mut self, patch: &TodoPatch, now: DateTime<Utc>) {
        if let Some(order) = patch.order {
            self.order = order;
        }
        if let Some(done) = patch.done {
            self.done_at = done.then_some(now);
        }
        if let Some(value) = &patch.value {
            self.value.clone_from(value);
        }
    }
}

/// Raw `PATCH /api/todos/{todoId}` body. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodo {
    pub order: Option<i64>,
    /// `Some(None)` when the client sent `"done": null`.
    #[serde(default, deserialize_with = "explicit")]
    pub done: Option<Option<bool>>,
    pub value: Option<String>,
}

/// A validated update, ready for the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoPatch {
    /// New rank. Whoever holds it already takes the old rank.
    pub order: Option<i64>,
    /// `Some(true)` stamps completion, `Some(false)` clears it.
    pub done: Option<bool>,
    pub value: Option<String>,
}

fn explicit<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
