//! Request body schemas.
//!
//! Create bodies are checked field by field against a raw JSON value so each
//! failure gets its own message. Update bodies are already typed and only
//! need their text and order bounds checked.

use serde_json::Value;

use crate::error::AppError;
use crate::model::{TodoPatch, UpdateTodo};

/// Longest accepted todo text, in UTF-16 code units.
pub const MAX_VALUE_LEN: usize = 50;

/// Largest order a client may assign. The next create takes `order + 1`, so
/// `i64::MAX` itself stays free.
pub const MAX_ORDER: i64 = i64::MAX - 1;

/// Validate a `POST /api/todos` body and return the todo text.
pub fn create_todo(body: &Value) -> Result<String, AppError> {
    let Value::Object(fields) = body else {
        return Err(AppError::Validation(
            "request body must be a JSON object".to_string(),
        ));
    };

    let value = match fields.get("value") {
        None | Some(Value::Null) => return Err(invalid("\"value\" is required")),
        Some(Value::String(value)) => value,
        Some(_) => return Err(invalid("\"value\" must be a string")),
    };
    check_value(value)?;

    if let Some(key) = fields.keys().find(|key| key.as_str() != "value") {
        return Err(AppError::Validation(format!("\"{key}\" is not allowed")));
    }

    Ok(value.clone())
}

/// Turn a raw update body into a store patch.
///
/// An order of zero and an empty value mean "leave unchanged".
/// A `null` done clears completion like `false`.
pub fn update_todo(input: UpdateTodo) -> Result<TodoPatch, AppError> {
    let value = input.value.filter(|value| !value.is_empty());
    if let Some(value) = &value {
        check_value(value)?;
    }

    if let Some(order) = input.order {
        if order > MAX_ORDER {
            return Err(AppError::Validation(format!(
                "\"order\" must be less than or equal to {MAX_ORDER}"
            )));
        }
    }

    Ok(TodoPatch {
        order: input.order.filter(|order| *order != 0),
        done: input.done.map(|done| done.unwrap_or(false)),
        value,
    })
}

fn check_value(value: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(invalid("\"value\" is not allowed to be empty"));
    }
    if value.encode_utf16().count() > MAX_VALUE_LEN {
        return Err(AppError::Validation(format!(
            "\"value\" length must be less than or equal to {MAX_VALUE_LEN} characters long"
        )));
    }
    Ok(())
}

fn invalid(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}
