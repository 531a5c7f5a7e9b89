//! Request body extraction.
//!
//! Bodies may arrive as JSON or as `application/x-www-form-urlencoded`. An
//! empty body, or one with any other content type, reads as `{}`.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A deserialized request body, JSON or form-encoded.
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match BodyKind::of(&req) {
            BodyKind::Form => {
                let Form(body) = Form::<T>::from_request(req, state).await?;
                Ok(Self(body))
            }
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state).await?;
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return empty();
                }
                let Json(body) = Json::<T>::from_bytes(&bytes)?;
                Ok(Self(body))
            }
            BodyKind::Other => empty(),
        }
    }
}

fn empty<T: DeserializeOwned>() -> Result<Payload<T>, AppError> {
    serde_json::from_str("{}")
        .map(Payload)
        .map_err(|err| AppError::Validation(err.to_string()))
}

#[derive(Debug, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl BodyKind {
    fn of(req: &Request) -> Self {
        let Some(content_type) = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        else {
            return BodyKind::Other;
        };
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == "application/x-www-form-urlencoded" {
            BodyKind::Form
        } else if essence == "application/json" || essence.ends_with("+json") {
            BodyKind::Json
        } else {
            BodyKind::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn with_type(content_type: &str) -> Request {
        Request::builder()
            .header(CONTENT_TYPE, content_type)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn content_type_parameters_are_ignored() {
        assert_eq!(
            BodyKind::of(&with_type("application/json; charset=utf-8")),
            BodyKind::Json
        );
        assert_eq!(
            BodyKind::of(&with_type("Application/X-WWW-Form-Urlencoded")),
            BodyKind::Form
        );
        assert_eq!(
            BodyKind::of(&with_type("application/merge-patch+json")),
            BodyKind::Json
        );
        assert_eq!(BodyKind::of(&with_type("text/plain")), BodyKind::Other);
    }

    #[test]
    fn missing_content_type_is_other() {
        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(BodyKind::of(&req), BodyKind::Other);
    }
}
