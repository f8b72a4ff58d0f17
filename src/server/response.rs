//! JSON response envelopes

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use serde::Serialize;
use serde_json::json;

use crate::cache::Served;
use crate::error::{ApiError, Error};

/// Message returned whenever nothing is cached and upstream failed
pub const UNAVAILABLE_MESSAGE: &str = "Data temporarily unavailable";

/// `{ "data": ..., "cached": bool }`
pub fn served<T: Serialize>(served: Served<T>) -> Response {
    let cached = served.is_cached();
    Json(json!({ "data": served.data, "cached": cached })).into_response()
}

/// `{ "data": ... }` for computed responses
pub fn data<T: Serialize>(data: T) -> Response {
    Json(json!({ "data": data })).into_response()
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Unavailable(_) => error_body(StatusCode::SERVICE_UNAVAILABLE, UNAVAILABLE_MESSAGE),
            Error::Api(ApiError::NotFound(what)) => {
                error_body(StatusCode::NOT_FOUND, &format!("Not found: {}", what))
            }
            other => {
                error!("Request failed: {}", other);
                error_body(StatusCode::INTERNAL_SERVER_ERROR, &other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Provenance;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_served_envelope() {
        let response = served(Served {
            data: vec![1, 2],
            provenance: Provenance::Cached,
        });

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"data": [1, 2], "cached": true}));
    }

    #[tokio::test]
    async fn test_unavailable_is_503() {
        let response = Error::Unavailable("schedule".into()).into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Data temporarily unavailable"})
        );
    }

    #[tokio::test]
    async fn test_not_found_is_404() {
        let response = Error::from(ApiError::NotFound("driver senna".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
