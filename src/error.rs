//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Field-level rule violation. Logged with its detail, reported to clients as a uniform 400.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },
    #[error("{field} has the wrong type")]
    WrongType { field: &'static str },
    #[error("{0} may not be null")]
    Null(String),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("malformed body: {0}")]
    Body(String),
    #[error("constraint: {0}")]
    Constraint(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

/// Message returned for every validation failure; the detail only goes to the log.
pub const VALIDATION_MESSAGE: &str = "validation errors";

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize)]
pub struct ValidationErrorBody {
    pub errors: Vec<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: format!("{entity} not found"),
                }),
            )
                .into_response(),
            AppError::Validation(e) => {
                tracing::warn!(reason = %e, "rejected write");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorBody {
                        errors: vec![VALIDATION_MESSAGE.to_string()],
                    }),
                )
                    .into_response()
            }
            AppError::Db(e) => {
                tracing::error!(error = %e, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "internal server error".into(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_json(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_names_the_entity() {
        let resp = AppError::NotFound("Camper").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await, json!({"error": "Camper not found"}));
    }

    #[tokio::test]
    async fn validation_hides_the_detail() {
        let err = ValidationError::OutOfRange {
            field: "age",
            min: 8,
            max: 18,
            value: 40,
        };
        let resp = AppError::from(err).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await, json!({"errors": ["validation errors"]}));
    }

    #[tokio::test]
    async fn database_failure_is_500() {
        let resp = AppError::Db(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await, json!({"error": "internal server error"}));
    }

    #[test]
    fn out_of_range_message() {
        let err = ValidationError::OutOfRange {
            field: "time",
            min: 0,
            max: 23,
            value: 25,
        };
        assert_eq!(err.to_string(), "time must be between 0 and 23, got 25");
    }
}
