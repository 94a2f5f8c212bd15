use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use thiserror::Error;

use crate::domain::ValidationError;

pub type RestResult<T> = Result<T, RestError>;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("Validation failed for one or more fields")]
    Validation(#[source] ValidationError),

    #[error("Parse Error: {0}")]
    ParseError(String),

    #[error("Unauthorized Access")]
    FailedToAuthenticate(#[source] anyhow::Error),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<sqlx::Error> for RestError {
    fn from(_e: sqlx::Error) -> Self {
        Self::InternalError("Database error".into())
    }
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::ParseError(_) => StatusCode::BAD_REQUEST,
            Self::FailedToAuthenticate(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InternalError(_) | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Internal detail stays in the logs, not in the response body
        let message = match self {
            Self::InternalError(_) | Self::Other(_) => {
                tracing::error!(error.cause_chain = ?self, "Request failed");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        let mut body = serde_json::json!({
            "success": false,
            "message": message,
        });
        if let Self::Validation(error) = self {
            body["violations"] = serde_json::json!(error.violations);
        }

        HttpResponse::build(self.status_code()).json(body)
    }
}
