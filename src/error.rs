use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::notice::Notice;

#[derive(Error, Debug)]
pub enum AppError {
    /// Login failure. Deliberately covers both unknown email and wrong
    /// password so callers cannot enumerate accounts.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Old password is incorrect")]
    WrongOldPassword,

    #[error("{0}")]
    Validation(&'static str),

    #[error("Record not found")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::WrongOldPassword => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn notice(&self) -> Notice {
        match self {
            AppError::InvalidCredentials | AppError::WrongOldPassword => {
                Notice::danger(self.to_string())
            }
            AppError::DuplicateEmail | AppError::Validation(_) | AppError::NotFound => {
                Notice::warning(self.to_string())
            }
            // Store-level failures are surfaced without detail.
            AppError::Internal(_) => Notice::danger("Something went wrong"),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    notices: Vec<Notice>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(ref e) = self {
            error!(error = %e, "request failed");
        }
        let body = ErrorBody {
            notices: vec![self.notice()],
        };
        (self.status(), Json(body)).into_response()
    }
}
