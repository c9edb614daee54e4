use askama::Template;
use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Element id that HTMX notice fragments are swapped into.
pub const NOTICE_TARGET: &str = "#notice";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Validation error: {0}")]
    ValidationErrors(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::ValidationErrors(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Session(_) | AppError::ConfigError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text shown to the user. Internal failures are not described.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::Conflict(msg) => msg.clone(),
            AppError::ValidationErrors(err) => format!("Invalid input: {}", err),
            AppError::BadRequest(err) => err.to_string(),
            AppError::Session(_) | AppError::ConfigError(_) | AppError::InternalError(_) => {
                "Something went wrong, please try again.".to_string()
            }
        }
    }
}

#[derive(Template)]
#[template(path = "notice.html")]
pub struct NoticeTemplate {
    pub message: String,
}

/// Errors render as an HTML notice fragment retargeted at [`NOTICE_TARGET`].
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let notice = NoticeTemplate {
            message: self.user_message(),
        };
        let mut res = (status, notice).into_response();
        let headers = res.headers_mut();
        headers.insert("HX-Retarget", HeaderValue::from_static(NOTICE_TARGET));
        headers.insert("HX-Reswap", HeaderValue::from_static("innerHTML"));
        res
    }
}
