// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Offer not found: {0}")]
    OfferNotFound(String),

    #[error("Offer {0} is not approved for payment")]
    OfferNotApproved(String),

    #[error("Document not found")]
    DocumentNotFound,

    #[error("Duplicate entry: {0}")]
    DuplicateKey(String),

    #[error("Authentication error")]
    AuthError,

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Service error: {0}")]
    ServiceError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::OfferNotFound(_) => StatusCode::NOT_FOUND,
            AppError::OfferNotApproved(_) => StatusCode::BAD_REQUEST,
            AppError::DocumentNotFound => StatusCode::NOT_FOUND,
            AppError::DuplicateKey(_) => StatusCode::CONFLICT,
            AppError::AuthError => StatusCode::UNAUTHORIZED,
            AppError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ServiceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AppError::Database(_) => "Database error",
            AppError::Io(_) => "IO error",
            AppError::Csv(_) => "Export error",
            AppError::ValidationError(_) => "Validation failed",
            AppError::OfferNotFound(_) => "Offer not found",
            AppError::OfferNotApproved(_) => "Offer is not approved for payment",
            AppError::DocumentNotFound => "Document not found",
            AppError::DuplicateKey(_) => "Duplicate entry",
            AppError::AuthError => "Authentication failed",
            AppError::ConfigurationError(_) => "Configuration error",
            AppError::ServiceError(_) => "Service error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal details stay in the logs, clients get the label only.
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            self.label().to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": self.label(),
            "message": message,
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ValidationError(format!("JSON parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::ServiceError(format!("Password hashing failed: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::debug!("Token rejected: {}", err);
        AppError::AuthError
    }
}

// Helper conversion functions
impl AppError {
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::ConfigurationError(msg.into())
    }

    pub fn service(msg: impl Into<String>) -> Self {
        AppError::ServiceError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
