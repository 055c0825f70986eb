//! Error handling for the Farm Management Platform
//!
//! Provides consistent error responses in English and Portuguese

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_pt: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Insufficient inventory: {0}")]
    InsufficientInventory(String),

    // Storage errors
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Stored data could not be decoded: {0}")]
    Serialization(#[from] serde_json::Error),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_pt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InsufficientInventory(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::StorageError(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Serialization(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn detail(&self) -> ErrorDetail {
        match self {
            AppError::Validation {
                field,
                message,
                message_pt,
            } => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message_en: message.clone(),
                message_pt: message_pt.clone(),
                field: Some(field.clone()),
            },
            AppError::ValidationError(msg) => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message_en: msg.clone(),
                message_pt: format!("Dados inválidos: {}", msg),
                field: None,
            },
            AppError::NotFound(resource) => ErrorDetail {
                code: "NOT_FOUND".to_string(),
                message_en: format!("{} not found", resource),
                message_pt: format!("{} não encontrado", resource),
                field: None,
            },
            AppError::InsufficientInventory(msg) => ErrorDetail {
                code: "INSUFFICIENT_INVENTORY".to_string(),
                message_en: msg.clone(),
                message_pt: format!("Estoque insuficiente: {}", msg),
                field: None,
            },
            AppError::StorageError(msg) => ErrorDetail {
                code: "STORAGE_ERROR".to_string(),
                message_en: format!("Storage error: {}", msg),
                message_pt: format!("Erro de armazenamento: {}", msg),
                field: None,
            },
            AppError::Serialization(_) => ErrorDetail {
                code: "CORRUPT_DATA".to_string(),
                message_en: "Stored data could not be read".to_string(),
                message_pt: "Não foi possível ler os dados armazenados".to_string(),
                field: None,
            },
            AppError::DatabaseError(_) => ErrorDetail {
                code: "DATABASE_ERROR".to_string(),
                message_en: "A database error occurred".to_string(),
                message_pt: "Ocorreu um erro no banco de dados".to_string(),
                field: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_detail = self.detail();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers and services
pub type AppResult<T> = Result<T, AppError>;
