use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum LeadformError {
    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Email delivery error: {message}")]
    EmailDelivery { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl LeadformError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn email_delivery(message: impl Into<String>) -> Self {
        Self::EmailDelivery {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Database { .. } => "DATABASE_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::EmailDelivery { .. } => "EMAIL_DELIVERY_ERROR",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Database { .. } => 500,
            Self::Validation { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Configuration { .. } => 500,
            Self::EmailDelivery { .. } => 502,
            Self::Internal { .. } => 500,
        }
    }
}

pub type LeadformResult<T> = Result<T, LeadformError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
}

impl From<LeadformError> for ErrorResponse {
    fn from(error: LeadformError) -> Self {
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

// Conversion from common error types
impl From<sqlx::Error> for LeadformError {
    fn from(error: sqlx::Error) -> Self {
        Self::database(error.to_string())
    }
}

impl From<serde_json::Error> for LeadformError {
    fn from(error: serde_json::Error) -> Self {
        Self::validation("JSON", error.to_string())
    }
}

impl From<config::ConfigError> for LeadformError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}

impl From<lettre::error::Error> for LeadformError {
    fn from(error: lettre::error::Error) -> Self {
        Self::email_delivery(error.to_string())
    }
}

impl From<lettre::address::AddressError> for LeadformError {
    fn from(error: lettre::address::AddressError) -> Self {
        Self::email_delivery(error.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for LeadformError {
    fn from(error: lettre::transport::smtp::Error) -> Self {
        Self::email_delivery(error.to_string())
    }
}
