use crate::model::validation::{FieldError, summarize};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde::Serialize;
use utoipa::ToSchema;

/// Every failure a handler can return. Each variant maps to one status code
/// and renders as `{"message": ...}`.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "{}", message)]
    InvalidRecord {
        message: String,
        errors: Vec<FieldError>,
    },

    #[display(fmt = "User not found")]
    NotFound,

    #[display(fmt = "Employee with Emp/IC Code `{}` already exists", emp_code)]
    Conflict { emp_code: String },

    /// `message` is for the log only; clients get a generic line.
    #[display(fmt = "Internal server error")]
    Storage { message: String },

    #[display(fmt = "{}", message)]
    Delivery { message: String },

    #[display(fmt = "{}", message)]
    InvalidBody { message: String },

    #[display(fmt = "Resume file is required")]
    MissingAttachment,

    #[display(fmt = "{}", message)]
    InvalidUpload { message: String },

    #[display(fmt = "File exceeds the {} byte upload limit", limit)]
    PayloadTooLarge { limit: usize },

    /// Local faults (hashing, temp files). Logged, never echoed.
    #[display(fmt = "Something went wrong!")]
    Internal { message: String },
}

impl ApiError {
    pub fn invalid(errors: Vec<FieldError>) -> Self {
        ApiError::InvalidRecord {
            message: summarize(&errors),
            errors,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal {
            message: message.into(),
        }
    }

    pub fn invalid_upload(message: impl Into<String>) -> Self {
        ApiError::InvalidUpload {
            message: message.into(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "User not found")]
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRecord { .. }
            | ApiError::InvalidBody { .. }
            | ApiError::MissingAttachment
            | ApiError::InvalidUpload { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Storage { .. } | ApiError::Delivery { .. } | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let errors = match self {
            ApiError::InvalidRecord { errors, .. } => errors.clone(),
            _ => Vec::new(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            message: self.to_string(),
            errors,
        })
    }
}
