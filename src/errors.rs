use axum::http::StatusCode;
use thiserror::Error;

/// Input rejected at the boundary before it reaches the streak engine.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("habit name must not be empty")]
    EmptyName,

    #[error("habit name must be at most {max} characters")]
    NameTooLong { max: usize },

    #[error("target days must be between {min} and {max}, got {value}")]
    TargetOutOfRange { value: i64, min: u32, max: u32 },

    #[error("invalid day key '{0}', expected YYYY-MM-DD")]
    InvalidDayKey(String),

    #[error("weight must be between {min} and {max} kg")]
    WeightOutOfRange { min: f64, max: f64 },

    #[error("cannot log weight for a future day: {0}")]
    FutureDay(String),

    #[error("window must be between 1 and {max} days, got {value}")]
    WindowOutOfRange { value: usize, max: usize },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
