use axum::http::StatusCode;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    Candle,
    Balloon,
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Candle => f.write_str("candle"),
            Item::Balloon => f.write_str("balloon"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CelebrationError {
    InvalidIndex { item: Item, index: usize, total: usize },
    AlreadyCelebrating,
}

impl fmt::Display for CelebrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CelebrationError::InvalidIndex { item, index, total } => {
                write!(f, "{item} index {index} is outside 0..{total}")
            }
            CelebrationError::AlreadyCelebrating => f.write_str("celebration already started"),
        }
    }
}

impl std::error::Error for CelebrationError {}

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

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: message.into(),
        }
    }
}

impl From<CelebrationError> for AppError {
    fn from(err: CelebrationError) -> Self {
        match err {
            CelebrationError::InvalidIndex { .. } => Self::bad_request(err.to_string()),
            CelebrationError::AlreadyCelebrating => Self::conflict(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
