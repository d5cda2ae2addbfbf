// src/services/error.rs
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    Config,
    Network,
    Status(u16),
    NotFound,
    Decode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        ApiError {
            kind,
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Config, message)
    }

    pub fn network_error(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn status_error(status: u16, message: impl Into<String>) -> Self {
        if status == 404 {
            Self::new(ApiErrorKind::NotFound, message)
        } else {
            Self::new(ApiErrorKind::Status(status), message)
        }
    }

    pub fn decode_error(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ApiError::status_error(status.as_u16(), err.to_string())
        } else if err.is_decode() {
            ApiError::decode_error(err.to_string())
        } else {
            ApiError::network_error(err.to_string())
        }
    }
}
