// src/error.rs
use thiserror::Error;

/// Failures at the backend boundary. Each kind maps to a different banner.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("request failed"))]
    Status { status: u16, message: Option<String> },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
