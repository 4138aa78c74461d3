use thiserror::Error;

/// Failure talking to the Guard API (metadata or scan endpoints).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized (check api key)")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("rate limited")]
    RateLimited,

    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error("unexpected status: {status}: {body_snippet}")]
    HttpStatus { status: u16, body_snippet: String },

    #[error("transport error: {0}")]
    Transport(#[source] anyhow::Error),

    #[error("decode error: {0}")]
    Decode(#[source] anyhow::Error),
}

impl ApiError {
    /// Classifies a non-success status. Nothing in this workspace retries;
    /// callers only use this to pick a message.
    pub fn from_status(status: u16, body: &str) -> Self {
        let body_snippet: String = body.chars().take(200).collect();
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            429 => ApiError::RateLimited,
            400 | 422 => ApiError::BadRequest {
                message: body_snippet,
            },
            _ => ApiError::HttpStatus {
                status,
                body_snippet,
            },
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::RateLimited | ApiError::Transport(_) => true,
            ApiError::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
