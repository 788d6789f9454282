use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx answer. `message` is the service's own explanation when it
    /// sent one.
    #[error("users service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid response from users service: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }

    /// Text suitable for showing next to a form.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}
