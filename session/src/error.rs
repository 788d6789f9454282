use adapters::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("token store failure: {0:#}")]
    Store(#[from] anyhow::Error),

    #[error("no refresh token stored")]
    NoRefreshToken,
}

impl SessionError {
    /// Text suitable for showing next to a form.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}
