use std::fmt;

use serde::{Deserialize, Serialize};

pub mod auth;

pub use auth::{Credentials, RefreshRequest, Registration, TokenPair};

/// A user record as listed by the users service.
///
/// Extra fields the service sends (`created_date`, `active`) are ignored.
#[derive(Debug, Clone, Deserialize, Serialize, Eq, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Deserialize, Serialize, Eq, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

/// JSON envelope the service answers with for errors, `/ping`, and
/// message-only successes.
#[derive(Debug, Clone, Deserialize, Serialize, Default, Eq, PartialEq)]
pub struct ApiMessage {
    #[serde(default)]
    pub status: Option<String>,
    pub message: String,
}

impl fmt::Display for ApiMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            Some(status) => write!(f, "{}: {}", status, self.message),
            None => f.write_str(&self.message),
        }
    }
}
