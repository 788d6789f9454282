use std::fmt;

use serde::{Deserialize, Serialize};

/// Body of `POST /auth/register`.
#[derive(Clone, Deserialize, Serialize, Eq, PartialEq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/login`.
#[derive(Clone, Deserialize, Serialize, Eq, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/refresh`.
#[derive(Clone, Deserialize, Serialize, Eq, PartialEq)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Tokens returned by login and refresh.
#[derive(Clone, Deserialize, Serialize, Eq, PartialEq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

// Secrets stay out of Debug output so they never reach the logs.

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for RefreshRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshRequest")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}
