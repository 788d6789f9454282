pub mod client;
pub mod errors;

use async_trait::async_trait;
use corelib::{ApiMessage, Credentials, NewUser, Registration, TokenPair, User};

pub use client::UsersServiceClient;
pub use errors::ApiError;

/// Authentication endpoints of the users service (`/auth/*`).
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;

    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError>;

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError>;
}

/// User listing and creation (`/users`).
#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// Returns the created record when the service echoes one back, `None`
    /// when it only answers with a confirmation message.
    async fn add_user(&self, user: &NewUser) -> Result<Option<User>, ApiError>;
}

#[async_trait]
pub trait HealthApi: Send + Sync {
    async fn ping(&self) -> Result<ApiMessage, ApiError>;
}
