//! Client-side session lifecycle for the users service.
//!
//! The access token lives only in memory; the refresh token is persisted in a
//! [`store::TokenStore`] under [`manager::REFRESH_TOKEN_KEY`] so it survives
//! restarts. [`manager::SessionManager`] owns both and drives login,
//! registration, silent refresh and logout.

pub mod error;
pub mod manager;
pub mod model;
pub mod store;

pub use error::SessionError;
pub use manager::{REFRESH_TOKEN_KEY, SessionManager};
pub use model::Session;
pub use store::{TokenStore, memory_store::MemoryTokenStore, sqlite_store::SQLiteTokenStore};
