//! UserDirectory
//!
//! Holds the last user list fetched from the service. Views read the cached
//! snapshot; `load_users` and `add_user` refresh it. Failures are logged and
//! leave the cache as it was.

use std::sync::Arc;

use adapters::{ApiError, UsersApi};
use corelib::{NewUser, User};
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};

pub struct UserDirectory<U: UsersApi + ?Sized> {
    api: Arc<U>,
    users: RwLock<Vec<User>>,
}

impl<U: UsersApi + ?Sized> UserDirectory<U> {
    /// Starts with an empty cache; nothing is fetched until `load_users`.
    pub fn new(api: Arc<U>) -> Self {
        Self {
            api,
            users: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the list and replace the cache.
    #[instrument(skip(self))]
    pub async fn try_load_users(&self) -> Result<usize, ApiError> {
        let fetched = self.api.list_users().await?;
        let count = fetched.len();

        *self.users.write().await = fetched;

        debug!(count, "user cache replaced");
        Ok(count)
    }

    /// Like [`try_load_users`](Self::try_load_users) but only logs failures.
    pub async fn load_users(&self) {
        if let Err(e) = self.try_load_users().await {
            error!(error = %e, "failed to load users");
        }
    }

    /// Submit a user, then reload the list. No reload if the submit fails.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn try_add_user(&self, user: &NewUser) -> Result<Option<User>, ApiError> {
        let created = self.api.add_user(user).await?;
        info!(username = %user.username, "user added");

        self.try_load_users().await?;
        Ok(created)
    }

    /// Like [`try_add_user`](Self::try_add_user) but only logs failures.
    pub async fn add_user(&self, user: NewUser) {
        if let Err(e) = self.try_add_user(&user).await {
            error!(error = %e, email = %user.email, "failed to add user");
        }
    }

    /// Snapshot of the cached list.
    pub async fn users(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}
