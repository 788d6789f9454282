use std::sync::Arc;

use adapters::AuthApi;
use corelib::{Credentials, Registration};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::SessionError;
use crate::model::Session;
use crate::store::TokenStore;

/// Fixed storage key of the persisted refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Owns the in-memory access token and the persisted refresh token, and
/// talks to the auth endpoints to change them.
///
/// The session lock is never held across a network call, so overlapping
/// `login` / `refresh` calls are not de-duplicated: whichever completes last
/// writes the access token.
pub struct SessionManager<A: AuthApi + ?Sized, S: TokenStore + ?Sized> {
    session: Mutex<Session>,
    api: Arc<A>,
    store: Arc<S>,
}

impl<A: AuthApi + ?Sized, S: TokenStore + ?Sized> SessionManager<A, S> {
    /// Starts with an empty in-memory session. A refresh token left in
    /// `store` by a previous run is picked up lazily by `is_authenticated`.
    pub fn new(api: Arc<A>, store: Arc<S>) -> Self {
        Self {
            session: Mutex::new(Session::default()),
            api,
            store,
        }
    }

    /// Exchange credentials for tokens. State is untouched on failure.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<(), SessionError> {
        let tokens = self.api.login(credentials).await.inspect_err(|e| {
            warn!(error = %e, "login failed");
        })?;

        self.store
            .set(REFRESH_TOKEN_KEY, &tokens.refresh_token)
            .await
            .inspect_err(|e| warn!(error = %e, "failed to persist refresh token"))?;

        self.session
            .lock()
            .await
            .set_access_token(tokens.access_token);

        info!("logged in");
        Ok(())
    }

    /// Register a new account. Does not log the user in.
    #[instrument(skip_all, fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<(), SessionError> {
        self.api.register(registration).await.inspect_err(|e| {
            warn!(error = %e, "registration failed");
        })?;

        info!("registered");
        Ok(())
    }

    /// Trade the stored refresh token for a fresh pair.
    ///
    /// A rejected refresh token is left in the store.
    #[instrument(skip_all)]
    pub async fn refresh(&self) -> Result<(), SessionError> {
        let Some(refresh_token) = self.store.get(REFRESH_TOKEN_KEY).await? else {
            debug!("no refresh token stored");
            return Err(SessionError::NoRefreshToken);
        };

        let tokens = self.api.refresh(&refresh_token).await?;

        self.store
            .set(REFRESH_TOKEN_KEY, &tokens.refresh_token)
            .await?;

        self.session
            .lock()
            .await
            .set_access_token(tokens.access_token);

        debug!("access token refreshed");
        Ok(())
    }

    /// Drop both tokens. No network call.
    ///
    /// The in-memory token is cleared even when the store fails.
    #[instrument(skip_all)]
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.session.lock().await.clear();

        self.store.remove(REFRESH_TOKEN_KEY).await.inspect_err(|e| {
            warn!(error = %e, "failed to remove refresh token");
        })?;

        info!("logged out");
        Ok(())
    }

    /// True if an access token is held; otherwise attempts a silent refresh
    /// and reports whether it worked. Failures are logged, not returned.
    #[instrument(skip_all)]
    pub async fn is_authenticated(&self) -> bool {
        if self.session.lock().await.has_access_token() {
            return true;
        }

        match self.refresh().await {
            Ok(()) => true,
            Err(SessionError::NoRefreshToken) => false,
            Err(e) => {
                warn!(error = %e, "silent refresh failed");
                false
            }
        }
    }

    pub async fn access_token(&self) -> Option<String> {
        self.session.lock().await.access_token().map(str::to_owned)
    }

    /// Whether a refresh token is persisted. Store errors count as absent.
    pub async fn has_refresh_token(&self) -> bool {
        match self.store.get(REFRESH_TOKEN_KEY).await {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!(error = %e, "failed to read refresh token");
                false
            }
        }
    }
}
