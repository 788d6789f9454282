use std::sync::Arc;

use adapters::{ApiError, AuthApi, HealthApi, UsersApi, UsersServiceClient};
use corelib::ApiMessage;
use directory::UserDirectory;
use session::{MemoryTokenStore, SQLiteTokenStore, SessionManager, TokenStore};
use tracing::info;

use crate::config::AppConfig;

/// Root of the client: one session and one user directory, created empty at
/// start and handed to commands by reference.
pub struct App {
    pub session: SessionManager<dyn AuthApi, dyn TokenStore>,
    pub directory: UserDirectory<dyn UsersApi>,
    health: Arc<dyn HealthApi>,
}

impl App {
    pub async fn new(cfg: &AppConfig) -> anyhow::Result<Self> {
        let client = Arc::new(UsersServiceClient::new(
            cfg.users_service_url.clone(),
            cfg.http_timeout,
        )?);

        let store: Arc<dyn TokenStore> = if cfg.ephemeral {
            Arc::new(MemoryTokenStore::new())
        } else {
            Arc::new(SQLiteTokenStore::new(&cfg.token_store_url).await?)
        };

        info!(
            service = %client.base_url(),
            ephemeral = cfg.ephemeral,
            "client initialized"
        );

        Ok(Self::from_parts(client.clone(), client.clone(), client, store))
    }

    pub fn from_parts(
        auth: Arc<dyn AuthApi>,
        users: Arc<dyn UsersApi>,
        health: Arc<dyn HealthApi>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            session: SessionManager::new(auth, store),
            directory: UserDirectory::new(users),
            health,
        }
    }

    pub async fn ping(&self) -> Result<ApiMessage, ApiError> {
        self.health.ping().await
    }
}
