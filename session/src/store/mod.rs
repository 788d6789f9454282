pub mod memory_store;
pub mod sqlite_store;

/// String key/value storage that outlives the in-memory session, the way
/// browser local storage outlives a page.
#[async_trait::async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}
