use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::TokenStore;

/// Process-local store. Values are lost when the process exits.
#[derive(Default)]
pub struct MemoryTokenStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.map.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.map.lock().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.map.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_overwrites_and_remove_is_idempotent() -> anyhow::Result<()> {
        let store = MemoryTokenStore::new();

        store.set("refreshToken", "a").await?;
        store.set("refreshToken", "b").await?;
        assert_eq!(store.get("refreshToken").await?.as_deref(), Some("b"));

        store.remove("refreshToken").await?;
        store.remove("refreshToken").await?;
        assert_eq!(store.get("refreshToken").await?, None);

        Ok(())
    }
}
