use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::error::AppResult;

/// Key-value persistence the trackers write through
///
/// Values are opaque strings; callers decide the encoding.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Reads the value stored under `key`, if any
    async fn load(&self, key: &str) -> AppResult<Option<String>>;

    /// Replaces the value stored under `key`
    async fn store(&self, key: &str, value: String) -> AppResult<()>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Process-local backend; contents are lost on restart
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl StorageBackend for InMemoryStorage {
    async fn load(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn store(&self, key: &str, value: String) -> AppResult<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}
