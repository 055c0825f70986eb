use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::KeyValueStore;
use crate::error::AppResult;

/// Process-local store used in development and tests
#[derive(Clone, Default)]
pub struct MemoryStore {
    documents: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.documents.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> AppResult<()> {
        self.documents.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = MemoryStore::new();
        assert!(store.get("agro_plots").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites_whole_document() {
        let store = MemoryStore::new();
        store.set("agro_fuel", json!([{"id": 1}, {"id": 2}])).await.unwrap();
        store.set("agro_fuel", json!([{"id": 3}])).await.unwrap();
        assert_eq!(store.get("agro_fuel").await.unwrap(), Some(json!([{"id": 3}])));
    }

    #[tokio::test]
    async fn test_clones_share_documents() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("agro_inputs", json!([])).await.unwrap();
        assert!(other.get("agro_inputs").await.unwrap().is_some());
    }
}
