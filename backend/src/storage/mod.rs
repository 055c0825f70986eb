//! Key-value persistence of whole collections
//!
//! A store holds one JSON document per key. Reads return a full snapshot of
//! the collection and writes overwrite it entirely; concurrent writers race
//! and the last one wins.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppResult;

/// Keys under which each collection is persisted
pub mod keys {
    pub const MACHINES: &str = "agro_machines";
    pub const PLOTS: &str = "agro_plots";
    pub const USAGE: &str = "agro_usage";
    pub const FUEL: &str = "agro_fuel";
    pub const INPUTS: &str = "agro_inputs";
    pub const APPLICATIONS: &str = "agro_apps";
    pub const PRODUCTION: &str = "agro_production";
    pub const PRICES: &str = "agro_crop_prices";
}

/// Backing store for collections
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the document stored under `key`, if any
    async fn get(&self, key: &str) -> AppResult<Option<Value>>;

    /// Replace the document stored under `key`
    async fn set(&self, key: &str, value: Value) -> AppResult<()>;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;

    /// Short name reported by the health endpoint
    fn backend_name(&self) -> &'static str;
}
