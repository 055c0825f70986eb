//! Per-entity repositories over a key-value store
//!
//! Every operation reads the whole collection, works on it in memory and, for
//! writes, stores it back in one overwrite.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use shared::{
    default_crop_prices, default_plots, next_id, CropPrice, FuelRefill, HarvestLoad, Identified,
    InputApplication, InputItem, Machine, MachineryUsage, Plot, RecordId,
};

use crate::error::{AppError, AppResult};
use crate::storage::{keys, KeyValueStore};

/// A record type persisted as its own collection
pub trait Entity: Identified + Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Storage key of the collection
    const COLLECTION: &'static str;

    /// Human-readable name used in error messages
    const LABEL: &'static str;

    /// Records returned when nothing has been persisted under the key yet
    fn seed() -> Vec<Self> {
        Vec::new()
    }
}

impl Entity for Machine {
    const COLLECTION: &'static str = keys::MACHINES;
    const LABEL: &'static str = "Machine";
}

impl Entity for Plot {
    const COLLECTION: &'static str = keys::PLOTS;
    const LABEL: &'static str = "Plot";

    fn seed() -> Vec<Self> {
        default_plots()
    }
}

impl Entity for MachineryUsage {
    const COLLECTION: &'static str = keys::USAGE;
    const LABEL: &'static str = "Machinery usage";
}

impl Entity for FuelRefill {
    const COLLECTION: &'static str = keys::FUEL;
    const LABEL: &'static str = "Fuel refill";
}

impl Entity for InputItem {
    const COLLECTION: &'static str = keys::INPUTS;
    const LABEL: &'static str = "Input item";
}

impl Entity for InputApplication {
    const COLLECTION: &'static str = keys::APPLICATIONS;
    const LABEL: &'static str = "Input application";
}

impl Entity for HarvestLoad {
    const COLLECTION: &'static str = keys::PRODUCTION;
    const LABEL: &'static str = "Harvest load";
}

/// Repository of one id-keyed collection
pub struct Collection<T> {
    store: Arc<dyn KeyValueStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Collection<T> {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// All records, or the seed collection when nothing is stored yet
    pub async fn list(&self) -> AppResult<Vec<T>> {
        match self.store.get(T::COLLECTION).await? {
            Some(document) => Ok(serde_json::from_value(document)?),
            None => Ok(T::seed()),
        }
    }

    /// Overwrite the whole collection
    pub async fn save_all(&self, records: &[T]) -> AppResult<()> {
        let document = serde_json::to_value(records)?;
        self.store.set(T::COLLECTION, document).await
    }

    pub async fn find(&self, id: RecordId) -> AppResult<Option<T>> {
        Ok(self.list().await?.into_iter().find(|record| record.id() == id))
    }

    /// Like [`Collection::find`] but a missing record is an error
    pub async fn get(&self, id: RecordId) -> AppResult<T> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {}", T::LABEL, id)))
    }

    /// Replace the record at `id`, or append `record` under a fresh id
    ///
    /// Replacing an id that is not in the collection is rejected with
    /// `NotFound` rather than creating it.
    pub async fn upsert(&self, record: T, id: Option<RecordId>) -> AppResult<T> {
        let mut records = self.list().await?;

        let saved = match id {
            Some(id) => {
                let slot = records
                    .iter_mut()
                    .find(|existing| existing.id() == id)
                    .ok_or_else(|| AppError::NotFound(format!("{} {}", T::LABEL, id)))?;
                *slot = record.with_id(id);
                slot.clone()
            }
            None => {
                let saved = record.with_id(next_id(&records));
                records.push(saved.clone());
                saved
            }
        };

        self.save_all(&records).await?;
        tracing::debug!("Saved {} {}", T::LABEL, saved.id());
        Ok(saved)
    }

    /// Remove the record with `id`; absent ids are a no-op and nothing cascades
    pub async fn delete_by_id(&self, id: RecordId) -> AppResult<()> {
        let records: Vec<T> = self
            .list()
            .await?
            .into_iter()
            .filter(|record| record.id() != id)
            .collect();

        self.save_all(&records).await
    }
}

/// Repository of crop prices, keyed by crop type instead of a numeric id
#[derive(Clone)]
pub struct CropPriceRepository {
    store: Arc<dyn KeyValueStore>,
}

impl CropPriceRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// All prices, or the default price list when nothing is stored yet
    pub async fn list(&self) -> AppResult<Vec<CropPrice>> {
        match self.store.get(keys::PRICES).await? {
            Some(document) => Ok(serde_json::from_value(document)?),
            None => Ok(default_crop_prices()),
        }
    }

    /// Replace the entry with the same crop type, or append a new one
    pub async fn upsert(&self, price: CropPrice) -> AppResult<CropPrice> {
        let mut prices = self.list().await?;

        match prices
            .iter_mut()
            .find(|existing| existing.crop_type == price.crop_type)
        {
            Some(existing) => *existing = price.clone(),
            None => prices.push(price.clone()),
        }

        self.store
            .set(keys::PRICES, serde_json::to_value(&prices)?)
            .await?;
        Ok(price)
    }
}
