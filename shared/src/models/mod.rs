//! Domain models for the Farm Management Platform

mod crop;
mod harvest;
mod inputs;
mod machinery;
mod plot;

pub use crop::*;
pub use harvest::*;
pub use inputs::*;
pub use machinery::*;
pub use plot::*;

use crate::types::RecordId;

/// A stored record carrying a numeric id assigned by its collection
pub trait Identified {
    fn id(&self) -> RecordId;

    /// Returns the record with `id` stamped on it
    fn with_id(self, id: RecordId) -> Self;
}

/// Returns a new sequence ordered from the most recently created record to the oldest
///
/// Ids grow monotonically, so descending id order is creation order reversed.
pub fn newest_first<T: Identified + Clone>(records: &[T]) -> Vec<T> {
    let mut ordered = records.to_vec();
    ordered.sort_by(|a, b| b.id().cmp(&a.id()));
    ordered
}

/// Next id for a collection: `max(existing) + 1`, or 1 when empty
pub fn next_id<T: Identified>(records: &[T]) -> RecordId {
    records.iter().map(Identified::id).max().unwrap_or(0).max(0) + 1
}

macro_rules! impl_identified {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> RecordId {
                    self.id
                }

                fn with_id(mut self, id: RecordId) -> Self {
                    self.id = id;
                    self
                }
            }
        )*
    };
}

impl_identified!(
    Plot,
    HarvestLoad,
    Machine,
    MachineryUsage,
    FuelRefill,
    InputItem,
    InputApplication,
);
