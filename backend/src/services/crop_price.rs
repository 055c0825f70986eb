//! Crop market price service

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{price_board, validate_non_negative, CropPrice};
use validator::Validate;

use super::{check_field, check_limit};
use crate::error::AppResult;
use crate::repository::CropPriceRepository;
use crate::storage::KeyValueStore;

#[derive(Clone)]
pub struct CropPriceService {
    prices: CropPriceRepository,
}

/// Input for setting the price of a crop
#[derive(Debug, Deserialize, Validate)]
pub struct CropPriceInput {
    #[validate(length(min = 1, max = 60))]
    pub crop_type: String,
    pub price_per_bag: Decimal,
}

impl CropPriceService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            prices: CropPriceRepository::new(store),
        }
    }

    pub async fn list_prices(&self) -> AppResult<Vec<CropPrice>> {
        self.prices.list().await
    }

    /// Set the price per bag of a crop type, adding the crop if it is new
    pub async fn save_price(&self, input: CropPriceInput) -> AppResult<CropPrice> {
        input.validate()?;
        check_field(
            "price_per_bag",
            validate_non_negative(input.price_per_bag),
            "O preço não pode ser negativo",
        )?;
        check_limit("price_per_bag", input.price_per_bag)?;

        let saved = self
            .prices
            .upsert(CropPrice::new(input.crop_type.trim(), input.price_per_bag))
            .await?;

        tracing::info!("Crop price for {} set to {}", saved.crop_type, saved.price_per_bag);
        Ok(saved)
    }

    /// The market crops with their current prices
    pub async fn price_board(&self) -> AppResult<Vec<CropPrice>> {
        Ok(price_board(&self.prices.list().await?))
    }
}
