//! Agrochemical inventory and application service
//!
//! Applications draw down inventory: recording one decrements the stock of
//! every input it uses, deleting one gives the stock back, and editing one
//! gives back the old quantities before drawing the new ones. A write that
//! would leave any input below zero is refused before anything is stored.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    application_item_cost, application_total, validate_application_quantity,
    validate_non_negative, ApplicationItem, InputApplication, InputItem, Machine, Plot, RecordId,
    Unit,
};
use validator::Validate;

use super::{check_field, check_limit};
use crate::error::{AppError, AppResult};
use crate::repository::Collection;
use crate::storage::KeyValueStore;

#[derive(Clone)]
pub struct InputService {
    items: Collection<InputItem>,
    applications: Collection<InputApplication>,
    plots: Collection<Plot>,
    machines: Collection<Machine>,
}

/// Input for creating or replacing an inventory item
#[derive(Debug, Deserialize, Validate)]
pub struct InputItemInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub unit: Unit,
    pub price_per_unit: Decimal,
    #[serde(default)]
    pub stock: Decimal,
}

/// One line of an application request
#[derive(Debug, Deserialize, Serialize)]
pub struct ApplicationLineInput {
    pub input_id: RecordId,
    pub quantity: Decimal,
}

/// Input for recording or replacing an application
#[derive(Debug, Deserialize, Validate)]
pub struct ApplicationInput {
    pub date: NaiveDate,
    pub plot_id: RecordId,
    pub machine_id: RecordId,
    #[validate(length(min = 1))]
    pub items: Vec<ApplicationLineInput>,
}

impl InputService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            items: Collection::new(Arc::clone(&store)),
            applications: Collection::new(Arc::clone(&store)),
            plots: Collection::new(Arc::clone(&store)),
            machines: Collection::new(store),
        }
    }

    // ------------------------------------------------------------------------
    // Inventory
    // ------------------------------------------------------------------------

    pub async fn list_items(&self) -> AppResult<Vec<InputItem>> {
        self.items.list().await
    }

    /// Items whose stock is below the reorder threshold
    pub async fn low_stock_items(&self) -> AppResult<Vec<InputItem>> {
        let mut items = self.items.list().await?;
        items.retain(InputItem::is_low_stock);
        Ok(items)
    }

    pub async fn save_item(&self, input: InputItemInput, id: Option<RecordId>) -> AppResult<InputItem> {
        input.validate()?;
        check_field(
            "price_per_unit",
            validate_non_negative(input.price_per_unit),
            "O preço não pode ser negativo",
        )?;
        check_limit("price_per_unit", input.price_per_unit)?;
        check_field(
            "stock",
            validate_non_negative(input.stock),
            "O estoque não pode ser negativo",
        )?;
        check_limit("stock", input.stock)?;

        let item = InputItem {
            id: 0,
            name: input.name.trim().to_string(),
            unit: input.unit,
            price_per_unit: input.price_per_unit,
            stock: input.stock,
        };
        let saved = self.items.upsert(item, id).await?;

        tracing::info!("Saved input {} ({} {} in stock)", saved.name, saved.stock, saved.unit);
        Ok(saved)
    }

    /// Delete an inventory item; applications keep their snapshot of it
    pub async fn delete_item(&self, id: RecordId) -> AppResult<()> {
        self.items.delete_by_id(id).await?;
        tracing::info!("Deleted input item {}", id);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Applications
    // ------------------------------------------------------------------------

    pub async fn list_applications(&self) -> AppResult<Vec<InputApplication>> {
        self.applications.list().await
    }

    /// Record an application, or replace the one at `id`
    ///
    /// Each line captures the input's current name, unit and price. Stock is
    /// drawn down by the line quantities. The two collections are written one
    /// after the other, inventory first: if the application write then fails
    /// the stock stays drawn down without a matching record.
    pub async fn save_application(
        &self,
        input: ApplicationInput,
        id: Option<RecordId>,
    ) -> AppResult<InputApplication> {
        input.validate()?;
        for line in &input.items {
            check_field(
                "quantity",
                validate_application_quantity(line.quantity),
                "A quantidade deve ser maior que zero",
            )?;
            check_limit("quantity", line.quantity)?;
        }

        let plot = self.plots.get(input.plot_id).await?;
        let machine = self.machines.get(input.machine_id).await?;
        let mut inventory = self.items.list().await?;

        if let Some(id) = id {
            let previous = self.applications.get(id).await?;
            restore_stock(&mut inventory, &previous);
        }

        let mut lines = Vec::with_capacity(input.items.len());
        for line in &input.items {
            let item = inventory
                .iter_mut()
                .find(|item| item.id == line.input_id)
                .ok_or_else(|| AppError::NotFound(format!("Input item {}", line.input_id)))?;

            if item.stock < line.quantity {
                return Err(AppError::InsufficientInventory(format!(
                    "{} has {} {} in stock, {} requested",
                    item.name, item.stock, item.unit, line.quantity
                )));
            }
            item.stock = item.stock.saturating_sub(line.quantity);

            lines.push(ApplicationItem {
                input_id: item.id,
                input_name: item.name.clone(),
                quantity: line.quantity,
                unit: item.unit,
                total_cost: application_item_cost(line.quantity, item.price_per_unit),
            });
        }

        let application = InputApplication {
            id: 0,
            date: input.date,
            plot_id: plot.id,
            plot_name: plot.name,
            machine_id: machine.id,
            machine_name: machine.name,
            total_application_cost: application_total(&lines),
            items: lines,
        };

        self.items.save_all(&inventory).await?;
        let saved = self.applications.upsert(application, id).await?;

        tracing::info!(
            "Recorded application {} on {} costing {}",
            saved.id,
            saved.plot_name,
            saved.total_application_cost
        );
        Ok(saved)
    }

    /// Delete an application and give its quantities back to inventory
    ///
    /// The application is removed before the stock is restored, so a failed
    /// inventory write leaves stock low rather than counted twice.
    pub async fn delete_application(&self, id: RecordId) -> AppResult<()> {
        let Some(application) = self.applications.find(id).await? else {
            return Ok(());
        };

        let mut inventory = self.items.list().await?;
        restore_stock(&mut inventory, &application);

        self.applications.delete_by_id(id).await?;
        self.items.save_all(&inventory).await?;

        tracing::info!("Deleted application {} and restored its stock", id);
        Ok(())
    }
}

/// Add an application's quantities back onto the inventory
fn restore_stock(inventory: &mut [InputItem], application: &InputApplication) {
    for line in &application.items {
        match inventory.iter_mut().find(|item| item.id == line.input_id) {
            Some(item) => item.stock = item.stock.saturating_add(line.quantity),
            None => tracing::warn!(
                "Input {} ({}) no longer exists; {} {} not restored",
                line.input_id,
                line.input_name,
                line.quantity,
                line.unit
            ),
        }
    }
}
