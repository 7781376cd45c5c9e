//! In-memory quotation draft.
//!
//! Holds the line items and margin parameters being edited and recomputes
//! every figure on demand through [`CostingService`]. Edits are applied in
//! call order; the last write to a field wins.

use crate::config::CostingConfig;
use crate::models::{
    AdjustmentField, BomItem, FinalCosting, LineItem, LineItemCosting, LineItemPatch,
    MarginParams, QuotationSnapshot, QuotationTotals, SnapshotLine,
};
use crate::services::final_costing::final_costing;
use crate::services::{CostingService, LineItemIssue, ValidationService};
use crate::utils::numeric;
use chrono::Utc;
use crm_core::error::AppError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Which half of a line item an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostSide {
    Supply,
    Installation,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuotationDraft {
    params: MarginParams,
    line_items: Vec<LineItem>,
}

impl QuotationDraft {
    pub fn new(params: MarginParams) -> Self {
        Self {
            params: params.sanitized(),
            line_items: Vec::new(),
        }
    }

    pub fn from_config(config: &CostingConfig) -> Self {
        Self::new(config.margin_params())
    }

    pub fn params(&self) -> &MarginParams {
        &self.params
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn line_item(&self, line_item_id: Uuid) -> Option<&LineItem> {
        self.line_items
            .iter()
            .find(|item| item.line_item_id == line_item_id)
    }

    fn line_item_mut(&mut self, line_item_id: Uuid) -> Result<&mut LineItem, AppError> {
        self.line_items
            .iter_mut()
            .find(|item| item.line_item_id == line_item_id)
            .ok_or_else(|| {
                AppError::NotFound(anyhow::anyhow!("Line item {} not found", line_item_id))
            })
    }

    /// Bind a BOM row to the draft and return the new line item's id.
    #[instrument(skip(self, bom), fields(item_code = %bom.item_code))]
    pub fn bind_bom_item(&mut self, bom: BomItem) -> Uuid {
        let mut item = LineItem::from_bom(bom);
        item.basic_supply_rate = numeric::non_negative(item.basic_supply_rate);
        item.basic_installation_rate = numeric::non_negative(item.basic_installation_rate);
        item.quantity = numeric::non_negative(item.quantity);

        let line_item_id = item.line_item_id;
        self.line_items.push(item);

        info!(line_item_id = %line_item_id, "Line item bound to draft");
        line_item_id
    }

    pub fn bind_bom_items<I>(&mut self, boms: I) -> Vec<Uuid>
    where
        I: IntoIterator<Item = BomItem>,
    {
        boms.into_iter().map(|bom| self.bind_bom_item(bom)).collect()
    }

    #[instrument(skip(self))]
    pub fn set_quantity(&mut self, line_item_id: Uuid, quantity: Decimal) -> Result<(), AppError> {
        let item = self.line_item_mut(line_item_id)?;
        item.quantity = numeric::non_negative(quantity);
        debug!(quantity = %item.quantity, "Quantity updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn set_supply_adjustment(
        &mut self,
        line_item_id: Uuid,
        field: AdjustmentField,
        value: Decimal,
    ) -> Result<(), AppError> {
        let item = self.line_item_mut(line_item_id)?;
        item.supply_adjustments.set(field, value);
        debug!(stored = %item.supply_adjustments.get(field), "Supply adjustment updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn set_installation_adjustment(
        &mut self,
        line_item_id: Uuid,
        field: AdjustmentField,
        value: Decimal,
    ) -> Result<(), AppError> {
        if !field.applies_to_installation() {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "{} does not apply to installation",
                field
            )));
        }
        let item = self.line_item_mut(line_item_id)?;
        item.installation_adjustments.set(field, value);
        debug!("Installation adjustment updated");
        Ok(())
    }

    /// Apply a raw field edit from the editing surface. The value is coerced
    /// leniently; only an unknown field name is rejected.
    pub fn edit_adjustment(
        &mut self,
        line_item_id: Uuid,
        side: CostSide,
        field_name: &str,
        raw_value: &Value,
    ) -> Result<(), AppError> {
        let field = AdjustmentField::from_string(field_name).ok_or_else(|| {
            AppError::BadRequest(anyhow::anyhow!("Unknown adjustment field: {}", field_name))
        })?;
        let value = numeric::coerce_value(raw_value);

        match side {
            CostSide::Supply => self.set_supply_adjustment(line_item_id, field, value),
            CostSide::Installation => self.set_installation_adjustment(line_item_id, field, value),
        }
    }

    /// Apply a partial update. Rejected as a whole, before any field is
    /// written, when it targets a missing item or carries a non-null
    /// installation discount.
    #[instrument(skip(self, patch))]
    pub fn apply_patch(&mut self, line_item_id: Uuid, patch: &LineItemPatch) -> Result<(), AppError> {
        if patch.installation.discount.is_some() {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "discount does not apply to installation"
            )));
        }

        let item = self.line_item_mut(line_item_id)?;
        if let Some(quantity) = patch.quantity {
            item.quantity = numeric::non_negative(quantity);
        }
        for (field, value) in patch.supply.entries() {
            item.supply_adjustments.set(field, value);
        }
        for (field, value) in patch.installation.entries() {
            item.installation_adjustments.set(field, value);
        }

        debug!("Patch applied");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn remove_line_item(&mut self, line_item_id: Uuid) -> Result<LineItem, AppError> {
        let index = self
            .line_items
            .iter()
            .position(|item| item.line_item_id == line_item_id)
            .ok_or_else(|| {
                AppError::NotFound(anyhow::anyhow!("Line item {} not found", line_item_id))
            })?;

        info!("Line item removed from draft");
        Ok(self.line_items.remove(index))
    }

    pub fn set_margin_params(&mut self, params: MarginParams) {
        self.params = params.sanitized();
        debug!(
            supply_margin = %self.params.supply_margin_percent,
            installation_margin = %self.params.installation_margin_percent,
            gst_rate = %self.params.gst_rate_percent,
            "Margin params updated"
        );
    }

    pub fn line_item_costing(&self, line_item_id: Uuid) -> Option<LineItemCosting> {
        self.line_item(line_item_id)
            .map(CostingService::line_item_costing)
    }

    pub fn costings(&self) -> Vec<LineItemCosting> {
        self.line_items
            .iter()
            .map(CostingService::line_item_costing)
            .collect()
    }

    pub fn totals(&self) -> QuotationTotals {
        CostingService::compute_totals(&self.line_items, &self.params)
    }

    pub fn final_costing(&self) -> FinalCosting {
        final_costing(&self.line_items, &self.params)
    }

    pub fn issues(&self, config: &CostingConfig) -> Vec<LineItemIssue> {
        ValidationService::check_all(&self.line_items, config)
    }

    /// Recompute everything for submission, at full precision.
    #[instrument(skip(self), fields(line_items = self.line_items.len()))]
    pub fn snapshot(&self, quotation_id: Uuid, lead_id: Option<String>) -> QuotationSnapshot {
        let costings = self.costings();
        let totals = CostingService::totals_from_costings(&costings, &self.params);

        let line_items = self
            .line_items
            .iter()
            .cloned()
            .zip(costings)
            .map(|(line_item, costing)| SnapshotLine { line_item, costing })
            .collect();

        info!(quotation_id = %quotation_id, grand_total = %totals.grand_total, "Quotation snapshot built");

        QuotationSnapshot {
            quotation_id,
            lead_id,
            margin_params: self.params,
            line_items,
            totals,
            computed_utc: Utc::now(),
        }
    }
}
