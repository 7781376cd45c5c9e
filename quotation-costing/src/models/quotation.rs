//! Quotation-level parameters, totals and the views built from them.

use super::breakdown::LineItemCosting;
use super::line_item::LineItem;
use crate::utils::numeric::{self, lenient};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Margin and tax percentages applied once per quotation, not per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginParams {
    #[serde(default = "default_supply_margin", deserialize_with = "lenient")]
    pub supply_margin_percent: Decimal,
    #[serde(default = "default_installation_margin", deserialize_with = "lenient")]
    pub installation_margin_percent: Decimal,
    #[serde(default = "default_gst_rate", deserialize_with = "lenient")]
    pub gst_rate_percent: Decimal,
}

fn default_supply_margin() -> Decimal {
    Decimal::from(15)
}

fn default_installation_margin() -> Decimal {
    Decimal::from(20)
}

fn default_gst_rate() -> Decimal {
    Decimal::from(18)
}

impl Default for MarginParams {
    fn default() -> Self {
        Self {
            supply_margin_percent: default_supply_margin(),
            installation_margin_percent: default_installation_margin(),
            gst_rate_percent: default_gst_rate(),
        }
    }
}

impl MarginParams {
    /// Copy with negative percentages replaced by zero. Margins above 100%
    /// are legitimate and kept.
    pub fn sanitized(&self) -> Self {
        Self {
            supply_margin_percent: numeric::non_negative(self.supply_margin_percent),
            installation_margin_percent: numeric::non_negative(self.installation_margin_percent),
            gst_rate_percent: numeric::non_negative(self.gst_rate_percent),
        }
    }
}

/// Aggregated figures for a quotation. Recomputed on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotationTotals {
    pub total_supply_own_cost: Decimal,
    pub total_installation_own_cost: Decimal,
    pub supply_margin_percent: Decimal,
    pub installation_margin_percent: Decimal,
    pub supply_selling_amount: Decimal,
    pub installation_selling_amount: Decimal,
    pub total_selling_amount: Decimal,
    pub gst_rate_percent: Decimal,
    pub gst_amount: Decimal,
    pub grand_total: Decimal,
}

/// Customer-facing "Final Costing" view, rounded to whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalCosting {
    pub lines: Vec<FinalCostingLine>,
    pub total_supply_own_cost: Decimal,
    pub total_installation_own_cost: Decimal,
    pub supply_selling_amount: Decimal,
    pub installation_selling_amount: Decimal,
    pub total_selling_amount: Decimal,
    pub gst_rate_percent: Decimal,
    pub gst_amount: Decimal,
    pub grand_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalCostingLine {
    pub line_item_id: Uuid,
    pub item_code: String,
    pub item_name: String,
    pub uom: String,
    pub quantity: Decimal,
    pub supply_unit_own_cost: Decimal,
    pub installation_unit_own_cost: Decimal,
    pub supply_own_amount: Decimal,
    pub installation_own_amount: Decimal,
}

/// Payload handed to the quotation-creation API on submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotationSnapshot {
    pub quotation_id: Uuid,
    pub lead_id: Option<String>,
    pub margin_params: MarginParams,
    pub line_items: Vec<SnapshotLine>,
    pub totals: QuotationTotals,
    pub computed_utc: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotLine {
    pub line_item: LineItem,
    pub costing: LineItemCosting,
}
