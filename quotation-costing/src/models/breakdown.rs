//! Per-item cost breakdowns. Always derived, never stored on the line item.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Supply-side pipeline for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SupplyBreakdown {
    pub basic_supply_rate: Decimal,
    pub discount_amount: Decimal,
    pub discounted_base_supply_rate: Decimal,
    pub wastage_amount: Decimal,
    pub transportation_amount: Decimal,
    pub contingency_amount: Decimal,
    pub miscellaneous_amount: Decimal,
    pub outstation_amount: Decimal,
    pub office_overhead_amount: Decimal,
    pub total_supply_cost: Decimal,
    pub total_supply_own_cost: Decimal,
    /// Based on the discounted base rate. Reported on its own, not added to
    /// the own cost.
    pub po_variance_amount: Decimal,
    pub final_supply_amount: Decimal,
}

/// Installation-side pipeline for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstallationBreakdown {
    pub basic_installation_rate: Decimal,
    pub wastage_amount: Decimal,
    pub transportation_amount: Decimal,
    pub contingency_amount: Decimal,
    pub miscellaneous_amount: Decimal,
    pub outstation_amount: Decimal,
    pub office_overhead_amount: Decimal,
    pub total_installation_cost: Decimal,
    pub total_installation_own_cost: Decimal,
    /// Based on `total_installation_cost`, unlike the supply side.
    pub po_variance_amount: Decimal,
    pub final_installation_amount: Decimal,
}

/// Both pipelines for one line item, scaled by quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItemCosting {
    pub line_item_id: Uuid,
    pub quantity: Decimal,
    pub supply: SupplyBreakdown,
    pub installation: InstallationBreakdown,
    pub supply_own_amount: Decimal,
    pub installation_own_amount: Decimal,
}
