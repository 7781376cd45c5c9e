//! Domain models for quotation-costing.

mod adjustment;
mod breakdown;
mod line_item;
mod quotation;

pub use adjustment::{AdjustmentField, InstallationAdjustments, SupplyAdjustments};
pub use breakdown::{InstallationBreakdown, LineItemCosting, SupplyBreakdown};
pub use line_item::{AdjustmentsPatch, BomItem, LineItem, LineItemPatch};
pub use quotation::{
    FinalCosting, FinalCostingLine, MarginParams, QuotationSnapshot, QuotationTotals,
    SnapshotLine,
};
