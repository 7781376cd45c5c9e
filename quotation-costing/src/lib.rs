//! Quotation costing engine.
//!
//! Turns bill-of-materials line items and their percentage adjustments into
//! own-cost, selling and GST-inclusive totals for a quotation. Everything here
//! is synchronous and free of I/O; fetching BOM rows and submitting the
//! resulting snapshot belong to the caller.

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use config::CostingConfig;
pub use models::{
    AdjustmentField, BomItem, FinalCosting, InstallationAdjustments, InstallationBreakdown,
    LineItem, LineItemCosting, LineItemPatch, MarginParams, QuotationSnapshot, QuotationTotals,
    SupplyAdjustments, SupplyBreakdown,
};
pub use services::{CostSide, CostingService, LineItemIssue, QuotationDraft, ValidationService};
