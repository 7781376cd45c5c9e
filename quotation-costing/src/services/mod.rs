mod costing;
mod draft;
pub mod final_costing;
mod validation;

pub use costing::CostingService;
pub use draft::{CostSide, QuotationDraft};
pub use validation::{LineItemIssue, ValidationService};
