//! Advisory line item checks for the editing surface.
//!
//! Nothing here blocks the costing engine; callers decide whether to show the
//! issues, refuse a submit, or ignore them.

use crate::config::CostingConfig;
use crate::models::LineItem;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum LineItemIssue {
    ZeroQuantity { line_item_id: Uuid },
    QuantityAboveMaximum { line_item_id: Uuid, quantity: Decimal, max_quantity: u32 },
    NegativeQuantity { line_item_id: Uuid },
    NoRates { line_item_id: Uuid },
}

impl std::fmt::Display for LineItemIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineItemIssue::ZeroQuantity { line_item_id } => {
                write!(f, "Line item {} has zero quantity", line_item_id)
            }
            LineItemIssue::QuantityAboveMaximum {
                line_item_id,
                quantity,
                max_quantity,
            } => write!(
                f,
                "Line item {} quantity {} exceeds maximum {}",
                line_item_id, quantity, max_quantity
            ),
            LineItemIssue::NegativeQuantity { line_item_id } => {
                write!(f, "Line item {} has a negative quantity", line_item_id)
            }
            LineItemIssue::NoRates { line_item_id } => write!(
                f,
                "Line item {} has neither a supply nor an installation rate",
                line_item_id
            ),
        }
    }
}

pub struct ValidationService;

impl ValidationService {
    pub fn check_line_item(item: &LineItem, config: &CostingConfig) -> Vec<LineItemIssue> {
        let mut issues = Vec::new();
        let id = item.line_item_id;

        if item.quantity < Decimal::ZERO {
            issues.push(LineItemIssue::NegativeQuantity { line_item_id: id });
        } else if item.quantity.is_zero() {
            issues.push(LineItemIssue::ZeroQuantity { line_item_id: id });
        } else if item.quantity > Decimal::from(config.max_quantity) {
            issues.push(LineItemIssue::QuantityAboveMaximum {
                line_item_id: id,
                quantity: item.quantity,
                max_quantity: config.max_quantity,
            });
        }

        if item.basic_supply_rate <= Decimal::ZERO && item.basic_installation_rate <= Decimal::ZERO
        {
            issues.push(LineItemIssue::NoRates { line_item_id: id });
        }

        issues
    }

    pub fn check_all(items: &[LineItem], config: &CostingConfig) -> Vec<LineItemIssue> {
        items
            .iter()
            .flat_map(|item| Self::check_line_item(item, config))
            .collect()
    }
}
