//! Common fixtures for quotation-costing integration tests.

#![allow(dead_code)]

use quotation_costing::{BomItem, LineItem, MarginParams, SupplyAdjustments};
use rust_decimal::Decimal;

/// BOM row with only the numeric fields that matter for costing.
pub fn bom(code: &str, supply_rate: Decimal, installation_rate: Decimal, quantity: Decimal) -> BomItem {
    BomItem {
        bom_line_id: Some(format!("BOM-{}", code)),
        item_code: code.to_string(),
        item_name: format!("{} test item", code),
        uom: "nos".to_string(),
        basic_supply_rate: supply_rate,
        basic_installation_rate: installation_rate,
        quantity,
    }
}

pub fn supply_item(supply_rate: Decimal, quantity: Decimal) -> LineItem {
    LineItem::from_bom(bom("SUP", supply_rate, Decimal::ZERO, quantity))
}

pub fn supply_item_with(
    supply_rate: Decimal,
    quantity: Decimal,
    adjustments: SupplyAdjustments,
) -> LineItem {
    let mut item = supply_item(supply_rate, quantity);
    item.supply_adjustments = adjustments;
    item
}

/// Margin params with every percentage set explicitly.
pub fn params(supply_margin: Decimal, installation_margin: Decimal, gst: Decimal) -> MarginParams {
    MarginParams {
        supply_margin_percent: supply_margin,
        installation_margin_percent: installation_margin,
        gst_rate_percent: gst,
    }
}
