//! Customer-facing "Final Costing" view.
//!
//! This is the only place values are rounded. The draft and the submission
//! snapshot keep full precision.

use crate::models::{
    FinalCosting, FinalCostingLine, LineItem, LineItemCosting, MarginParams, QuotationTotals,
};
use crate::services::CostingService;
use crate::utils::numeric::round_currency;

pub fn final_costing(items: &[LineItem], params: &MarginParams) -> FinalCosting {
    let costings: Vec<LineItemCosting> =
        items.iter().map(CostingService::line_item_costing).collect();
    let totals = CostingService::totals_from_costings(&costings, params);

    let lines = items
        .iter()
        .zip(costings.iter())
        .map(|(item, costing)| FinalCostingLine {
            line_item_id: item.line_item_id,
            item_code: item.item_code.clone(),
            item_name: item.item_name.clone(),
            uom: item.uom.clone(),
            quantity: costing.quantity,
            supply_unit_own_cost: round_currency(costing.supply.total_supply_own_cost),
            installation_unit_own_cost: round_currency(
                costing.installation.total_installation_own_cost,
            ),
            supply_own_amount: round_currency(costing.supply_own_amount),
            installation_own_amount: round_currency(costing.installation_own_amount),
        })
        .collect();

    rounded(lines, &totals)
}

fn rounded(lines: Vec<FinalCostingLine>, totals: &QuotationTotals) -> FinalCosting {
    FinalCosting {
        lines,
        total_supply_own_cost: round_currency(totals.total_supply_own_cost),
        total_installation_own_cost: round_currency(totals.total_installation_own_cost),
        supply_selling_amount: round_currency(totals.supply_selling_amount),
        installation_selling_amount: round_currency(totals.installation_selling_amount),
        total_selling_amount: round_currency(totals.total_selling_amount),
        gst_rate_percent: totals.gst_rate_percent,
        gst_amount: round_currency(totals.gst_amount),
        grand_total: round_currency(totals.grand_total),
    }
}
