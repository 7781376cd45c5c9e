//! Cost breakdown, margin and GST calculation.
//!
//! All inputs pass through the lenient sanitizers first, so nothing in here
//! can fail: negative rates or quantities count as zero, adjustment
//! percentages outside `[0, 100]` count as zero.

use crate::models::{
    AdjustmentField, InstallationAdjustments, InstallationBreakdown, LineItem, LineItemCosting, MarginParams,
    QuotationTotals, SupplyAdjustments, SupplyBreakdown,
};
use crate::utils::numeric::{self, percent_of, with_markup};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

pub struct CostingService;

impl CostingService {
    /// Supply pipeline for one unit at `basic_supply_rate`.
    pub fn supply_breakdown(
        basic_supply_rate: Decimal,
        adjustments: &SupplyAdjustments,
    ) -> SupplyBreakdown {
        let rate = numeric::non_negative(basic_supply_rate);
        let adj = adjustments.sanitized();

        let discounted = rate.saturating_mul(Decimal::ONE - adj.discount / Decimal::ONE_HUNDRED);

        let amounts =
            AdjustmentField::COMPONENTS.map(|field| percent_of(discounted, adj.get(field)));
        let total_supply_cost = sum(&amounts);
        let [
            wastage_amount,
            transportation_amount,
            contingency_amount,
            miscellaneous_amount,
            outstation_amount,
            office_overhead_amount,
        ] = amounts;
        let total_supply_own_cost = discounted.saturating_add(total_supply_cost);

        // PO variance on the supply side is taken on the discounted base rate,
        // not on the own cost, and stays out of the own cost.
        let po_variance_amount = percent_of(discounted, adj.po_variance);

        SupplyBreakdown {
            basic_supply_rate: rate,
            discount_amount: rate - discounted,
            discounted_base_supply_rate: discounted,
            wastage_amount,
            transportation_amount,
            contingency_amount,
            miscellaneous_amount,
            outstation_amount,
            office_overhead_amount,
            total_supply_cost,
            total_supply_own_cost,
            po_variance_amount,
            final_supply_amount: po_variance_amount,
        }
    }

    /// Installation pipeline for one unit at `basic_installation_rate`.
    pub fn installation_breakdown(
        basic_installation_rate: Decimal,
        adjustments: &InstallationAdjustments,
    ) -> InstallationBreakdown {
        let rate = numeric::non_negative(basic_installation_rate);
        let adj = adjustments.sanitized();

        let amounts = AdjustmentField::COMPONENTS
            .map(|field| percent_of(rate, adj.get(field).unwrap_or_default()));
        let total_installation_cost = sum(&amounts);
        let [
            wastage_amount,
            transportation_amount,
            contingency_amount,
            miscellaneous_amount,
            outstation_amount,
            office_overhead_amount,
        ] = amounts;
        let total_installation_own_cost = rate.saturating_add(total_installation_cost);

        // Installation PO variance is taken on the summed adjustments, not on
        // the base rate. Existing quotations were priced this way.
        let po_variance_amount = percent_of(total_installation_cost, adj.po_variance);

        InstallationBreakdown {
            basic_installation_rate: rate,
            wastage_amount,
            transportation_amount,
            contingency_amount,
            miscellaneous_amount,
            outstation_amount,
            office_overhead_amount,
            total_installation_cost,
            total_installation_own_cost,
            po_variance_amount,
            final_installation_amount: po_variance_amount,
        }
    }

    /// Both pipelines for one line item, scaled by its quantity.
    ///
    /// The supply own amount is `quantity × total_supply_own_cost`. One
    /// editing surface of the legacy front-end instead multiplied the
    /// quantity by whichever "supply rate" it last wrote (sometimes the raw
    /// basic rate); that variant is not reproduced here.
    pub fn line_item_costing(item: &LineItem) -> LineItemCosting {
        let quantity = numeric::non_negative(item.quantity);
        let supply = Self::supply_breakdown(item.basic_supply_rate, &item.supply_adjustments);
        let installation = Self::installation_breakdown(
            item.basic_installation_rate,
            &item.installation_adjustments,
        );

        LineItemCosting {
            line_item_id: item.line_item_id,
            quantity,
            supply_own_amount: quantity.saturating_mul(supply.total_supply_own_cost),
            installation_own_amount: quantity
                .saturating_mul(installation.total_installation_own_cost),
            supply,
            installation,
        }
    }

    /// Aggregate line items into quotation totals.
    #[instrument(skip_all, fields(line_items = items.len()))]
    pub fn compute_totals(items: &[LineItem], params: &MarginParams) -> QuotationTotals {
        let costings: Vec<LineItemCosting> = items.iter().map(Self::line_item_costing).collect();
        Self::totals_from_costings(&costings, params)
    }

    /// Aggregate already computed per-item costings.
    pub fn totals_from_costings(
        costings: &[LineItemCosting],
        params: &MarginParams,
    ) -> QuotationTotals {
        let supply_own: Vec<Decimal> = costings.iter().map(|c| c.supply_own_amount).collect();
        let installation_own: Vec<Decimal> =
            costings.iter().map(|c| c.installation_own_amount).collect();

        let totals = Self::apply_margins(sum(&supply_own), sum(&installation_own), params);

        debug!(
            total_supply_own_cost = %totals.total_supply_own_cost,
            total_installation_own_cost = %totals.total_installation_own_cost,
            grand_total = %totals.grand_total,
            "Quotation totals computed"
        );

        totals
    }

    /// Margin and GST on aggregated own costs.
    pub fn apply_margins(
        total_supply_own_cost: Decimal,
        total_installation_own_cost: Decimal,
        params: &MarginParams,
    ) -> QuotationTotals {
        let params = params.sanitized();
        let total_supply_own_cost = numeric::non_negative(total_supply_own_cost);
        let total_installation_own_cost = numeric::non_negative(total_installation_own_cost);

        let supply_selling_amount =
            with_markup(total_supply_own_cost, params.supply_margin_percent);
        let installation_selling_amount =
            with_markup(total_installation_own_cost, params.installation_margin_percent);
        let total_selling_amount = supply_selling_amount.saturating_add(installation_selling_amount);
        let gst_amount = percent_of(total_selling_amount, params.gst_rate_percent);

        QuotationTotals {
            total_supply_own_cost,
            total_installation_own_cost,
            supply_margin_percent: params.supply_margin_percent,
            installation_margin_percent: params.installation_margin_percent,
            supply_selling_amount,
            installation_selling_amount,
            total_selling_amount,
            gst_rate_percent: params.gst_rate_percent,
            gst_amount,
            grand_total: total_selling_amount.saturating_add(gst_amount),
        }
    }
}

fn sum(values: &[Decimal]) -> Decimal {
    values
        .iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v))
}
