//! Costing pipeline integration tests: worked scenarios and invariants.

mod common;

use common::{bom, params, supply_item, supply_item_with};
use proptest::prelude::*;
use quotation_costing::utils::numeric::round_currency;
use quotation_costing::{
    AdjustmentField, CostingService, InstallationAdjustments, LineItem, MarginParams,
    SupplyAdjustments,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn scenario_plain_supply_item_with_quantity() {
    let item = supply_item(dec!(10000), dec!(2));
    let costing = CostingService::line_item_costing(&item);

    assert_eq!(costing.supply.total_supply_own_cost, dec!(10000));
    assert_eq!(costing.supply_own_amount, dec!(20000));
}

#[test]
fn scenario_discount_then_wastage() {
    let adj = SupplyAdjustments {
        discount: dec!(10),
        wastage: dec!(2),
        ..Default::default()
    };
    let breakdown = CostingService::supply_breakdown(dec!(10000), &adj);

    assert_eq!(breakdown.discounted_base_supply_rate, dec!(9000));
    assert_eq!(breakdown.wastage_amount, dec!(180));
    assert_eq!(breakdown.total_supply_cost, dec!(180));
    assert_eq!(breakdown.total_supply_own_cost, dec!(9180));
}

#[test]
fn scenario_installation_po_variance_uses_total_cost() {
    let adj = InstallationAdjustments {
        wastage: dec!(2),
        po_variance: dec!(10),
        ..Default::default()
    };
    let breakdown = CostingService::installation_breakdown(dec!(5000), &adj);

    assert_eq!(breakdown.total_installation_cost, dec!(100));
    assert_eq!(breakdown.po_variance_amount, dec!(10));
    assert_ne!(breakdown.po_variance_amount, dec!(500));
}

#[test]
fn scenario_quotation_aggregation_with_supply_margin() {
    let first = supply_item(dec!(10000), dec!(2));
    let second = supply_item_with(
        dec!(10000),
        dec!(1),
        SupplyAdjustments {
            discount: dec!(10),
            wastage: dec!(2),
            ..Default::default()
        },
    );

    let totals = CostingService::compute_totals(&[first, second], &MarginParams::default());

    assert_eq!(totals.total_supply_own_cost, dec!(29180));
    assert_eq!(round_currency(totals.supply_selling_amount), dec!(33557));
}

#[test]
fn scenario_gst_on_selling_amount() {
    let item = supply_item(dec!(50000), dec!(1));
    let totals = CostingService::compute_totals(&[item], &params(Decimal::ZERO, Decimal::ZERO, dec!(18)));

    assert_eq!(totals.total_selling_amount, dec!(50000));
    assert_eq!(totals.gst_amount, dec!(9000));
    assert_eq!(totals.grand_total, dec!(59000));
}

#[test]
fn supply_po_variance_is_reported_not_added() {
    let adj = SupplyAdjustments {
        discount: dec!(20),
        transportation: dec!(5),
        po_variance: dec!(10),
        ..Default::default()
    };
    let breakdown = CostingService::supply_breakdown(dec!(1000), &adj);

    assert_eq!(breakdown.discounted_base_supply_rate, dec!(800));
    assert_eq!(breakdown.total_supply_own_cost, dec!(840));
    assert_eq!(breakdown.po_variance_amount, dec!(80));
    assert_eq!(breakdown.final_supply_amount, dec!(80));
}

// The legacy front-end had a second "supply price" path that multiplied the
// quantity by the raw basic rate. Own amounts here always use the adjusted
// own cost.
#[test]
fn supply_own_amount_uses_own_cost_not_basic_rate() {
    let item = supply_item_with(
        dec!(10000),
        dec!(3),
        SupplyAdjustments {
            discount: dec!(10),
            wastage: dec!(2),
            ..Default::default()
        },
    );
    let costing = CostingService::line_item_costing(&item);

    assert_eq!(costing.supply_own_amount, dec!(27540));
    assert_ne!(costing.supply_own_amount, dec!(30000));
}

// Rates up to 10,000,000.00 with paise precision.
fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=1_000_000_000).prop_map(|paise| Decimal::new(paise, 2))
}

fn positive_rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000_000).prop_map(|paise| Decimal::new(paise, 2))
}

// Adjustment percentages in [0, 100] with two decimals.
fn percent_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

// Margin and GST rates are unbounded above; up to 1000% here.
fn rate_percent_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

// Quantities up to 10,000 with two decimals (metres of cable and the like).
fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=1_000_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn positive_quantity_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

const SUPPLY_FIELDS: [AdjustmentField; 8] = [
    AdjustmentField::Discount,
    AdjustmentField::Wastage,
    AdjustmentField::Transportation,
    AdjustmentField::Contingency,
    AdjustmentField::Miscellaneous,
    AdjustmentField::Outstation,
    AdjustmentField::OfficeOverhead,
    AdjustmentField::PoVariance,
];

fn line_item_strategy() -> impl Strategy<Value = LineItem> {
    (
        rate_strategy(),
        rate_strategy(),
        quantity_strategy(),
        prop::array::uniform8(percent_strategy()),
        prop::array::uniform7(percent_strategy()),
    )
        .prop_map(|(supply_rate, installation_rate, quantity, supply, installation)| {
            let mut item = LineItem::from_bom(bom("PROP", supply_rate, installation_rate, quantity));
            for (field, pct) in SUPPLY_FIELDS.into_iter().zip(supply) {
                item.supply_adjustments.set(field, pct);
            }
            for (field, pct) in SUPPLY_FIELDS[1..].iter().copied().zip(installation) {
                item.installation_adjustments.set(field, pct);
            }
            item
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn discount_is_monotonically_non_increasing(
        rate in rate_strategy(),
        a in percent_strategy(),
        b in percent_strategy(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let discounted = |discount: Decimal| {
            let adj = SupplyAdjustments { discount, ..Default::default() };
            CostingService::supply_breakdown(rate, &adj).discounted_base_supply_rate
        };

        prop_assert!(discounted(high) <= discounted(low), "discount {} vs {} on {}", high, low, rate);
        prop_assert!(discounted(low) <= rate);
        prop_assert_eq!(discounted(Decimal::ONE_HUNDRED), Decimal::ZERO);
    }

    #[test]
    fn zero_adjustments_leave_base_rates_untouched(rate in rate_strategy()) {
        let supply = CostingService::supply_breakdown(rate, &SupplyAdjustments::default());
        prop_assert_eq!(supply.discounted_base_supply_rate, rate);
        prop_assert_eq!(supply.total_supply_cost, Decimal::ZERO);
        prop_assert_eq!(supply.total_supply_own_cost, rate);

        let installation =
            CostingService::installation_breakdown(rate, &InstallationAdjustments::default());
        prop_assert_eq!(installation.total_installation_cost, Decimal::ZERO);
        prop_assert_eq!(installation.total_installation_own_cost, rate);
    }

    #[test]
    fn aggregation_is_idempotent(
        items in prop::collection::vec(line_item_strategy(), 0..8),
        supply_margin in rate_percent_strategy(),
        installation_margin in rate_percent_strategy(),
        gst in rate_percent_strategy(),
    ) {
        let params = params(supply_margin, installation_margin, gst);

        let first = CostingService::compute_totals(&items, &params);
        let second = CostingService::compute_totals(&items, &params);
        prop_assert_eq!(&first, &second);

        let costings: Vec<_> = items.iter().map(CostingService::line_item_costing).collect();
        prop_assert_eq!(&first, &CostingService::totals_from_costings(&costings, &params));
    }

    #[test]
    fn margin_is_strictly_increasing(
        supply_rate in positive_rate_strategy(),
        installation_rate in positive_rate_strategy(),
        quantity in positive_quantity_strategy(),
        margin in rate_percent_strategy(),
        step in 1i64..=100_000,
    ) {
        let mut item = supply_item(supply_rate, quantity);
        item.basic_installation_rate = installation_rate;
        let items = [item];
        let higher = margin + Decimal::new(step, 2);

        let low = CostingService::compute_totals(&items, &params(margin, margin, dec!(18)));
        let high = CostingService::compute_totals(&items, &params(higher, higher, dec!(18)));

        prop_assert!(high.supply_selling_amount > low.supply_selling_amount);
        prop_assert!(high.installation_selling_amount > low.installation_selling_amount);
    }

    #[test]
    fn grand_total_is_selling_plus_gst(
        items in prop::collection::vec(line_item_strategy(), 0..8),
        gst in rate_percent_strategy(),
    ) {
        let totals = CostingService::compute_totals(&items, &params(dec!(15), dec!(20), gst));

        prop_assert_eq!(totals.grand_total, totals.total_selling_amount + totals.gst_amount);
        prop_assert!(totals.gst_amount >= Decimal::ZERO);
        if gst.is_zero() {
            prop_assert_eq!(totals.grand_total, totals.total_selling_amount);
        }
    }
}

#[test]
fn installation_margin_applies_to_aggregated_own_cost() {
    let mut a = supply_item(Decimal::ZERO, dec!(2));
    a.basic_installation_rate = dec!(1000);
    let mut b = supply_item(Decimal::ZERO, dec!(1));
    b.basic_installation_rate = dec!(500);

    let totals = CostingService::compute_totals(&[a, b], &MarginParams::default());

    assert_eq!(totals.total_installation_own_cost, dec!(2500));
    assert_eq!(totals.installation_selling_amount, dec!(3000));
    assert_eq!(totals.total_selling_amount, dec!(3000));
    assert_eq!(totals.gst_amount, dec!(540));
    assert_eq!(totals.grand_total, dec!(3540));
}
