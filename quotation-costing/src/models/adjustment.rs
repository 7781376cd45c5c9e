//! Named percentage adjustments applied to a line item's base rates.

use crate::utils::numeric::{self, lenient};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One named adjustment field.
///
/// Supply and installation share the vocabulary except for `Discount`, which
/// only exists on the supply side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentField {
    Discount,
    Wastage,
    Transportation,
    Contingency,
    Miscellaneous,
    Outstation,
    OfficeOverhead,
    PoVariance,
}

impl AdjustmentField {
    /// Cost components summed into the total cost, in display order.
    pub const COMPONENTS: [AdjustmentField; 6] = [
        AdjustmentField::Wastage,
        AdjustmentField::Transportation,
        AdjustmentField::Contingency,
        AdjustmentField::Miscellaneous,
        AdjustmentField::Outstation,
        AdjustmentField::OfficeOverhead,
    ];

    /// Field name as used by the editing surface.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentField::Discount => "discount",
            AdjustmentField::Wastage => "wastage",
            AdjustmentField::Transportation => "transportation",
            AdjustmentField::Contingency => "contingency",
            AdjustmentField::Miscellaneous => "miscellaneous",
            AdjustmentField::Outstation => "outstation",
            AdjustmentField::OfficeOverhead => "officeOverhead",
            AdjustmentField::PoVariance => "poVariance",
        }
    }

    /// Accepts both camelCase and snake_case names. Unknown names yield `None`.
    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "discount" => Some(AdjustmentField::Discount),
            "wastage" => Some(AdjustmentField::Wastage),
            "transportation" => Some(AdjustmentField::Transportation),
            "contingency" => Some(AdjustmentField::Contingency),
            "miscellaneous" => Some(AdjustmentField::Miscellaneous),
            "outstation" => Some(AdjustmentField::Outstation),
            "officeOverhead" | "office_overhead" => Some(AdjustmentField::OfficeOverhead),
            "poVariance" | "po_variance" => Some(AdjustmentField::PoVariance),
            _ => None,
        }
    }

    pub fn applies_to_installation(&self) -> bool {
        !matches!(self, AdjustmentField::Discount)
    }
}

impl std::fmt::Display for AdjustmentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supply-side adjustment percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyAdjustments {
    #[serde(deserialize_with = "lenient")]
    pub discount: Decimal,
    #[serde(deserialize_with = "lenient")]
    pub wastage: Decimal,
    #[serde(deserialize_with = "lenient")]
    pub transportation: Decimal,
    #[serde(deserialize_with = "lenient")]
    pub contingency: Decimal,
    #[serde(deserialize_with = "lenient")]
    pub miscellaneous: Decimal,
    #[serde(deserialize_with = "lenient")]
    pub outstation: Decimal,
    #[serde(alias = "officeOverhead", deserialize_with = "lenient")]
    pub office_overhead: Decimal,
    #[serde(alias = "poVariance", deserialize_with = "lenient")]
    pub po_variance: Decimal,
}

impl SupplyAdjustments {
    pub fn get(&self, field: AdjustmentField) -> Decimal {
        match field {
            AdjustmentField::Discount => self.discount,
            AdjustmentField::Wastage => self.wastage,
            AdjustmentField::Transportation => self.transportation,
            AdjustmentField::Contingency => self.contingency,
            AdjustmentField::Miscellaneous => self.miscellaneous,
            AdjustmentField::Outstation => self.outstation,
            AdjustmentField::OfficeOverhead => self.office_overhead,
            AdjustmentField::PoVariance => self.po_variance,
        }
    }

    /// Set one field; out-of-range values are stored as zero.
    pub fn set(&mut self, field: AdjustmentField, value: Decimal) {
        let value = numeric::percentage(value);
        match field {
            AdjustmentField::Discount => self.discount = value,
            AdjustmentField::Wastage => self.wastage = value,
            AdjustmentField::Transportation => self.transportation = value,
            AdjustmentField::Contingency => self.contingency = value,
            AdjustmentField::Miscellaneous => self.miscellaneous = value,
            AdjustmentField::Outstation => self.outstation = value,
            AdjustmentField::OfficeOverhead => self.office_overhead = value,
            AdjustmentField::PoVariance => self.po_variance = value,
        }
    }

    /// Copy with every field forced into `[0, 100]`.
    pub fn sanitized(&self) -> Self {
        Self {
            discount: numeric::percentage(self.discount),
            wastage: numeric::percentage(self.wastage),
            transportation: numeric::percentage(self.transportation),
            contingency: numeric::percentage(self.contingency),
            miscellaneous: numeric::percentage(self.miscellaneous),
            outstation: numeric::percentage(self.outstation),
            office_overhead: numeric::percentage(self.office_overhead),
            po_variance: numeric::percentage(self.po_variance),
        }
    }
}

/// Installation-side adjustment percentages. No discount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallationAdjustments {
    #[serde(deserialize_with = "lenient")]
    pub wastage: Decimal,
    #[serde(deserialize_with = "lenient")]
    pub transportation: Decimal,
    #[serde(deserialize_with = "lenient")]
    pub contingency: Decimal,
    #[serde(deserialize_with = "lenient")]
    pub miscellaneous: Decimal,
    #[serde(deserialize_with = "lenient")]
    pub outstation: Decimal,
    #[serde(alias = "officeOverhead", deserialize_with = "lenient")]
    pub office_overhead: Decimal,
    #[serde(alias = "poVariance", deserialize_with = "lenient")]
    pub po_variance: Decimal,
}

impl InstallationAdjustments {
    /// `None` for `Discount`.
    pub fn get(&self, field: AdjustmentField) -> Option<Decimal> {
        match field {
            AdjustmentField::Discount => None,
            AdjustmentField::Wastage => Some(self.wastage),
            AdjustmentField::Transportation => Some(self.transportation),
            AdjustmentField::Contingency => Some(self.contingency),
            AdjustmentField::Miscellaneous => Some(self.miscellaneous),
            AdjustmentField::Outstation => Some(self.outstation),
            AdjustmentField::OfficeOverhead => Some(self.office_overhead),
            AdjustmentField::PoVariance => Some(self.po_variance),
        }
    }

    /// Set one field. Returns `false` and leaves the set untouched when the
    /// field has no installation counterpart.
    pub fn set(&mut self, field: AdjustmentField, value: Decimal) -> bool {
        let value = numeric::percentage(value);
        match field {
            AdjustmentField::Discount => return false,
            AdjustmentField::Wastage => self.wastage = value,
            AdjustmentField::Transportation => self.transportation = value,
            AdjustmentField::Contingency => self.contingency = value,
            AdjustmentField::Miscellaneous => self.miscellaneous = value,
            AdjustmentField::Outstation => self.outstation = value,
            AdjustmentField::OfficeOverhead => self.office_overhead = value,
            AdjustmentField::PoVariance => self.po_variance = value,
        }
        true
    }

    pub fn sanitized(&self) -> Self {
        Self {
            wastage: numeric::percentage(self.wastage),
            transportation: numeric::percentage(self.transportation),
            contingency: numeric::percentage(self.contingency),
            miscellaneous: numeric::percentage(self.miscellaneous),
            outstation: numeric::percentage(self.outstation),
            office_overhead: numeric::percentage(self.office_overhead),
            po_variance: numeric::percentage(self.po_variance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_field_names_round_trip() {
        for field in [
            AdjustmentField::Discount,
            AdjustmentField::Wastage,
            AdjustmentField::Transportation,
            AdjustmentField::Contingency,
            AdjustmentField::Miscellaneous,
            AdjustmentField::Outstation,
            AdjustmentField::OfficeOverhead,
            AdjustmentField::PoVariance,
        ] {
            assert_eq!(AdjustmentField::from_string(field.as_str()), Some(field));
        }
        assert_eq!(
            AdjustmentField::from_string("office_overhead"),
            Some(AdjustmentField::OfficeOverhead)
        );
        assert_eq!(AdjustmentField::from_string("freight"), None);
    }

    #[test]
    fn test_supply_set_last_write_wins() {
        let mut adj = SupplyAdjustments::default();
        adj.set(AdjustmentField::Wastage, dec!(2));
        adj.set(AdjustmentField::Wastage, dec!(3.5));
        assert_eq!(adj.get(AdjustmentField::Wastage), dec!(3.5));
        assert_eq!(adj.transportation, Decimal::ZERO);
    }

    #[test]
    fn test_supply_set_out_of_range_stores_zero() {
        let mut adj = SupplyAdjustments::default();
        adj.set(AdjustmentField::Discount, dec!(10));
        adj.set(AdjustmentField::Discount, dec!(150));
        assert_eq!(adj.discount, Decimal::ZERO);
    }

    #[test]
    fn test_installation_rejects_discount() {
        let mut adj = InstallationAdjustments::default();
        assert!(!adj.set(AdjustmentField::Discount, dec!(5)));
        assert_eq!(adj, InstallationAdjustments::default());
        assert!(adj.set(AdjustmentField::PoVariance, dec!(10)));
        assert_eq!(adj.get(AdjustmentField::PoVariance), Some(dec!(10)));
        assert_eq!(adj.get(AdjustmentField::Discount), None);
    }

    #[test]
    fn test_deserialize_loose_bag() {
        let adj: SupplyAdjustments = serde_json::from_value(serde_json::json!({
            "discount": "10",
            "wastage": 2,
            "officeOverhead": "n/a",
            "poVariance": null
        }))
        .unwrap();

        assert_eq!(adj.discount, dec!(10));
        assert_eq!(adj.wastage, dec!(2));
        assert_eq!(adj.office_overhead, Decimal::ZERO);
        assert_eq!(adj.po_variance, Decimal::ZERO);
        assert_eq!(adj.contingency, Decimal::ZERO);
    }

    #[test]
    fn test_sanitized_clears_invalid_values() {
        let adj = SupplyAdjustments {
            discount: dec!(-5),
            wastage: dec!(2),
            outstation: dec!(101),
            ..Default::default()
        };
        let clean = adj.sanitized();
        assert_eq!(clean.discount, Decimal::ZERO);
        assert_eq!(clean.wastage, dec!(2));
        assert_eq!(clean.outstation, Decimal::ZERO);
    }
}
