//! Line item model for quotation-costing.

use super::adjustment::{InstallationAdjustments, SupplyAdjustments};
use crate::utils::numeric::{lenient, lenient_opt};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One priced unit within a quotation draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub line_item_id: Uuid,
    pub bom_line_id: Option<String>,
    pub item_code: String,
    pub item_name: String,
    pub uom: String,
    pub basic_supply_rate: Decimal,
    pub basic_installation_rate: Decimal,
    pub quantity: Decimal,
    pub supply_adjustments: SupplyAdjustments,
    pub installation_adjustments: InstallationAdjustments,
}

impl LineItem {
    /// Bind a BOM row: rates and quantity are copied from the snapshot and
    /// every adjustment starts at zero.
    pub fn from_bom(bom: BomItem) -> Self {
        Self {
            line_item_id: Uuid::new_v4(),
            bom_line_id: bom.bom_line_id,
            item_code: bom.item_code,
            item_name: bom.item_name,
            uom: bom.uom,
            basic_supply_rate: bom.basic_supply_rate,
            basic_installation_rate: bom.basic_installation_rate,
            quantity: bom.quantity,
            supply_adjustments: SupplyAdjustments::default(),
            installation_adjustments: InstallationAdjustments::default(),
        }
    }
}

/// BOM row as returned by the lead/BOM API.
///
/// Numeric fields deserialize leniently: missing or malformed values are zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BomItem {
    #[serde(default, alias = "bomLineId")]
    pub bom_line_id: Option<String>,
    #[serde(default, alias = "itemCode")]
    pub item_code: String,
    #[serde(default, alias = "itemName")]
    pub item_name: String,
    #[serde(default)]
    pub uom: String,
    #[serde(default, alias = "basicSupplyRate", deserialize_with = "lenient")]
    pub basic_supply_rate: Decimal,
    #[serde(default, alias = "basicInstallationRate", deserialize_with = "lenient")]
    pub basic_installation_rate: Decimal,
    #[serde(default, deserialize_with = "lenient")]
    pub quantity: Decimal,
}

/// Partial update to one line item. Absent and `null` fields are left
/// unchanged; unknown keys fail deserialization, as unknown field names do in
/// a single-field edit.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineItemPatch {
    #[serde(default, deserialize_with = "lenient_opt")]
    pub quantity: Option<Decimal>,
    #[serde(default, alias = "supplyAdjustments")]
    pub supply: AdjustmentsPatch,
    #[serde(default, alias = "installationAdjustments")]
    pub installation: AdjustmentsPatch,
}

/// Optional value per adjustment field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdjustmentsPatch {
    #[serde(default, deserialize_with = "lenient_opt")]
    pub discount: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub wastage: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub transportation: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub contingency: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub miscellaneous: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub outstation: Option<Decimal>,
    #[serde(default, alias = "officeOverhead", deserialize_with = "lenient_opt")]
    pub office_overhead: Option<Decimal>,
    #[serde(default, alias = "poVariance", deserialize_with = "lenient_opt")]
    pub po_variance: Option<Decimal>,
}

impl AdjustmentsPatch {
    /// Present fields in a fixed order.
    pub fn entries(&self) -> Vec<(super::AdjustmentField, Decimal)> {
        use super::AdjustmentField as F;
        [
            (F::Discount, self.discount),
            (F::Wastage, self.wastage),
            (F::Transportation, self.transportation),
            (F::Contingency, self.contingency),
            (F::Miscellaneous, self.miscellaneous),
            (F::Outstation, self.outstation),
            (F::OfficeOverhead, self.office_overhead),
            (F::PoVariance, self.po_variance),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
