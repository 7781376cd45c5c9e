//! Common fixtures for quotation workflow tests.

use quotation_costing::CostingConfig;
use workflow_tests::WorkflowTestContext;

/// Lead/BOM response as served by the lead API, camelCase and loosely typed.
pub const LEAD_BOM_RESPONSE: &str = r#"{
    "leadId": "LEAD-2026-0042",
    "items": [
        {
            "bomLineId": "1",
            "itemCode": "PNL-LT",
            "itemName": "LT panel",
            "uom": "nos",
            "basicSupplyRate": 10000,
            "basicInstallationRate": "5000",
            "quantity": 2
        },
        {
            "bomLineId": "2",
            "itemCode": "CBL-4C",
            "itemName": "4 core armoured cable",
            "uom": "m",
            "basicSupplyRate": "10000",
            "basicInstallationRate": null,
            "quantity": "1"
        },
        {
            "bomLineId": "3",
            "itemCode": "MISC",
            "itemName": "Sundries",
            "uom": "lot",
            "basicSupplyRate": "TBD",
            "quantity": 1
        }
    ]
}"#;

/// Create a context for the standard lead with default config.
pub fn setup() -> WorkflowTestContext {
    WorkflowTestContext::from_lead_bom(LEAD_BOM_RESPONSE, CostingConfig::default())
        .expect("Failed to create workflow test context")
}
