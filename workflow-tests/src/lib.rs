//! Quotation workflow test harness.
//!
//! Drives a quotation draft the way the CRM front-end does: BOM rows arrive as
//! JSON from the lead/BOM API, the user edits adjustments field by field, the
//! "Final Costing" view is rendered, and a snapshot is serialized for the
//! quotation-creation API. No service is contacted; the JSON payloads stand in
//! for the remote collaborators.

use anyhow::{anyhow, Result};
use quotation_costing::{
    BomItem, CostSide, CostingConfig, LineItemPatch, QuotationDraft, QuotationSnapshot,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

/// Initialize tracing for tests (only once). The level comes from
/// `configuration.*` or `APP__LOG_LEVEL`, falling back to `info`.
pub fn init_tracing() {
    let log_level = crm_core::config::Config::load()
        .map(|config| config.log_level)
        .unwrap_or_else(|e| {
            eprintln!("Falling back to default log level: {}", e);
            "info".to_string()
        });
    crm_core::observability::init_tracing("workflow-tests", &log_level);
}

/// Response body of the lead/BOM endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadBomResponse {
    #[serde(alias = "leadId")]
    pub lead_id: String,
    #[serde(default)]
    pub items: Vec<BomItem>,
}

/// Parse a lead/BOM response body.
pub fn parse_lead_bom(body: &str) -> Result<LeadBomResponse> {
    serde_json::from_str(body).map_err(|e| anyhow!("Failed to parse lead BOM response: {}", e))
}

/// One edit as emitted by the editing surface.
#[derive(Debug, Clone)]
pub enum FieldEdit {
    Adjustment {
        item_code: String,
        side: CostSide,
        field: String,
        value: Value,
    },
    Quantity {
        item_code: String,
        value: Value,
    },
    Patch {
        item_code: String,
        patch: Value,
    },
}

/// Context for workflow tests: one lead, one draft.
pub struct WorkflowTestContext {
    pub config: CostingConfig,
    pub lead_id: String,
    pub draft: QuotationDraft,
}

impl WorkflowTestContext {
    /// Bind every BOM row of the lead into a fresh draft.
    pub fn from_lead_bom(body: &str, config: CostingConfig) -> Result<Self> {
        init_tracing();

        let response = parse_lead_bom(body)?;
        let mut draft = QuotationDraft::from_config(&config);
        draft.bind_bom_items(response.items);

        tracing::info!(lead_id = %response.lead_id, "Draft created from lead BOM");

        Ok(Self {
            config,
            lead_id: response.lead_id,
            draft,
        })
    }

    fn line_item_id(&self, item_code: &str) -> Result<Uuid> {
        self.draft
            .line_items()
            .iter()
            .find(|item| item.item_code == item_code)
            .map(|item| item.line_item_id)
            .ok_or_else(|| anyhow!("No line item with code {}", item_code))
    }

    /// Apply one edit to the draft.
    pub fn apply(&mut self, edit: &FieldEdit) -> Result<()> {
        match edit {
            FieldEdit::Adjustment {
                item_code,
                side,
                field,
                value,
            } => {
                let id = self.line_item_id(item_code)?;
                self.draft.edit_adjustment(id, *side, field, value)?;
            }
            FieldEdit::Quantity { item_code, value } => {
                let id = self.line_item_id(item_code)?;
                let quantity = quotation_costing::utils::numeric::coerce_value(value);
                self.draft.set_quantity(id, quantity)?;
            }
            FieldEdit::Patch { item_code, patch } => {
                let id = self.line_item_id(item_code)?;
                let patch: LineItemPatch = serde_json::from_value(patch.clone())?;
                self.draft.apply_patch(id, &patch)?;
            }
        }
        Ok(())
    }

    pub fn apply_all(&mut self, edits: &[FieldEdit]) -> Result<()> {
        edits.iter().try_for_each(|edit| self.apply(edit))
    }

    /// Build the submission snapshot and its JSON body.
    pub fn submit(&self) -> Result<(QuotationSnapshot, Value)> {
        let snapshot = self
            .draft
            .snapshot(Uuid::new_v4(), Some(self.lead_id.clone()));
        let body = serde_json::to_value(&snapshot)?;
        Ok((snapshot, body))
    }
}
