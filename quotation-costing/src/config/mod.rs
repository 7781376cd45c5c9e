use crate::models::MarginParams;
use crm_core::config as core_config;
use crm_core::error::AppError;
use rust_decimal::Decimal;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "costing";
pub const ENV_PREFIX: &str = "COSTING";

/// Engine settings: quotation defaults for new drafts and the quantity ceiling
/// used by the advisory checks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CostingConfig {
    #[serde(default = "default_supply_margin_percent")]
    pub default_supply_margin_percent: Decimal,
    #[serde(default = "default_installation_margin_percent")]
    pub default_installation_margin_percent: Decimal,
    #[serde(default = "default_gst_rate_percent")]
    pub default_gst_rate_percent: Decimal,
    #[serde(default = "default_max_quantity")]
    pub max_quantity: u32,
}

fn default_supply_margin_percent() -> Decimal {
    MarginParams::default().supply_margin_percent
}

fn default_installation_margin_percent() -> Decimal {
    MarginParams::default().installation_margin_percent
}

fn default_gst_rate_percent() -> Decimal {
    MarginParams::default().gst_rate_percent
}

fn default_max_quantity() -> u32 {
    10_000
}

impl Default for CostingConfig {
    fn default() -> Self {
        Self {
            default_supply_margin_percent: default_supply_margin_percent(),
            default_installation_margin_percent: default_installation_margin_percent(),
            default_gst_rate_percent: default_gst_rate_percent(),
            max_quantity: default_max_quantity(),
        }
    }
}

impl CostingConfig {
    /// Load from `costing.*` in the working directory and `COSTING__*`
    /// environment variables.
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(file_stem: &str) -> Result<Self, AppError> {
        let config: CostingConfig = core_config::load(file_stem, ENV_PREFIX)?;
        tracing::debug!(
            supply_margin = %config.default_supply_margin_percent,
            installation_margin = %config.default_installation_margin_percent,
            gst_rate = %config.default_gst_rate_percent,
            max_quantity = config.max_quantity,
            "Costing config loaded"
        );
        Ok(config)
    }

    pub fn margin_params(&self) -> MarginParams {
        MarginParams {
            supply_margin_percent: self.default_supply_margin_percent,
            installation_margin_percent: self.default_installation_margin_percent,
            gst_rate_percent: self.default_gst_rate_percent,
        }
        .sanitized()
    }
}
