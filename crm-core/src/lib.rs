//! crm-core: Shared infrastructure for the CRM quotation workspace.
pub mod config;
pub mod error;
pub mod observability;
