//! Configuration for the todo sharing module.

use docstore::TxConfig;
use serde::Deserialize;

/// Module configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TodoSharingConfig {
    pub service: ServiceConfig,
    /// Retry settings for the store transactions behind every workflow.
    pub tx: TxConfig,
}

/// Input limits enforced by the domain services.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Maximum todo content length, in characters.
    pub max_content_length: usize,
    /// Maximum display name length, in characters.
    pub max_display_name_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_content_length: 10_000,
            max_display_name_length: 100,
        }
    }
}
