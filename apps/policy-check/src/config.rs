//! Layered configuration: defaults, then an optional YAML file, then
//! `TODOSHARE_`-prefixed environment variables.

use std::path::Path;

use access_policy::PolicyConfig;
use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::Deserialize;
use todo_sharing::TodoSharingConfig;

pub const ENV_PREFIX: &str = "TODOSHARE_";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub policy: PolicyConfig,
    pub todo_sharing: TodoSharingConfig,
}

impl AppConfig {
    /// Load the configuration. A missing `path` means defaults plus
    /// environment; a given `path` must exist.
    ///
    /// Nested keys use `__` in the environment, e.g.
    /// `TODOSHARE_POLICY__MAX_SHARED_WITH=10`.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or any layer does not match the schema.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            anyhow::ensure!(path.exists(), "config file {} not found", path.display());
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")
    }
}
