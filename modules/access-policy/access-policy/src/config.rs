//! Configuration for the access policy.

use serde::Deserialize;

/// Policy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// Also let the sender delete the incoming half of their own request,
    /// so that a cancel can remove both halves in one transaction.
    pub sender_may_retract_incoming: bool,

    /// Upper bound on `sharedWith` for todo creates and updates.
    /// Unbounded when unset.
    pub max_shared_with: Option<usize>,
}

impl PolicyConfig {
    /// The rule table with no extensions.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            sender_may_retract_incoming: false,
            max_shared_with: None,
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            sender_may_retract_incoming: true,
            max_shared_with: None,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: PolicyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, PolicyConfig::default());
        assert!(cfg.sender_may_retract_incoming);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = serde_json::from_str::<PolicyConfig>(r#"{"allow_all": true}"#).unwrap_err();
        assert!(err.to_string().contains("allow_all"));
    }
}
