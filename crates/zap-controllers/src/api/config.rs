use serde::{Deserialize, Serialize};

/// What `add_body` does when the controller already affects the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Refuse the attach and leave the graph untouched.
    #[default]
    Reject,
    /// Create another distinct edge for the same pair.
    /// `remove_body` then detaches the most recently created one.
    Allow,
}

/// Configuration for a `ControllerRegistry`.
/// Loaded from JSON or built in code; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Duplicate attach handling (default: reject).
    pub duplicate_policy: DuplicatePolicy,
    /// Expected number of controllers (default: 8).
    pub controller_capacity: usize,
    /// Expected number of live edges (default: 64).
    pub edge_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
            controller_capacity: 8,
            edge_capacity: 64,
        }
    }
}

impl RegistryConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn with_edge_capacity(mut self, capacity: usize) -> Self {
        self.edge_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reject_duplicates() {
        let config = RegistryConfig::default();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(config.controller_capacity, 8);
        assert_eq!(config.edge_capacity, 64);
    }

    #[test]
    fn parse_partial_config() {
        let json = r#"{ "duplicate_policy": "allow" }"#;
        let config = RegistryConfig::from_json(json).unwrap();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Allow);
        assert_eq!(config.edge_capacity, 64);
    }

    #[test]
    fn parse_empty_object() {
        let config = RegistryConfig::from_json("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn unknown_policy_is_an_error() {
        assert!(RegistryConfig::from_json(r#"{ "duplicate_policy": "merge" }"#).is_err());
    }
}
