use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which directions are expanded from a jump point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pruning {
    /// Only the natural directions: straight ahead plus the two diagonals bending towards it,
    /// or the diagonal and its two components.
    #[default]
    Natural,
    /// Natural directions plus the forced directions around obstacle corners. Jump scans
    /// also stop where such a direction exists, and diagonal scans check the corners beside
    /// each step. Finds a path whenever one exists.
    ForcedNeighbours,
}

/// Options of a [Pathfinder](crate::Pathfinder).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub pruning: Pruning,

    /// Reject out-of-bounds or blocked endpoints before searching.
    #[serde(default = "default_validate_endpoints")]
    pub validate_endpoints: bool,

    /// Maximum number of frontier pops before the search gives up. Unbounded if absent.
    #[serde(default)]
    pub max_expansions: Option<usize>,
}

fn default_validate_endpoints() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pruning: Pruning::default(),
            validate_endpoints: default_validate_endpoints(),
            max_expansions: None,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// No validation, no budget, natural pruning: the plain reference search.
    pub fn unchecked() -> Self {
        Self {
            validate_endpoints: false,
            ..Self::default()
        }
    }

    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_validate_endpoints(mut self, validate: bool) -> Self {
        self.validate_endpoints = validate;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Parses a configuration from TOML. Missing keys take their default value.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_without_budget() {
        let config = SearchConfig::default();
        assert_eq!(config.pruning, Pruning::Natural);
        assert!(config.validate_endpoints);
        assert_eq!(config.max_expansions, None);
        assert!(!SearchConfig::unchecked().validate_endpoints);
    }

    #[test]
    fn parses_partial_toml() {
        let config = SearchConfig::from_toml_str(
            r#"
            pruning = "forced_neighbours"
            max_expansions = 500
            "#,
        )
        .unwrap();
        assert_eq!(
            config,
            SearchConfig::new()
                .with_pruning(Pruning::ForcedNeighbours)
                .with_max_expansions(500)
        );
        assert_eq!(SearchConfig::from_toml_str("").unwrap(), SearchConfig::default());
    }

    #[test]
    fn rejects_unknown_pruning() {
        assert!(SearchConfig::from_toml_str("pruning = \"aggressive\"").is_err());
    }
}
