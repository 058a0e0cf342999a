//! Configuration for the team building component

use serde::{Deserialize, Serialize};

/// Team building configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    /// Fewest add candidates for which the adder is shown. With the default
    /// of 2 a lone candidate gets no adder.
    pub min_adder_candidates: usize,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            min_adder_candidates: 2,
        }
    }
}

impl TeamConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Whether `candidates` add candidates warrant an adder.
    pub fn shows_adder(&self, candidates: usize) -> bool {
        candidates > 0 && candidates >= self.min_adder_candidates
    }
}
