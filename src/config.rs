//! Survey-specific metric configuration loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analyzers::peak::PeakPolicy;
use crate::dataset::columns;
use crate::error::Result;

/// Survey-specific values the standard metrics are built from.
///
/// Stored as a JSON object on disk; any field left out keeps its default:
/// ```json
/// {
///   "primary_junction": "Elm Avenue/Rabbit Road",
///   "secondary_junction": "Hanley Highway/Westway",
///   "electric_column": "elctricHybrid",
///   "peak_policy": "enumerate"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricConfig {
    pub primary_junction: String,
    pub secondary_junction: String,
    /// Header name of the electric/hybrid flag column.
    pub electric_column: String,
    pub rain_conditions: Vec<String>,
    pub two_wheeled_types: Vec<String>,
    pub peak_policy: PeakPolicy,
}

impl Default for MetricConfig {
    fn default() -> Self {
        MetricConfig {
            primary_junction: "Elm Avenue/Rabbit Road".to_string(),
            secondary_junction: "Hanley Highway/Westway".to_string(),
            electric_column: columns::ELECTRIC_HYBRID.to_string(),
            rain_conditions: vec!["Heavy Rain".to_string(), "Light Rain".to_string()],
            two_wheeled_types: vec![
                "Bicycle".to_string(),
                "Motorcycle".to_string(),
                "Scooter".to_string(),
            ],
            peak_policy: PeakPolicy::default(),
        }
    }
}

impl MetricConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Both surveyed junctions, primary first.
    pub fn junctions(&self) -> [&str; 2] {
        [self.primary_junction.as_str(), self.secondary_junction.as_str()]
    }
}
