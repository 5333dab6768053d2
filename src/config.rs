use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::pipeline::TerritoryMergeRule;
use crate::table::REPORT_YEAR;

/// Parameters of one run. Every field has a default, so a config file only needs
/// to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Country whose time series is charted and extrapolated.
    pub country: String,
    /// Year the predictor is asked about.
    pub prediction_year: u16,
    /// Length of the most-populated ranking.
    pub top_n: usize,
    /// Snapshot year used for totals, ranking and continent sums.
    pub report_year: u16,
    /// Territory merge applied after backfill; `null` skips the merge.
    pub merge: Option<TerritoryMergeRule>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            country: "Morocco".to_string(),
            prediction_year: 2030,
            top_n: 10,
            report_year: REPORT_YEAR,
            merge: Some(TerritoryMergeRule::default()),
        }
    }
}

impl RunConfig {
    /// Parse a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| PipelineError::Config(format!("failed to parse config: {e}")))
    }

    /// Read a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(RunConfig::from_json_str("{}").unwrap(), RunConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = RunConfig::from_json_str(r#"{"country": "Peru", "top_n": 3}"#).unwrap();
        assert_eq!(config.country, "Peru");
        assert_eq!(config.top_n, 3);
        assert_eq!(config.prediction_year, 2030);
        assert_eq!(config.merge, Some(TerritoryMergeRule::default()));
    }

    #[test]
    fn null_merge_disables_it() {
        let config = RunConfig::from_json_str(r#"{"merge": null}"#).unwrap();
        assert_eq!(config.merge, None);
    }

    #[test]
    fn unknown_field_rejected() {
        let err = RunConfig::from_json_str(r#"{"contry": "Peru"}"#).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
