//! Rate and pitch-range policy configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ContourError;
use crate::types::SentencePosition;

/// One value per word-count bucket (short, medium, long).
pub type BucketValues = [f64; 3];

/// Per-position lookup table, indexed by word-count bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionTable {
    pub first: BucketValues,
    pub middle: BucketValues,
    pub last: BucketValues,
}

impl PositionTable {
    pub fn row(&self, position: SentencePosition) -> &BucketValues {
        match position {
            SentencePosition::First => &self.first,
            SentencePosition::Middle => &self.middle,
            SentencePosition::Last => &self.last,
        }
    }

    fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.first.iter().chain(&self.middle).chain(&self.last).copied()
    }
}

/// Tunables for the paragraph prosody policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProsodyConfig {
    /// Policy calls per damping cycle
    pub num_paragraphs: u32,
    /// Fraction removed from the rate delta on the damped call
    pub damping_factor: f64,
    /// Duration deltas in percent
    pub rate_table: PositionTable,
    /// Pitch half-range as a fraction of the baseline peak
    pub range_table: PositionTable,
}

impl Default for ProsodyConfig {
    fn default() -> Self {
        Self {
            num_paragraphs: 5,
            damping_factor: 0.041,
            rate_table: PositionTable {
                first: [8.7, 9.5, 9.9],
                middle: [2.8, 3.0, 3.3],
                last: [6.0, 6.9, 7.6],
            },
            range_table: PositionTable {
                first: [0.072, 0.069, 0.065],
                middle: [0.029, 0.027, 0.025],
                last: [0.048, 0.046, 0.044],
            },
        }
    }
}

impl ProsodyConfig {
    /// Check the config is usable by the policy.
    pub fn validate(&self) -> Result<(), ContourError> {
        if self.num_paragraphs == 0 {
            return Err(ContourError::InvalidConfig(
                "num_paragraphs must be at least 1".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.damping_factor) {
            return Err(ContourError::InvalidConfig(format!(
                "damping_factor must be in [0, 1), got {}",
                self.damping_factor
            )));
        }
        if let Some(v) = self
            .rate_table
            .values()
            .chain(self.range_table.values())
            .find(|v| !v.is_finite())
        {
            return Err(ContourError::InvalidConfig(format!(
                "table entries must be finite, got {}",
                v
            )));
        }
        // A delta of -100% or less leaves phones with no positive duration.
        if let Some(v) = self.rate_table.values().find(|&v| v <= -100.0) {
            return Err(ContourError::InvalidConfig(format!(
                "rate_table entries must be above -100, got {}",
                v
            )));
        }
        if let Some(v) = self.range_table.values().find(|&v| v < 0.0) {
            return Err(ContourError::InvalidConfig(format!(
                "range_table entries must not be negative, got {}",
                v
            )));
        }
        Ok(())
    }

    /// Load and validate a config from a JSON file. Missing keys take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: ProsodyConfig = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        log::debug!(
            "Loaded prosody config from {} ({} paragraphs per cycle)",
            path.display(),
            config.num_paragraphs
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        assert!(ProsodyConfig::default().validate().is_ok());
    }

    #[test]
    fn test_row_lookup() {
        let config = ProsodyConfig::default();
        assert_eq!(config.rate_table.row(SentencePosition::First), &[8.7, 9.5, 9.9]);
        assert_eq!(config.range_table.row(SentencePosition::Last), &[0.048, 0.046, 0.044]);
    }

    #[test]
    fn test_validate_rejects_zero_paragraphs() {
        let config = ProsodyConfig {
            num_paragraphs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ContourError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_bad_damping() {
        for damping in [-0.1, 1.0, f64::NAN] {
            let config = ProsodyConfig {
                damping_factor: damping,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "damping {} accepted", damping);
        }
    }

    #[test]
    fn test_validate_rejects_non_finite_table() {
        let mut config = ProsodyConfig::default();
        config.range_table.middle[1] = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_rate_below_minus_100() {
        for rate in [-100.0, -150.0] {
            let mut config = ProsodyConfig::default();
            config.rate_table.last[2] = rate;
            assert!(
                matches!(config.validate(), Err(ContourError::InvalidConfig(_))),
                "rate {} accepted",
                rate
            );
        }

        let mut config = ProsodyConfig::default();
        config.rate_table.middle = [-99.0, -50.0, 0.0];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_range() {
        let mut config = ProsodyConfig::default();
        config.range_table.first[0] = -0.01;
        assert!(matches!(config.validate(), Err(ContourError::InvalidConfig(_))));

        config.range_table.first[0] = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_file_rejects_collapsing_rates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"rate_table": {{"first": [-150, -150, -150], "middle": [-150, -150, -150], "last": [-150, -150, -150]}}}}"#
        )
        .unwrap();
        let err = ProsodyConfig::from_json_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("rate_table"), "{:#}", err);
    }

    #[test]
    fn test_from_json_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"num_paragraphs": 3}}"#).unwrap();
        let config = ProsodyConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.num_paragraphs, 3);
        assert_eq!(config.damping_factor, 0.041);
        assert_eq!(config.rate_table, ProsodyConfig::default().rate_table);
    }

    #[test]
    fn test_from_json_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"num_paragraphs": 0}}"#).unwrap();
        assert!(ProsodyConfig::from_json_file(file.path()).is_err());
    }

    #[test]
    fn test_from_json_file_missing() {
        assert!(ProsodyConfig::from_json_file(Path::new("/nonexistent/prosody.json")).is_err());
    }
}
