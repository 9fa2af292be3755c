//! Tunable constants for drift and probability computations
//!
//! Defaults are 3 % leeway and 111 km per degree. A host can ship a JSON file
//! to override any subset:
//!
//! ```
//! use poisk_core::SarConfig;
//!
//! let cfg = SarConfig::from_json_str(r#"{ "drift": { "leeway_factor": 0.05 } }"#).unwrap();
//! assert_eq!(cfg.drift.leeway_factor, 0.05);
//! assert_eq!(cfg.drift.km_per_degree, 111.0);
//! ```

use crate::error::{Result, SarError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Drift estimator constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Fraction of wind speed transferred to the object (leeway), in [0, 1]
    pub leeway_factor: f64,

    /// Kilometres per degree of latitude for the spherical approximation
    pub km_per_degree: f64,

    /// Below this |cos(latitude)| the longitude delta is treated as undefined
    pub pole_epsilon: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            leeway_factor: 0.03, // IAMSAR rule of thumb for small craft
            km_per_degree: 111.0,
            pole_epsilon: 1e-6,
        }
    }
}

impl DriftConfig {
    /// Check ranges.
    ///
    /// # Errors
    /// Returns [`SarError::Config`] when a value is out of range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.leeway_factor) {
            return Err(SarError::Config(format!(
                "leeway_factor must be in [0, 1], got {}",
                self.leeway_factor
            )));
        }
        if !(self.km_per_degree.is_finite() && self.km_per_degree > 0.0) {
            return Err(SarError::Config(format!(
                "km_per_degree must be positive, got {}",
                self.km_per_degree
            )));
        }
        // Zero would let cos(90°) ≈ 6e-17 through the pole guard
        if !(self.pole_epsilon.is_finite() && self.pole_epsilon > 0.0) {
            return Err(SarError::Config(format!(
                "pole_epsilon must be positive, got {}",
                self.pole_epsilon
            )));
        }
        Ok(())
    }
}

/// Probability field limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Largest grid edge accepted, in cells
    pub max_cells_per_axis: usize,

    /// Largest sampled point count accepted
    pub max_samples: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_cells_per_axis: 4096,
            max_samples: 1_000_000,
        }
    }
}

impl FieldConfig {
    /// Check ranges.
    ///
    /// # Errors
    /// Returns [`SarError::Config`] when a limit is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_cells_per_axis == 0 {
            return Err(SarError::Config("max_cells_per_axis must be > 0".into()));
        }
        if self.max_samples == 0 {
            return Err(SarError::Config("max_samples must be > 0".into()));
        }
        Ok(())
    }
}

/// Complete core configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SarConfig {
    pub drift: DriftConfig,
    pub field: FieldConfig,
}

impl SarConfig {
    /// Parse and validate a JSON configuration. Missing keys take defaults.
    ///
    /// # Errors
    /// Returns [`SarError::Config`] if the JSON is malformed or a value is out of range.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| SarError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a JSON configuration file
    ///
    /// # Errors
    /// Returns [`SarError::Config`] if the file cannot be read or parsed, or a value is out of range.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| SarError::Config(format!("{}: {e}", path.display())))?;
        let cfg = Self::from_json_str(&contents)?;
        debug!(path = %path.display(), ?cfg, "Loaded configuration");
        Ok(cfg)
    }

    /// Validate every section
    ///
    /// # Errors
    /// Returns the first [`SarError::Config`] found.
    pub fn validate(&self) -> Result<()> {
        self.drift.validate()?;
        self.field.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SarConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = SarConfig::from_json_str(r#"{"field":{"max_cells_per_axis":128}}"#).unwrap();
        assert_eq!(cfg.field.max_cells_per_axis, 128);
        assert_eq!(cfg.field.max_samples, 1_000_000);
        assert_eq!(cfg.drift, DriftConfig::default());
    }

    #[test]
    fn test_rejects_bad_leeway() {
        let err = SarConfig::from_json_str(r#"{"drift":{"leeway_factor":1.5}}"#).unwrap_err();
        assert!(matches!(err, SarError::Config(_)));
    }

    #[test]
    fn test_rejects_zero_pole_epsilon() {
        for json in [
            r#"{"drift":{"pole_epsilon":0.0}}"#,
            r#"{"drift":{"pole_epsilon":-1e-6}}"#,
        ] {
            let err = SarConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, SarError::Config(_)));
        }
        let direct = DriftConfig {
            pole_epsilon: 0.0,
            ..DriftConfig::default()
        };
        assert!(direct.validate().is_err());
        assert!(crate::DriftEstimator::new(direct).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            SarConfig::from_json_str("{not json"),
            Err(SarError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("poisk_core_config_test.json");
        fs::write(&path, r#"{"drift":{"km_per_degree":111.32}}"#).unwrap();
        let cfg = SarConfig::load(&path).unwrap();
        assert_eq!(cfg.drift.km_per_degree, 111.32);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(SarConfig::load("/nonexistent/poisk.json").is_err());
    }
}
