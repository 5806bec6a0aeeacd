//! Numerical tolerances and optional load effects used by an analysis.

use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;

/// Standard gravity in metres per second squared.
pub const STANDARD_GRAVITY: f64 = 9.806_65;

/// Options controlling a single analysis call.
///
/// Every field has a default, so a JSON document only needs to name the values it
/// overrides.
///
/// # Examples
/// ```
/// use trussfos::AnalysisSettings;
///
/// let settings = AnalysisSettings::from_json_str(r#"{ "max_condition_number": 1e8 }"#).unwrap();
/// assert_eq!(settings.max_condition_number, 1e8);
/// assert!(!settings.include_self_weight);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Members shorter than this many metres are rejected as degenerate.
    pub length_tolerance: f64,
    /// Largest acceptable condition number of the reduced stiffness matrix.
    pub max_condition_number: f64,
    /// Largest acceptable relative residual `|K u - f| / |f|`.
    pub residual_tolerance: f64,
    /// Member forces below this fraction of the largest member force count as zero.
    pub force_tolerance: f64,
    /// Apply half of each member's weight to each of its joints along -Y.
    pub include_self_weight: bool,
    /// Gravitational acceleration used for self weight.
    pub gravity: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            length_tolerance: 1.0e-9,
            max_condition_number: 1.0e10,
            residual_tolerance: 1.0e-6,
            force_tolerance: 1.0e-9,
            include_self_weight: false,
            gravity: STANDARD_GRAVITY,
        }
    }
}

impl AnalysisSettings {
    /// Parse settings from JSON, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] for malformed JSON and
    /// [`SettingsError::OutOfRange`] when a tolerance is not positive.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that every tolerance and limit is positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::OutOfRange`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, value) in [
            ("length_tolerance", self.length_tolerance),
            ("max_condition_number", self.max_condition_number),
            ("residual_tolerance", self.residual_tolerance),
            ("force_tolerance", self.force_tolerance),
            ("gravity", self.gravity),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SettingsError::OutOfRange { name, value });
            }
        }
        Ok(())
    }

    /// Enable or disable member self weight.
    #[must_use]
    pub fn with_self_weight(mut self, include: bool) -> Self {
        self.include_self_weight = include;
        self
    }

    /// Set the condition number above which a solve is rejected.
    #[must_use]
    pub fn with_max_condition_number(mut self, limit: f64) -> Self {
        self.max_condition_number = limit;
        self
    }

    /// Set the minimum member length.
    #[must_use]
    pub fn with_length_tolerance(mut self, tolerance: f64) -> Self {
        self.length_tolerance = tolerance;
        self
    }

    /// Set the relative force magnitude treated as zero.
    #[must_use]
    pub fn with_force_tolerance(mut self, tolerance: f64) -> Self {
        self.force_tolerance = tolerance;
        self
    }
}
