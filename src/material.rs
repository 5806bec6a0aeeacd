//! Isotropic material properties and a small built-in library.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::errors::MemberPropertyError;

/// Linear elastic material with a yield strength and density.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Human readable identifier.
    pub name: Cow<'static, str>,
    /// Mass density in kilograms per cubic metre.
    pub density: f64,
    /// Young's modulus in pascals.
    pub elastic_modulus: f64,
    /// Yield strength in pascals.
    pub yield_strength: f64,
}

impl Material {
    /// ASTM A36 structural steel.
    pub const A36_STEEL: Self = Self {
        name: Cow::Borrowed("A36_Steel"),
        density: 7800.0,
        elastic_modulus: 200.0e9,
        yield_strength: 250.0e6,
    };

    /// ASTM A992 structural steel.
    pub const A992_STEEL: Self = Self {
        name: Cow::Borrowed("A992_Steel"),
        density: 7800.0,
        elastic_modulus: 200.0e9,
        yield_strength: 345.0e6,
    };

    /// 6061-T6 aluminium alloy.
    pub const ALUMINUM_6061_T6: Self = Self {
        name: Cow::Borrowed("6061_T6_Aluminum"),
        density: 2700.0,
        elastic_modulus: 68.9e9,
        yield_strength: 276.0e6,
    };

    /// Every built-in material.
    pub const LIBRARY: [Self; 3] = [Self::A36_STEEL, Self::A992_STEEL, Self::ALUMINUM_6061_T6];

    /// Look up a built-in material by name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        Self::LIBRARY
            .iter()
            .find(|material| material.name == name)
            .cloned()
    }

    /// Check that every property is strictly positive and finite.
    ///
    /// # Errors
    ///
    /// Returns the first offending property as a [`MemberPropertyError`].
    pub fn validate(&self) -> Result<(), MemberPropertyError> {
        if !is_positive(self.elastic_modulus) {
            return Err(MemberPropertyError::NonPositiveElasticModulus(
                self.elastic_modulus,
            ));
        }
        if !is_positive(self.yield_strength) {
            return Err(MemberPropertyError::NonPositiveYieldStrength(
                self.yield_strength,
            ));
        }
        if !is_positive(self.density) {
            return Err(MemberPropertyError::NonPositiveDensity(self.density));
        }
        Ok(())
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::A36_STEEL
    }
}

/// Strictly positive and finite.
fn is_positive(value: f64) -> bool {
    value > 0.0 && value.is_finite()
}
