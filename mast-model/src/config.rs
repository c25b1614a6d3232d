//! Builder configuration: conventions, catalog and fixed model settings

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::commands::{AnalysisKind, BaseSettings, SelfWeight, SupportType};
use crate::error::{BuildError, BuildResult};
use crate::sections::SectionCatalog;

/// Gravitational constant of the input documents (mm/s²) giving a factor of 1
pub const STANDARD_GRAVITY_MM: f64 = 9810.0;

/// Axis and sign convention between the input document and the target model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "AxisConventionRepr")]
pub struct AxisConvention {
    /// Negate node Z coordinates
    pub flip_node_z: bool,
    /// Negate X components of forces and imposed displacements
    pub flip_force_x: bool,
    /// Negate Z components of forces and imposed displacements
    pub flip_force_z: bool,
    /// Self-weight factor = gravitational constant / divisor
    pub gravity_divisor: f64,
}

impl AxisConvention {
    /// Document axes used as-is, Z pointing up
    pub fn z_up() -> Self {
        Self {
            flip_node_z: false,
            flip_force_x: false,
            flip_force_z: false,
            gravity_divisor: STANDARD_GRAVITY_MM,
        }
    }

    /// Z pointing down in the target model: node Z and force X/Z negated
    pub fn z_down() -> Self {
        Self {
            flip_node_z: true,
            flip_force_x: true,
            flip_force_z: true,
            gravity_divisor: -STANDARD_GRAVITY_MM,
        }
    }

    pub fn node_z(&self, z: f64) -> f64 {
        if self.flip_node_z {
            -z
        } else {
            z
        }
    }

    /// Apply the component flips to a vector given in document axes
    pub fn vector(&self, x: f64, y: f64, z: f64) -> [f64; 3] {
        [
            if self.flip_force_x { -x } else { x },
            y,
            if self.flip_force_z { -z } else { z },
        ]
    }

    /// Self-weight for a load case gravitational constant
    pub fn self_weight(&self, gravitational_constant: f64) -> SelfWeight {
        if gravitational_constant == 0.0 {
            SelfWeight::disabled()
        } else {
            SelfWeight::along_z(gravitational_constant / self.gravity_divisor)
        }
    }
}

impl Default for AxisConvention {
    fn default() -> Self {
        Self::z_up()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum ConventionPreset {
    ZUp,
    ZDown,
}

#[derive(Deserialize)]
struct ExplicitConvention {
    #[serde(default)]
    flip_node_z: bool,
    #[serde(default)]
    flip_force_x: bool,
    #[serde(default)]
    flip_force_z: bool,
    #[serde(default = "default_divisor")]
    gravity_divisor: f64,
}

fn default_divisor() -> f64 {
    STANDARD_GRAVITY_MM
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AxisConventionRepr {
    Preset(ConventionPreset),
    Explicit(ExplicitConvention),
}

impl From<AxisConventionRepr> for AxisConvention {
    fn from(repr: AxisConventionRepr) -> Self {
        match repr {
            AxisConventionRepr::Preset(ConventionPreset::ZUp) => Self::z_up(),
            AxisConventionRepr::Preset(ConventionPreset::ZDown) => Self::z_down(),
            AxisConventionRepr::Explicit(e) => Self {
                flip_node_z: e.flip_node_z,
                flip_force_x: e.flip_force_x,
                flip_force_z: e.flip_force_z,
                gravity_divisor: e.gravity_divisor,
            },
        }
    }
}

/// How generated nodal load numbers advance across load cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadNumbering {
    /// One counter for the whole document
    #[default]
    Shared,
    /// Counter restarts at 1 in every load case
    PerLoadCase,
}

/// The single material assigned to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialSpec {
    pub no: u32,
    pub name: String,
}

impl Default for MaterialSpec {
    fn default() -> Self {
        Self {
            no: 1,
            name: "S235".to_string(),
        }
    }
}

/// Static analysis settings created after the load cases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSpec {
    pub no: u32,
    pub name: String,
    pub kind: AnalysisKind,
}

impl AnalysisSpec {
    pub fn linear() -> Self {
        Self {
            no: 1,
            name: "Linear".to_string(),
            kind: AnalysisKind::GeometricallyLinear,
        }
    }

    pub fn large_deformation() -> Self {
        Self {
            no: 3,
            name: "LargeDeformation".to_string(),
            kind: AnalysisKind::LargeDeformation,
        }
    }
}

impl Default for AnalysisSpec {
    fn default() -> Self {
        Self::linear()
    }
}

/// Complete builder configuration.
///
/// Every field has a default, so a config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub model_name: String,
    pub axis_convention: AxisConvention,
    pub section_catalog: SectionCatalog,
    pub support_type: SupportType,
    pub material: MaterialSpec,
    pub analysis: AnalysisSpec,
    pub base_settings: Option<BaseSettings>,
    pub load_numbering: LoadNumbering,
    /// Trigger all analyses before finishing the modification
    pub calculate_all: bool,
    /// Check node references before emitting any command
    pub validate_references: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            model_name: "mast_model".to_string(),
            axis_convention: AxisConvention::default(),
            section_catalog: SectionCatalog::default(),
            support_type: SupportType::Hinged,
            material: MaterialSpec::default(),
            analysis: AnalysisSpec::default(),
            base_settings: None,
            load_numbering: LoadNumbering::Shared,
            calculate_all: true,
            validate_references: true,
        }
    }
}

impl BuilderConfig {
    /// Settings of the guyed mast script: z-up axes, base settings,
    /// large deformation analysis
    pub fn guyed_mast() -> Self {
        Self {
            model_name: "guyed_mast_example".to_string(),
            base_settings: Some(BaseSettings::default()),
            analysis: AnalysisSpec::large_deformation(),
            calculate_all: false,
            ..Self::default()
        }
    }

    /// Settings of the lattice tower script: z-down axes, linear analysis
    pub fn lattice_tower() -> Self {
        Self {
            model_name: "lattice_example_rfem".to_string(),
            axis_convention: AxisConvention::z_down(),
            ..Self::default()
        }
    }

    pub fn load(path: impl AsRef<Path>) -> BuildResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn from_json_str(json: &str) -> BuildResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BuildResult<()> {
        let divisor = self.axis_convention.gravity_divisor;
        if divisor == 0.0 || !divisor.is_finite() {
            return Err(BuildError::InvalidConfig(format!(
                "gravity divisor must be finite and non-zero, got {}",
                divisor
            )));
        }
        if self.material.no == 0 {
            return Err(BuildError::InvalidConfig(
                "material number must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_self_weight_factor() {
        let up = AxisConvention::z_up().self_weight(9810.0);
        assert!(up.enabled);
        assert_relative_eq!(up.z_factor(), 1.0);

        let down = AxisConvention::z_down().self_weight(4905.0);
        assert_relative_eq!(down.z_factor(), -0.5);

        assert_eq!(AxisConvention::z_up().self_weight(0.0), SelfWeight::disabled());
    }

    #[test]
    fn test_z_down_flips() {
        let c = AxisConvention::z_down();
        assert_eq!(c.node_z(12.5), -12.5);
        assert_eq!(c.vector(1.0, 2.0, 3.0), [-1.0, 2.0, -3.0]);
        assert_eq!(AxisConvention::z_up().vector(1.0, 2.0, 3.0), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_convention_presets_and_explicit() {
        let config = BuilderConfig::from_json_str(r#"{"axis_convention": "z_down"}"#).unwrap();
        assert_eq!(config.axis_convention, AxisConvention::z_down());

        let config =
            BuilderConfig::from_json_str(r#"{"axis_convention": {"flip_node_z": true}}"#).unwrap();
        assert!(config.axis_convention.flip_node_z);
        assert!(!config.axis_convention.flip_force_x);
        assert_eq!(config.axis_convention.gravity_divisor, 9810.0);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = BuilderConfig::from_json_str(
            r#"{"support_type": "fixed", "load_numbering": "per_load_case"}"#,
        )
        .unwrap();
        assert_eq!(config.support_type, SupportType::Fixed);
        assert_eq!(config.load_numbering, LoadNumbering::PerLoadCase);
        assert_eq!(config.material, MaterialSpec::default());
        assert_eq!(config.section_catalog.label_for("D14"), "R 14");
        assert!(config.validate_references);
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let err = BuilderConfig::from_json_str(r#"{"axis_convention": {"gravity_divisor": 0.0}}"#)
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidConfig(_)));
    }
}
