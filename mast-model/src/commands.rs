//! Model construction commands understood by the FEA application gateway

use serde::{Deserialize, Serialize};

/// Nodal support restraint types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportType {
    /// Translations restrained, rotations free
    #[default]
    Hinged,
    /// All DOFs restrained
    Fixed,
}

/// Static analysis settings kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    #[default]
    GeometricallyLinear,
    LargeDeformation,
}

/// Global axes orientation of the target model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxesOrientation {
    #[default]
    ZUp,
    ZDown,
}

/// Self-weight of a load case.
///
/// `factors` holds the direction factors in global X, Y and Z.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SelfWeight {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors: Option<[f64; 3]>,
}

impl SelfWeight {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            factors: None,
        }
    }

    /// Self-weight acting along global Z with the given factor
    pub fn along_z(factor: f64) -> Self {
        Self {
            enabled: true,
            factors: Some([0.0, 0.0, factor]),
        }
    }

    /// Z direction factor, 0.0 when disabled
    pub fn z_factor(&self) -> f64 {
        self.factors.map_or(0.0, |f| f[2])
    }
}

/// Model-wide base settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseSettings {
    /// Gravitational acceleration (m/s²)
    pub gravitational_acceleration: f64,
    pub global_axes_orientation: AxesOrientation,
    pub local_axes_orientation: AxesOrientation,
    /// Tolerances for nodes, lines, surfaces and directions
    pub tolerances: [f64; 4],
}

impl Default for BaseSettings {
    fn default() -> Self {
        Self {
            gravitational_acceleration: 9.81,
            global_axes_orientation: AxesOrientation::ZUp,
            local_axes_orientation: AxesOrientation::ZDown,
            tolerances: [0.0005; 4],
        }
    }
}

/// A single model construction command.
///
/// Commands are applied in the order they are emitted; numbering is that of
/// the target model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ModelCommand {
    BeginModification {
        model_name: String,
    },
    BaseSettings(BaseSettings),
    CreateNode {
        no: u32,
        x: f64,
        y: f64,
        z: f64,
    },
    CreateMaterial {
        no: u32,
        name: String,
    },
    CreateSection {
        no: u32,
        name: String,
        comment: String,
    },
    CreateMember {
        no: u32,
        start_node: u32,
        end_node: u32,
        rotation_angle: f64,
        start_section: u32,
        end_section: u32,
    },
    CreateCableMember {
        no: u32,
        start_node: u32,
        end_node: u32,
        section: u32,
    },
    CreateNodalSupport {
        no: u32,
        nodes: String,
        support_type: SupportType,
    },
    CreateLoadCase {
        no: u32,
        name: String,
        self_weight: SelfWeight,
    },
    CreateNodalLoad {
        no: u32,
        load_case: u32,
        nodes: String,
        /// [FX, FY, FZ, MX, MY, MZ]
        components: [f64; 6],
    },
    CreateImposedNodalDeformation {
        no: u32,
        load_case: u32,
        node: String,
        /// [UX, UY, UZ, PHI_X, PHI_Y, PHI_Z]
        parameters: [f64; 6],
    },
    CreateStaticAnalysisSettings {
        no: u32,
        name: String,
        kind: AnalysisKind,
    },
    CalculateAll,
    FinishModification,
}

/// Discriminant of a command, for counting and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandKind {
    BeginModification,
    BaseSettings,
    Node,
    Material,
    Section,
    Member,
    CableMember,
    NodalSupport,
    LoadCase,
    NodalLoad,
    ImposedNodalDeformation,
    StaticAnalysisSettings,
    CalculateAll,
    FinishModification,
}

impl ModelCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            ModelCommand::BeginModification { .. } => CommandKind::BeginModification,
            ModelCommand::BaseSettings(_) => CommandKind::BaseSettings,
            ModelCommand::CreateNode { .. } => CommandKind::Node,
            ModelCommand::CreateMaterial { .. } => CommandKind::Material,
            ModelCommand::CreateSection { .. } => CommandKind::Section,
            ModelCommand::CreateMember { .. } => CommandKind::Member,
            ModelCommand::CreateCableMember { .. } => CommandKind::CableMember,
            ModelCommand::CreateNodalSupport { .. } => CommandKind::NodalSupport,
            ModelCommand::CreateLoadCase { .. } => CommandKind::LoadCase,
            ModelCommand::CreateNodalLoad { .. } => CommandKind::NodalLoad,
            ModelCommand::CreateImposedNodalDeformation { .. } => {
                CommandKind::ImposedNodalDeformation
            }
            ModelCommand::CreateStaticAnalysisSettings { .. } => {
                CommandKind::StaticAnalysisSettings
            }
            ModelCommand::CalculateAll => CommandKind::CalculateAll,
            ModelCommand::FinishModification => CommandKind::FinishModification,
        }
    }
}
