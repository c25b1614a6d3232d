//! Mast Model - build RFEM models from tower FEA input documents
//!
//! This library translates the JSON intermediate format produced for lattice
//! towers and guyed masts into an ordered stream of model construction
//! commands:
//! - Nodes, with an explicit axis convention
//! - Sections, deduplicated by cross-section name and relabelled through a catalog
//! - Frame members and guy-wire cables
//! - Nodal supports
//! - Load cases with self-weight, nodal loads and imposed deformations
//!
//! The commands go to a [`session::ModelSession`]; the analysis itself runs in
//! the FEA application behind it.
//!
//! ## Example
//! ```rust
//! use mast_model::prelude::*;
//!
//! let mut input = FeaInput::default();
//! input
//!     .add_node(Node::new(1, 0.0, 0.0, 0.0))
//!     .add_node(Node::new(2, 5.0, 0.0, 0.0))
//!     .add_element(FrameElement::frame(1, 1, 2, "D32"))
//!     .add_support(Support::at(1))
//!     .add_load_case(LoadCase::new(1, "Name1").with_load(NodalLoad::new(2, 1000.0, 0.0, 0.0)));
//!
//! let builder = ModelBuilder::new(BuilderConfig::default());
//! let mut session = RecordingSession::new();
//! let summary = builder.build_model(&input, &mut session).unwrap();
//!
//! assert_eq!(summary.sections[0].label, "R 32");
//! assert_eq!(session.count(CommandKind::NodalLoad), 1);
//! ```

pub mod builder;
pub mod commands;
pub mod config;
pub mod elements;
pub mod error;
pub mod loads;
pub mod model;
pub mod results;
pub mod sections;
pub mod session;
pub mod validation;

// Re-export common types
pub mod prelude {
    pub use crate::builder::{BuildSummary, LoadCounter, ModelBuilder};
    pub use crate::commands::{
        AnalysisKind, BaseSettings, CommandKind, ModelCommand, SelfWeight, SupportType,
    };
    pub use crate::config::{AxisConvention, BuilderConfig, LoadNumbering};
    pub use crate::elements::{FrameElement, MemberType, Node, NodeRef, Support};
    pub use crate::error::{BuildError, BuildResult};
    pub use crate::loads::{Force, LoadCase, NodalLoad, PredefinedNodeDisplacement};
    pub use crate::model::{FeaInput, TowerInput};
    pub use crate::results::{FeaOutput, LoadCaseResult};
    pub use crate::sections::{SectionCatalog, SectionRegistry};
    pub use crate::session::{ModelSession, RecordingSession};
    pub use crate::validation::validate_document;
}
