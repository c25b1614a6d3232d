//! FEA input document - the tower and its load cases

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::elements::{FrameElement, Node, Support};
use crate::error::BuildResult;
use crate::loads::{LoadCase, PredefinedNodeDisplacement};

/// Tower geometry, members and supports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TowerInput {
    pub nodes: Vec<Node>,
    pub frame_elements: Vec<FrameElement>,
    #[serde(default)]
    pub tower_supports: Vec<Support>,
    /// Imposed displacements, applied in every load case
    #[serde(default)]
    pub predefined_node_displacements: Vec<PredefinedNodeDisplacement>,
}

/// Complete FEA input document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeaInput {
    pub fea_input_tower: TowerInput,
    #[serde(default)]
    pub fea_load_cases: Vec<LoadCase>,
}

impl FeaInput {
    /// Read and parse a document from disk
    pub fn load(path: impl AsRef<Path>) -> BuildResult<Self> {
        let path = path.as_ref();
        log::info!("Reading FEA input from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Parse a document from a JSON string
    pub fn from_json_str(json: &str) -> BuildResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn tower(&self) -> &TowerInput {
        &self.fea_input_tower
    }

    pub fn load_cases(&self) -> &[LoadCase] {
        &self.fea_load_cases
    }

    // Builder-style helpers, mostly for assembling documents in code

    pub fn add_node(&mut self, node: Node) -> &mut Self {
        self.fea_input_tower.nodes.push(node);
        self
    }

    pub fn add_element(&mut self, element: FrameElement) -> &mut Self {
        self.fea_input_tower.frame_elements.push(element);
        self
    }

    pub fn add_support(&mut self, support: Support) -> &mut Self {
        self.fea_input_tower.tower_supports.push(support);
        self
    }

    pub fn add_displacement(&mut self, displacement: PredefinedNodeDisplacement) -> &mut Self {
        self.fea_input_tower
            .predefined_node_displacements
            .push(displacement);
        self
    }

    pub fn add_load_case(&mut self, case: LoadCase) -> &mut Self {
        self.fea_load_cases.push(case);
        self
    }
}
