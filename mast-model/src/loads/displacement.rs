//! Predefined (imposed) node displacements

use serde::{Deserialize, Serialize};

use crate::config::AxisConvention;

/// A prescribed displacement of a node, applied in every load case
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredefinedNodeDisplacement {
    pub node_number: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PredefinedNodeDisplacement {
    pub fn new(node_number: u32, x: f64, y: f64, z: f64) -> Self {
        Self { node_number, x, y, z }
    }

    /// Imposed deformation parameters [UX, UY, UZ, PHI_X, PHI_Y, PHI_Z] in
    /// the target model's axes; rotations are never imposed.
    pub fn parameters(&self, convention: &AxisConvention) -> [f64; 6] {
        let [ux, uy, uz] = convention.vector(self.x, self.y, self.z);
        [ux, uy, uz, 0.0, 0.0, 0.0]
    }
}
