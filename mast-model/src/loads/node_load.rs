//! Node loads - forces applied directly to nodes

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Force vector in global axes (N)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Force {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Force {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Euclidean magnitude of the force
    pub fn magnitude(&self) -> f64 {
        self.as_vector().norm()
    }
}

/// A force applied to a node within a load case
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodalLoad {
    /// Loaded node
    pub node_number: u32,
    /// Applied force
    pub force: Force,
}

impl NodalLoad {
    pub fn new(node_number: u32, x: f64, y: f64, z: f64) -> Self {
        Self {
            node_number,
            force: Force::new(x, y, z),
        }
    }

    /// Whether the resultant force is strictly positive
    pub fn has_force(&self) -> bool {
        self.force.magnitude() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_force_magnitude() {
        assert_relative_eq!(Force::new(3.0, 0.0, 4.0).magnitude(), 5.0);
    }

    #[test]
    fn test_zero_load() {
        assert!(!NodalLoad::new(4, 0.0, 0.0, 0.0).has_force());
        assert!(!NodalLoad::new(4, 0.0, -0.0, 0.0).has_force());
        assert!(NodalLoad::new(4, 0.0, 1e-9, 0.0).has_force());
    }
}
