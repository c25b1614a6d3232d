//! Node element - a numbered point in 3D space

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A tower node as found in the input document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node number, unique within the document
    pub number: u32,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(number: u32, x: f64, y: f64, z: f64) -> Self {
        Self { number, x, y, z }
    }

    /// Get the coordinates as a vector
    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// Reference to a node from another entity.
///
/// Documents embed the whole node object here; only the number is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    pub number: u32,
}

impl From<u32> for NodeRef {
    fn from(number: u32) -> Self {
        Self { number }
    }
}
