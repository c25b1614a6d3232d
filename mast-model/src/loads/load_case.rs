//! Load cases

use serde::{Deserialize, Serialize};

use super::NodalLoad;

/// A load case groups self-weight and nodal loads under a common number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    /// Load case number, unique within the document
    pub number: u32,
    /// Name of the load case
    pub name: String,
    /// Gravitational constant in mm/s² (0.0 disables self-weight)
    #[serde(default, alias = "gravitional_constant")]
    pub gravitational_constant: f64,
    /// Nodal loads of this case, in document order
    #[serde(default)]
    pub nodal_loads: Vec<NodalLoad>,
}

impl LoadCase {
    /// Create a load case without self-weight or loads
    pub fn new(number: u32, name: &str) -> Self {
        Self {
            number,
            name: name.to_string(),
            gravitational_constant: 0.0,
            nodal_loads: Vec::new(),
        }
    }

    /// Set the gravitational constant
    pub fn with_gravity(mut self, gravitational_constant: f64) -> Self {
        self.gravitational_constant = gravitational_constant;
        self
    }

    /// Add a nodal load
    pub fn with_load(mut self, load: NodalLoad) -> Self {
        self.nodal_loads.push(load);
        self
    }
}
