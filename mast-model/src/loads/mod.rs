//! Load cases and the loads they carry

mod displacement;
mod load_case;
mod node_load;

pub use displacement::PredefinedNodeDisplacement;
pub use load_case::LoadCase;
pub use node_load::{Force, NodalLoad};
