//! Structural entities of the tower input document

mod member;
mod node;
mod support;

pub use member::{CrossSectionRef, FrameElement, MemberType};
pub use node::{Node, NodeRef};
pub use support::Support;
