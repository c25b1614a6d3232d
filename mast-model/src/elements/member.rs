//! Frame elements - frame members and guy wires between two nodes

use serde::{Deserialize, Serialize};

use super::NodeRef;

/// Kind of structural member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberType {
    /// Beam/column carrying bending, built as a two-node member
    Frame,
    /// Guy wire, built as a cable member
    GuyWire,
}

impl MemberType {
    pub fn is_cable(&self) -> bool {
        matches!(self, MemberType::GuyWire)
    }
}

/// Cross-section reference by engineering name (e.g. "D32")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrossSectionRef {
    pub name: String,
}

/// A frame element of the tower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameElement {
    /// Member number, unique within the document
    pub member_number: u32,
    /// Frame or guy wire
    pub member_type: MemberType,
    /// Start node
    pub start_node: NodeRef,
    /// End node
    pub end_node: NodeRef,
    /// Cross-section used along the whole member
    pub cross_section: CrossSectionRef,
}

impl FrameElement {
    /// Create a frame member between two nodes
    pub fn frame(member_number: u32, start: u32, end: u32, section: &str) -> Self {
        Self {
            member_number,
            member_type: MemberType::Frame,
            start_node: start.into(),
            end_node: end.into(),
            cross_section: CrossSectionRef {
                name: section.to_string(),
            },
        }
    }

    /// Create a guy wire between two nodes
    pub fn guy_wire(member_number: u32, start: u32, end: u32, section: &str) -> Self {
        Self {
            member_type: MemberType::GuyWire,
            ..Self::frame(member_number, start, end, section)
        }
    }

    /// Name of the cross-section
    pub fn section_name(&self) -> &str {
        &self.cross_section.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_guy_wire() {
        let json = r#"{
            "member_number": 12,
            "member_type": "GuyWire",
            "start_node": {"number": 3},
            "end_node": {"number": 40},
            "cross_section": {"name": "SWR_1x7_D9", "area": 0.00005}
        }"#;
        let element: FrameElement = serde_json::from_str(json).unwrap();
        assert!(element.member_type.is_cable());
        assert_eq!(element.section_name(), "SWR_1x7_D9");
        assert_eq!(element, FrameElement::guy_wire(12, 3, 40, "SWR_1x7_D9"));
    }

    #[test]
    fn test_unknown_member_type_is_rejected() {
        let json = r#"{
            "member_number": 1,
            "member_type": "Truss",
            "start_node": {"number": 1},
            "end_node": {"number": 2},
            "cross_section": {"name": "D32"}
        }"#;
        assert!(serde_json::from_str::<FrameElement>(json).is_err());
    }
}
