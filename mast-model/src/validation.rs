//! Reference and numbering checks on an input document

use std::collections::HashSet;

use crate::error::{BuildError, BuildResult};
use crate::model::FeaInput;

fn check_unique(kind: &'static str, numbers: impl IntoIterator<Item = u32>) -> BuildResult<()> {
    let mut seen = HashSet::new();
    for number in numbers {
        if !seen.insert(number) {
            return Err(BuildError::DuplicateNumber { kind, number });
        }
    }
    Ok(())
}

/// Check that entity numbers are unique per class and that every node
/// reference resolves.
///
/// Stops at the first problem found, in document order: nodes, members,
/// supports, load cases, then references.
pub fn validate_document(input: &FeaInput) -> BuildResult<()> {
    let tower = input.tower();

    check_unique("node", tower.nodes.iter().map(|n| n.number))?;
    check_unique("member", tower.frame_elements.iter().map(|e| e.member_number))?;
    check_unique("support", tower.tower_supports.iter().map(|s| s.node.number))?;
    check_unique("load case", input.load_cases().iter().map(|c| c.number))?;

    let nodes: HashSet<u32> = tower.nodes.iter().map(|n| n.number).collect();
    let require = |number: u32| {
        if nodes.contains(&number) {
            Ok(())
        } else {
            Err(BuildError::NodeNotFound(number))
        }
    };

    for element in &tower.frame_elements {
        require(element.start_node.number)?;
        require(element.end_node.number)?;
    }
    for support in &tower.tower_supports {
        require(support.node.number)?;
    }
    for displacement in &tower.predefined_node_displacements {
        require(displacement.node_number)?;
    }
    for case in input.load_cases() {
        for load in &case.nodal_loads {
            require(load.node_number)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{FrameElement, Node, Support};
    use crate::loads::{LoadCase, NodalLoad, PredefinedNodeDisplacement};

    fn two_nodes() -> FeaInput {
        let mut input = FeaInput::default();
        input
            .add_node(Node::new(1, 0.0, 0.0, 0.0))
            .add_node(Node::new(2, 5.0, 0.0, 0.0))
            .add_element(FrameElement::frame(1, 1, 2, "D32"))
            .add_support(Support::at(1));
        input
    }

    #[test]
    fn test_valid_document() {
        assert!(validate_document(&two_nodes()).is_ok());
    }

    #[test]
    fn test_duplicate_node() {
        let mut input = two_nodes();
        input.add_node(Node::new(2, 0.0, 1.0, 0.0));
        assert!(matches!(
            validate_document(&input),
            Err(BuildError::DuplicateNumber { kind: "node", number: 2 })
        ));
    }

    #[test]
    fn test_duplicate_member() {
        let mut input = two_nodes();
        input.add_element(FrameElement::guy_wire(1, 2, 1, "SWR_1x7_D9"));
        assert!(matches!(
            validate_document(&input),
            Err(BuildError::DuplicateNumber { kind: "member", number: 1 })
        ));
    }

    #[test]
    fn test_dangling_references() {
        let mut input = two_nodes();
        input.add_element(FrameElement::frame(2, 2, 3, "D32"));
        assert!(matches!(validate_document(&input), Err(BuildError::NodeNotFound(3))));

        let mut input = two_nodes();
        input.add_load_case(LoadCase::new(1, "C1").with_load(NodalLoad::new(9, 1.0, 0.0, 0.0)));
        assert!(matches!(validate_document(&input), Err(BuildError::NodeNotFound(9))));

        let mut input = two_nodes();
        input.add_displacement(PredefinedNodeDisplacement::new(4, 0.0, 0.0, 0.01));
        assert!(matches!(validate_document(&input), Err(BuildError::NodeNotFound(4))));
    }
}
