//! FEA output document - per load case results exported after analysis

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{BuildError, BuildResult};

/// Results of one load case.
///
/// Displacements and internal forces are keyed by node/member number as text.
/// Their values are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadCaseResult {
    pub load_case_id: String,
    #[serde(default)]
    pub node_displacements: BTreeMap<String, Value>,
    #[serde(default)]
    pub internal_forces: BTreeMap<String, Value>,
}

/// Complete FEA output document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeaOutput {
    #[serde(default)]
    pub fea_load_case_results: Vec<LoadCaseResult>,
}

impl FeaOutput {
    pub fn load(path: impl AsRef<Path>) -> BuildResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn from_json_str(json: &str) -> BuildResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// First result block with the given load case id
    pub fn load_case(&self, load_case_id: &str) -> BuildResult<&LoadCaseResult> {
        self.fea_load_case_results
            .iter()
            .find(|r| r.load_case_id == load_case_id)
            .ok_or_else(|| BuildError::LoadCaseNotFound(load_case_id.to_string()))
    }

    /// Displacement record of a node, if the load case reports one
    pub fn node_displacement(&self, load_case_id: &str, node: &str) -> BuildResult<Option<&Value>> {
        Ok(self.load_case(load_case_id)?.node_displacements.get(node))
    }

    /// Internal force record of a member, if the load case reports one
    pub fn internal_forces(&self, load_case_id: &str, member: &str) -> BuildResult<Option<&Value>> {
        Ok(self.load_case(load_case_id)?.internal_forces.get(member))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> FeaOutput {
        FeaOutput::from_json_str(
            &json!({
                "fea_load_case_results": [
                    {
                        "load_case_id": "C1",
                        "node_displacements": {"94": {"x": 0.0, "y": 0.0, "z": 0.0}},
                        "internal_forces": {}
                    },
                    {
                        "load_case_id": "C37",
                        "node_displacements": {"94": {"x": 0.012, "y": -0.003, "z": 0.0}},
                        "internal_forces": {"1": {"N": -1520.5}}
                    }
                ]
            })
            .to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_by_load_case() {
        let output = sample();
        let disp = output.node_displacement("C37", "94").unwrap().unwrap();
        assert_eq!(disp["x"], json!(0.012));
        let forces = output.internal_forces("C37", "1").unwrap().unwrap();
        assert_eq!(forces["N"], json!(-1520.5));
    }

    #[test]
    fn test_missing_entries() {
        let output = sample();
        assert!(output.internal_forces("C1", "1").unwrap().is_none());
        assert!(matches!(
            output.node_displacement("C99", "94"),
            Err(BuildError::LoadCaseNotFound(id)) if id == "C99"
        ));
    }
}
