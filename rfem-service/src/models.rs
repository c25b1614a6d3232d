use serde::{Deserialize, Serialize};

use mast_model::prelude::{BuildSummary, BuilderConfig, FeaInput, ModelCommand};

/// Build request: an FEA input document and optional configuration overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRequest {
    pub document: FeaInput,
    /// Replaces the service configuration for this request
    #[serde(default)]
    pub config: Option<BuilderConfig>,
    /// Plan only, nothing is sent to the gateway
    #[serde(default)]
    pub dry_run: bool,
}

/// Planned command stream for a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub summary: BuildSummary,
    pub commands: Vec<ModelCommand>,
}

/// Build response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildResponse {
    pub job_id: String,
    pub status: BuildStatus,
    pub summary: Option<BuildSummary>,
    /// Commands accepted by the gateway
    pub submitted: usize,
    pub error_message: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildStatus {
    Submitted,
    DryRun,
}

/// Outcome of sending a plan to the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReport {
    pub job_id: String,
    pub submitted: usize,
    pub elapsed_ms: u64,
}
