use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use uuid::Uuid;

use mast_model::prelude::{
    BuildResult, BuildSummary, FeaInput, ModelBuilder, ModelCommand, RecordingSession,
};

use crate::models::SubmissionReport;

/// Build the full command stream for a document without contacting the gateway
pub fn plan_build(builder: &ModelBuilder, input: &FeaInput) -> BuildResult<(BuildSummary, Vec<ModelCommand>)> {
    let mut session = RecordingSession::new();
    let summary = builder.build_model(input, &mut session)?;
    Ok((summary, session.into_commands()))
}

/// Sends planned commands to the model gateway of the FEA application
pub struct RemoteExecutor {
    base_url: String,
    client: reqwest::Client,
}

/// Upper bound for the gateway health probe
const HEALTH_TIMEOUT: Duration = Duration::from_secs(2);

impl RemoteExecutor {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ExecutorError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExecutorError::Http(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn from_env() -> Result<Self, ExecutorError> {
        Self::new(
            crate::settings::resolve_gateway_url(),
            crate::settings::resolve_gateway_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the gateway answers its health endpoint
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).timeout(HEALTH_TIMEOUT).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Gateway health check failed: {}", e);
                false
            }
        }
    }

    /// Submit commands one at a time, in order.
    ///
    /// Stops at the first rejected command; commands before it stay applied
    /// in the remote model.
    pub async fn submit_plan(&self, commands: &[ModelCommand]) -> Result<SubmissionReport, ExecutorError> {
        let job_id = Uuid::new_v4();
        let started = Instant::now();
        let url = format!("{}/api/v1/commands", self.base_url);

        tracing::info!("Submitting {} commands for job {} to {}", commands.len(), job_id, url);
        Self::maybe_export_plan(commands, &job_id);

        for (index, command) in commands.iter().enumerate() {
            let response = self
                .client
                .post(&url)
                .header("x-job-id", job_id.to_string())
                .json(command)
                .send()
                .await
                .map_err(|e| ExecutorError::Http(format!("Failed to send command {}: {}", index, e)))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                tracing::error!("Gateway rejected command {} ({:?}): {} {}", index, command.kind(), status, body);
                return Err(ExecutorError::Gateway {
                    index,
                    status: status.as_u16(),
                    body,
                });
            }
            tracing::debug!("Command {} accepted: {:?}", index, command.kind());
        }

        let elapsed_ms = started.elapsed().as_millis() as u64;
        tracing::info!("Job {} submitted in {} ms", job_id, elapsed_ms);
        Ok(SubmissionReport {
            job_id: job_id.to_string(),
            submitted: commands.len(),
            elapsed_ms,
        })
    }

    fn maybe_export_plan(commands: &[ModelCommand], job_id: &Uuid) {
        if let Ok(dest_dir) = std::env::var("MAST_PLAN_EXPORT") {
            match export_plan(Path::new(&dest_dir), commands, job_id) {
                Ok(path) => tracing::info!("Exported plan to {:?}", path),
                Err(err) => tracing::warn!("Failed to export plan to {:?}: {}", dest_dir, err),
            }
        }
    }
}

/// Write a plan as pretty JSON into `dest_dir`, returning the file path
pub fn export_plan(dest_dir: &Path, commands: &[ModelCommand], job_id: &Uuid) -> Result<PathBuf, ExecutorError> {
    fs::create_dir_all(dest_dir).map_err(|e| ExecutorError::Io(e.to_string()))?;
    let dest_file = dest_dir.join(format!("plan_{}.json", job_id));
    let json = serde_json::to_string_pretty(commands).map_err(|e| ExecutorError::Io(e.to_string()))?;
    fs::write(&dest_file, json).map_err(|e| ExecutorError::Io(e.to_string()))?;
    Ok(dest_file)
}

#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Gateway rejected command {index} with status {status}: {body}")]
    Gateway { index: usize, status: u16, body: String },
    #[error("IO error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use mast_model::prelude::{BuilderConfig, CommandKind, FrameElement, Node, Support};
    use std::sync::{Arc, Mutex};

    /// Gateway stand-in that records every command and rejects the one at `reject_at`
    async fn spawn_gateway(reject_at: usize) -> (String, Arc<Mutex<Vec<ModelCommand>>>) {
        let received: Arc<Mutex<Vec<ModelCommand>>> = Arc::new(Mutex::new(Vec::new()));

        async fn accept(
            State((received, reject_at)): State<(Arc<Mutex<Vec<ModelCommand>>>, usize)>,
            Json(command): Json<ModelCommand>,
        ) -> StatusCode {
            let mut received = received.lock().unwrap();
            received.push(command);
            if received.len() - 1 == reject_at {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::OK
            }
        }

        let app = Router::new()
            .route("/api/v1/commands", post(accept))
            .with_state((received.clone(), reject_at));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), received)
    }

    fn numbered_nodes(count: u32) -> Vec<ModelCommand> {
        (1..=count)
            .map(|no| ModelCommand::CreateNode {
                no,
                x: 0.0,
                y: 0.0,
                z: no as f64,
            })
            .collect()
    }

    #[test]
    fn test_plan_build_frames_the_model() {
        let mut input = FeaInput::default();
        input
            .add_node(Node::new(1, 0.0, 0.0, 0.0))
            .add_node(Node::new(2, 0.0, 0.0, 6.0))
            .add_element(FrameElement::frame(1, 1, 2, "D16"))
            .add_support(Support::at(1));

        let builder = ModelBuilder::new(BuilderConfig::default());
        let (summary, commands) = plan_build(&builder, &input).unwrap();

        assert_eq!(summary.commands, commands.len());
        assert_eq!(commands.first().map(|c| c.kind()), Some(CommandKind::BeginModification));
        assert_eq!(commands.last().map(|c| c.kind()), Some(CommandKind::FinishModification));
    }

    #[test]
    fn test_export_plan() {
        let dir = tempfile::tempdir().unwrap();
        let job_id = Uuid::new_v4();
        let commands = vec![ModelCommand::CalculateAll, ModelCommand::FinishModification];

        let path = export_plan(&dir.path().join("plans"), &commands, &job_id).unwrap();
        let written: Vec<ModelCommand> = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written, commands);
    }

    #[tokio::test]
    async fn test_submit_plan_sends_commands_in_order() {
        let (url, received) = spawn_gateway(usize::MAX).await;
        let executor = RemoteExecutor::new(url, Duration::from_secs(5)).unwrap();
        let commands = numbered_nodes(4);

        let report = executor.submit_plan(&commands).await.unwrap();

        assert_eq!(report.submitted, 4);
        assert_eq!(*received.lock().unwrap(), commands);
    }

    #[tokio::test]
    async fn test_submit_plan_stops_at_first_rejection() {
        let (url, received) = spawn_gateway(2).await;
        let executor = RemoteExecutor::new(url, Duration::from_secs(5)).unwrap();
        let commands = numbered_nodes(5);

        let err = executor.submit_plan(&commands).await.unwrap_err();

        match err {
            ExecutorError::Gateway { index, status, .. } => {
                assert_eq!(index, 2);
                assert_eq!(status, 422);
            }
            other => panic!("expected a gateway rejection, got {other:?}"),
        }
        // nothing after the rejected command reaches the gateway
        assert_eq!(*received.lock().unwrap(), commands[..3].to_vec());
    }
}
