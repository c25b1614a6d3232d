use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use mast_model::prelude::{validate_document, BuildError, BuilderConfig, FeaInput, ModelBuilder};

use crate::executor::{plan_build, ExecutorError, RemoteExecutor};
use crate::models::{BuildRequest, BuildResponse, BuildStatus, PlanResponse};

/// Application state
pub struct AppState {
    executor: Arc<RemoteExecutor>,
    /// Held for a whole submission; builds against one remote model must not interleave
    build_lock: Mutex<()>,
    config: BuilderConfig,
}

impl AppState {
    pub fn new(executor: RemoteExecutor, config: BuilderConfig) -> Self {
        Self {
            executor: Arc::new(executor),
            build_lock: Mutex::new(()),
            config,
        }
    }

    fn builder_for(&self, override_config: Option<BuilderConfig>) -> Result<ModelBuilder, ApiError> {
        let config = match override_config {
            Some(config) => {
                config.validate()?;
                config
            }
            None => self.config.clone(),
        };
        Ok(ModelBuilder::new(config))
    }
}

/// Build the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/api/v1/version", get(version_handler))
        .route("/api/v1/validate", post(validate_handler))
        .route("/api/v1/plan", post(plan_handler))
        .route("/api/v1/build", post(build_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Root endpoint
async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({
        "service": "RFEM Mast Model Service",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "description": "Builds RFEM models of lattice towers and guyed masts from FEA input documents",
        "supported_members": ["Frame", "GuyWire"],
        "supported_loads": ["self_weight", "nodal_force", "imposed_nodal_deformation"]
    }))
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let gateway_available = state.executor.is_available().await;

    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "gateway_available": gateway_available,
        "gateway_url": state.executor.base_url()
    }))
}

/// Version endpoint
async fn version_handler() -> Json<serde_json::Value> {
    Json(json!({
        "service": "RFEM Mast Model Service",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "target": "RFEM model gateway"
    }))
}

/// Validate a document without building it
async fn validate_handler(Json(document): Json<FeaInput>) -> Result<Json<serde_json::Value>, ApiError> {
    tracing::info!("Validating document");
    validate_document(&document)?;

    Ok(Json(json!({
        "valid": true,
        "message": "Document validation passed",
        "nodes": document.tower().nodes.len(),
        "frame_elements": document.tower().frame_elements.len(),
        "load_cases": document.load_cases().len()
    })))
}

/// Return the command stream a build would submit
async fn plan_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BuildRequest>,
) -> Result<Json<PlanResponse>, ApiError> {
    let builder = state.builder_for(request.config)?;
    let (summary, commands) = plan_build(&builder, &request.document)?;
    tracing::info!("Planned {} commands for model '{}'", commands.len(), summary.model_name);
    Ok(Json(PlanResponse { summary, commands }))
}

/// Plan and submit a document to the gateway
async fn build_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BuildRequest>,
) -> Result<Json<BuildResponse>, ApiError> {
    tracing::info!("Received build request");
    tracing::info!(
        "  Nodes: {}, Frame elements: {}, Supports: {}, Load cases: {}",
        request.document.tower().nodes.len(),
        request.document.tower().frame_elements.len(),
        request.document.tower().tower_supports.len(),
        request.document.load_cases().len()
    );

    // 1. Plan the build; validation happens here
    let builder = state.builder_for(request.config)?;
    let (summary, commands) = plan_build(&builder, &request.document)?;
    tracing::info!("Planned {} commands", commands.len());

    if request.dry_run {
        return Ok(Json(BuildResponse {
            job_id: Uuid::new_v4().to_string(),
            status: BuildStatus::DryRun,
            summary: Some(summary),
            submitted: 0,
            error_message: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }));
    }

    // 2. Submit to the gateway
    let _guard = state.build_lock.lock().await;
    let report = state.executor.submit_plan(&commands).await?;

    Ok(Json(BuildResponse {
        job_id: report.job_id,
        status: BuildStatus::Submitted,
        summary: Some(summary),
        submitted: report.submitted,
        error_message: None,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

/// API Errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Gateway error: {0}")]
    GatewayError(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<BuildError> for ApiError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::NodeNotFound(_)
            | BuildError::SectionNotFound(_)
            | BuildError::DuplicateNumber { .. }
            | BuildError::InvalidConfig(_)
            | BuildError::Json(_) => ApiError::ValidationError(err.to_string()),
            _ => ApiError::InternalError(err.to_string()),
        }
    }
}

impl From<ExecutorError> for ApiError {
    fn from(err: ExecutorError) -> Self {
        match err {
            ExecutorError::Io(_) => ApiError::InternalError(err.to_string()),
            _ => ApiError::GatewayError(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::GatewayError(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app_with_gateway(url: &str) -> Router {
        let executor = RemoteExecutor::new(url, Duration::from_secs(30)).unwrap();
        create_router(AppState::new(executor, BuilderConfig::default()))
    }

    fn app() -> Router {
        // nothing listens here; tests never reach the gateway
        app_with_gateway("http://127.0.0.1:9")
    }

    /// Gateway that accepts connections and never answers
    async fn spawn_silent_gateway() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                open.push(socket);
            }
        });
        format!("http://{}", addr)
    }

    fn document() -> serde_json::Value {
        json!({
            "fea_input_tower": {
                "nodes": [
                    {"number": 1, "x": 0.0, "y": 0.0, "z": 0.0},
                    {"number": 2, "x": 5.0, "y": 0.0, "z": 0.0}
                ],
                "frame_elements": [{
                    "member_number": 1,
                    "member_type": "Frame",
                    "start_node": {"number": 1},
                    "end_node": {"number": 2},
                    "cross_section": {"name": "D32"}
                }],
                "tower_supports": [{"node": {"number": 1}}]
            },
            "fea_load_cases": [{
                "number": 1,
                "name": "Name1",
                "gravitational_constant": 0.0,
                "nodal_loads": [{"node_number": 2, "force": {"x": 1000.0, "y": 0.0, "z": 0.0}}]
            }]
        })
    }

    async fn post(app: Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validate_accepts_document() {
        let (status, body) = post(app(), "/api/v1/validate", document()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], json!(true));
        assert_eq!(body["nodes"], json!(2));
    }

    #[tokio::test]
    async fn test_validate_rejects_dangling_support() {
        let mut doc = document();
        doc["fea_input_tower"]["tower_supports"] = json!([{"node": {"number": 7}}]);
        let (status, body) = post(app(), "/api/v1/validate", doc).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Node 7"));
    }

    #[tokio::test]
    async fn test_plan_returns_commands() {
        let (status, body) = post(app(), "/api/v1/plan", json!({"document": document()})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["nodal_loads"], json!(1));
        assert_eq!(body["summary"]["sections"][0]["label"], json!("R 32"));
        let commands = body["commands"].as_array().unwrap();
        assert_eq!(commands[0]["command"], json!("begin_modification"));
        assert!(commands
            .iter()
            .any(|c| c["command"] == json!("create_nodal_load") && c["components"][0] == json!(1000.0)));
    }

    #[tokio::test]
    async fn test_plan_with_config_override() {
        let request = json!({
            "document": document(),
            "config": {"support_type": "fixed", "calculate_all": false}
        });
        let (status, body) = post(app(), "/api/v1/plan", request).await;
        assert_eq!(status, StatusCode::OK);
        let commands = body["commands"].as_array().unwrap();
        assert!(commands
            .iter()
            .any(|c| c["command"] == json!("create_nodal_support") && c["support_type"] == json!("fixed")));
        assert!(!commands.iter().any(|c| c["command"] == json!("calculate_all")));
    }

    #[tokio::test]
    async fn test_dry_run_build() {
        let request = json!({"document": document(), "dry_run": true});
        let (status, body) = post(app(), "/api/v1/build", request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("DryRun"));
        assert_eq!(body["submitted"], json!(0));
    }

    #[tokio::test]
    async fn test_health_answers_during_build() {
        let app = app_with_gateway(&spawn_silent_gateway().await);

        let build = tokio::spawn(post(app.clone(), "/api/v1/build", json!({"document": document()})));
        tokio::time::sleep(Duration::from_millis(200)).await;

        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = tokio::time::timeout(Duration::from_secs(4), app.oneshot(request))
            .await
            .expect("health check waited on the running build")
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["gateway_available"], json!(false));

        assert!(!build.is_finished());
        build.abort();
    }
}
