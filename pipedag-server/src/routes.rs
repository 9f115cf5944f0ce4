use crate::config::ServerConfig;
use crate::error::{ApiError, Result};
use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use pipedag_core::{AnalysisResult, Pipeline, PipelineError};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub const SERVICE_NAME: &str = "Pipeline Parser API";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootStatus {
    pub message: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityCheck {
    pub test: String,
    pub timestamp: String,
}

pub fn router(config: &ServerConfig) -> Result<Router> {
    Ok(Router::new()
        .route("/", get(root))
        .route("/test", get(connectivity))
        .route("/pipelines/parse", post(parse_pipeline))
        .fallback(not_found)
        .layer(config.cors.layer()?)
        .layer(TraceLayer::new_for_http()))
}

async fn root() -> Json<RootStatus> {
    Json(RootStatus {
        message: SERVICE_NAME.to_string(),
        status: "running".to_string(),
    })
}

async fn connectivity() -> Json<ConnectivityCheck> {
    Json(ConnectivityCheck {
        test: "success".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

// The body is decoded by hand so that failures carry line/column detail
async fn parse_pipeline(body: Bytes) -> std::result::Result<Json<AnalysisResult>, ApiError> {
    let pipeline: Pipeline = serde_json::from_slice(&body).map_err(|e| {
        let err = PipelineError::from(e);
        warn!("Rejected pipeline: {}", err);
        ApiError::from(err)
    })?;

    info!(
        "Received pipeline with {} nodes and {} edges",
        pipeline.nodes.len(),
        pipeline.edges.len()
    );

    let result = pipeline.analyze();
    info!(
        "Returning result: num_nodes={} num_edges={} is_dag={}",
        result.node_count, result.edge_count, result.is_dag
    );

    Ok(Json(result))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "detail": "Not Found" })),
    )
}
