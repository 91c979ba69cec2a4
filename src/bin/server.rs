use repo_analyzer::{AnalyzeRequest, Analyzer, Config, DiffRequest, OllamaClient};
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    analyzer: Arc<Analyzer>,
    started_at: DateTime<Utc>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Arc::new(Config::load()?);
    config.validate()?;

    let gateway = Arc::new(OllamaClient::new(&config.model)?);
    let analyzer = Arc::new(Analyzer::new(gateway, config.clone()));
    let state = AppState {
        analyzer,
        started_at: Utc::now(),
    };

    info!("Repository analyzer starting...");
    info!("Model backend: {} ({})", config.model.base_url, config.model.model_name);

    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the main application with all routes
fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/analyze-repository", post(analyze_repository))
        .route("/analyze-diff", post(analyze_diff))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint - returns basic service information
async fn index() -> ResponseJson<Value> {
    ResponseJson(json!({
        "message": "Welcome to the Repository Analyzer API!",
        "service": "repo-analyzer",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "analyze_repository": "/analyze-repository",
            "analyze_diff": "/analyze-diff"
        }
    }))
}

/// Service liveness endpoint
async fn health_check(State(state): State<AppState>) -> ResponseJson<Value> {
    ResponseJson(json!({
        "service": "repo-analyzer",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "healthy",
        "timestamp": Utc::now(),
        "uptime": (Utc::now() - state.started_at).num_seconds(),
    }))
}

/// Clone, probe, and summarize a repository
async fn analyze_repository(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<ResponseJson<Value>, (StatusCode, ResponseJson<Value>)> {
    info!("analysis requested for repository: {}", request.repo_url);

    match state.analyzer.analyze_repository(&request.repo_url).await {
        Ok(analysis) => Ok(ResponseJson(json!(analysis))),
        Err(e) if e.is_client_error() => {
            error!("clone failed: {}", e);
            Err((
                StatusCode::BAD_REQUEST,
                ResponseJson(json!({
                    "detail": format!(
                        "Failed to clone repository. Is the URL correct and public? Error: {}",
                        e
                    )
                })),
            ))
        }
        Err(e) => {
            error!("analysis failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                ResponseJson(json!({
                    "detail": format!("An unexpected error occurred: {}", e)
                })),
            ))
        }
    }
}

/// Summarize an incremental code change against a prior summary
async fn analyze_diff(
    State(state): State<AppState>,
    Json(request): Json<DiffRequest>,
) -> Result<ResponseJson<Value>, (StatusCode, ResponseJson<Value>)> {
    info!("diff analysis requested for project: {}", request.project_title);

    match state.analyzer.analyze_diff(&request).await {
        Ok(result) => Ok(ResponseJson(result)),
        Err(e) => {
            error!("diff analysis failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                ResponseJson(json!({
                    "detail": format!("Error analyzing diff: {}", e)
                })),
            ))
        }
    }
}
