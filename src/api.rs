use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::{
    clients::{api::ApiClient, health::HealthChecker},
    config::Config,
    engine,
    models::{
        health::HealthStatus,
        placeholder::PlaceholderCatalog,
        preview::{InsertRequest, Insertion, PreviewRequest, RenderedPreview},
        response::ApiResponse,
    },
};

pub struct AppState {
    health_checker: HealthChecker,
    catalog: PlaceholderCatalog,
}

impl AppState {
    pub fn new(api_client: Arc<ApiClient>) -> Self {
        Self {
            health_checker: HealthChecker::new(api_client),
            catalog: PlaceholderCatalog::default(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/placeholders", get(list_placeholders))
        .route("/preview", post(preview))
        .route("/insert", post(insert))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_api_server(
    config: Config,
    api_client: Arc<ApiClient>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(api_client));
    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, "Template server started");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_checker.check_all().await;

    let status_code = match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

async fn list_placeholders(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<PlaceholderCatalog>> {
    Json(ApiResponse::success(
        state.catalog.clone(),
        "Placeholders retrieved",
    ))
}

async fn preview(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PreviewRequest>,
) -> Json<ApiResponse<RenderedPreview>> {
    let mut values = if request.skip_samples {
        Default::default()
    } else {
        state.catalog.sample_values()
    };
    values.extend(request.values);

    let mut unresolved = engine::placeholders(&request.body);
    if let Some(subject) = &request.subject {
        unresolved.extend(engine::placeholders(subject));
    }
    unresolved.retain(|id| !values.contains_key(id));

    let subject = request.subject.as_deref().map(|s| engine::render(s, &values));
    let body = engine::render(&request.body, &values);

    debug!(unresolved = unresolved.len(), "Preview rendered");

    Json(ApiResponse::success(
        RenderedPreview {
            subject,
            body,
            unresolved,
        },
        "Preview rendered",
    ))
}

async fn insert(Json(request): Json<InsertRequest>) -> Json<ApiResponse<Insertion>> {
    let token = if request.token.starts_with("{{") {
        request.token
    } else {
        engine::token(&request.token)
    };

    let (body, cursor) = engine::insert(&request.body, request.cursor, &token);

    Json(ApiResponse::success(
        Insertion { body, cursor },
        "Placeholder inserted",
    ))
}
