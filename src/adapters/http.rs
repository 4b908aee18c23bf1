use crate::adapters::api::{self, ApiError, PlantGuideDto, PlantGuideQuery, SolarTermQuery, SolarTermResponse};
use crate::core::service::GuideService;
use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body())).into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(service: Arc<GuideService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/getSolarTerm", get(get_solar_term))
        .route("/api/plantGuides", get(get_plant_guides))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_server(service: Arc<GuideService>, bind: &str, port: u16) -> Result<()> {
    let app = build_router(service);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("togrow listening on http://{addr}");
    tracing::info!("Solar term endpoint: http://{addr}/api/getSolarTerm");
    tracing::info!("Plant guide endpoint: http://{addr}/api/plantGuides?term=清明");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("togrow server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health() -> impl IntoResponse {
    Json(api::health())
}

async fn get_solar_term(
    State(service): State<Arc<GuideService>>,
    Query(query): Query<SolarTermQuery>,
) -> Result<Json<SolarTermResponse>, ApiError> {
    api::solar_term(&service, &query).map(Json)
}

async fn get_plant_guides(
    State(service): State<Arc<GuideService>>,
    Query(query): Query<PlantGuideQuery>,
) -> Result<Json<Vec<PlantGuideDto>>, ApiError> {
    api::plant_guides(&service, &query).await.map(Json)
}
