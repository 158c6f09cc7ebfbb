use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_search::{
    error::CatalogError, CatalogData, CatalogEngine, Item, PurchaseReceipt, SearchConfig,
    SearchResponse,
};

#[derive(Clone)]
struct AppState {
    engine: Arc<RwLock<CatalogEngine>>,
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    section: String,
    #[serde(default)]
    query: String,
}

#[derive(Debug, Deserialize)]
struct PurchaseRequest {
    item_id: String,
    #[serde(default = "default_quantity")]
    quantity: u32,
    funds: u64,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct SectionsResponse {
    sections: Vec<SectionDto>,
}

#[derive(Debug, Serialize)]
struct SectionDto {
    name: String,
    items: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_server=debug,catalog_search=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let catalog_path = std::env::var("CATALOG_PATH").ok();
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8090);

    tracing::info!("🚀 Starting Catalog Search Server");
    tracing::info!("📦 Catalog: {}", catalog_path.as_deref().unwrap_or("<built-in>"));
    tracing::info!("🔌 Port: {}", port);

    let data = match &catalog_path {
        Some(path) => CatalogData::load(path)?,
        None => CatalogData::builtin()?,
    };

    // Environment variables override the catalog's search block
    let config = data.search.unwrap_or_default().with_env_overrides();
    tracing::info!("🔧 Search config: {}", config);
    let engine = CatalogEngine::with_config(data, config)?;

    let state = AppState {
        engine: Arc::new(RwLock::new(engine)),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/sections", get(sections_handler))
        .route("/v1/featured", get(featured_handler))
        .route("/v1/search", post(search_handler))
        .route("/v1/purchase", post(purchase_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("🛒 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: catalog_search::VERSION.to_string(),
    })
}

async fn sections_handler(
    State(state): State<AppState>,
) -> Result<Json<SectionsResponse>, AppError> {
    let engine = state.engine.read().await;

    let mut sections = Vec::new();
    for name in engine.sections() {
        sections.push(SectionDto {
            name: name.to_string(),
            items: engine.section_items(name)?.len(),
        });
    }

    Ok(Json(SectionsResponse { sections }))
}

async fn featured_handler(State(state): State<AppState>) -> Json<Vec<Arc<Item>>> {
    let engine = state.engine.read().await;
    Json(engine.featured())
}

async fn search_handler(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    tracing::debug!("Search request: {:?}", req);

    let engine = state.engine.read().await;
    let result = engine.browse(&req.section, &req.query)?;

    tracing::info!(
        "✅ [{}] {:?} → {} result(s) ({:.2}ms)",
        req.section,
        req.query,
        result.len(),
        result.latency_ms
    );

    Ok(Json(result))
}

async fn purchase_handler(
    State(state): State<AppState>,
    Json(req): Json<PurchaseRequest>,
) -> Result<Json<PurchaseReceipt>, AppError> {
    tracing::debug!("Purchase request: {:?}", req);

    let mut engine = state.engine.write().await;
    let receipt = engine.purchase(&req.item_id, req.quantity, req.funds)?;

    Ok(Json(receipt))
}

// Error handling
struct AppError(CatalogError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CatalogError::UnknownSection(_) | CatalogError::UnknownItem(_) => StatusCode::NOT_FOUND,
            e if e.is_purchase_rejection() => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.0.to_string();

        tracing::error!("❌ Error: {} - {}", status, message);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<CatalogError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
