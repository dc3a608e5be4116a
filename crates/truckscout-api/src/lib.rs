//! truckscout-api - HTTP API for the truckscout sales dashboard.
//!
//! The dataset is loaded once and shared read-only. Sessions live in memory
//! and hold the assistant transcript, the current map selection and the
//! pending outreach letter.

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use uuid::Uuid;

use truckscout_assistant::OutreachComposer;
use truckscout_core::ChatBackend;
use truckscout_data::{Dataset, FilesystemImageStore};

pub use config::ServerConfig;
pub use error::ApiError;
use handlers::{assistant, companies, health, map, outreach, sessions, topics};
pub use services::SessionStore;

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub chat: Arc<dyn ChatBackend>,
    pub images: FilesystemImageStore,
    pub sessions: SessionStore,
    pub composer: OutreachComposer,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(dataset: Dataset, chat: Arc<dyn ChatBackend>, config: ServerConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
            chat,
            images: FilesystemImageStore::new(config.image_root.clone()),
            sessions: SessionStore::new(Duration::from_secs(config.session_ttl_secs)),
            composer: OutreachComposer::new(config.outreach_sender.clone()),
            config: Arc::new(config),
        }
    }
}

/// OpenAPI document served at `/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "TruckScout API",
        version = "2026.10.0",
        description = "Prospect map, company profiles and a sales assistant for truck sales to logistics companies"
    ),
    paths(
        health::health_check,
        map::get_map,
        topics::get_topics,
        companies::get_company,
        companies::get_company_image,
        sessions::create_session,
        sessions::get_session,
        sessions::delete_session,
        sessions::select_company,
        assistant::send_message,
        outreach::download_outreach,
    ),
    components(schemas(sessions::SelectionRequest, assistant::SendMessageRequest)),
    tags(
        (name = "System", description = "Health checks and API description"),
        (name = "Map", description = "Marker layers and static panels"),
        (name = "Companies", description = "Company profiles and fleet images"),
        (name = "Sessions", description = "Session lifecycle and map selection"),
        (name = "Assistant", description = "Sales assistant and outreach letters")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router with middleware.
pub fn router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;
    let allowed_origins = state.config.allowed_origins.clone();

    Router::new()
        .route("/health", get(health::health_check))
        .route("/openapi.json", get(openapi_json))
        .route("/api/v1/map", get(map::get_map))
        .route("/api/v1/topics", get(topics::get_topics))
        .route("/api/v1/companies/:place_id", get(companies::get_company))
        .route(
            "/api/v1/companies/:place_id/images/:index",
            get(companies::get_company_image),
        )
        .route("/api/v1/sessions", post(sessions::create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route(
            "/api/v1/sessions/:id/selection",
            post(sessions::select_company),
        )
        .route("/api/v1/sessions/:id/messages", post(assistant::send_message))
        .route(
            "/api/v1/sessions/:id/outreach",
            get(outreach::download_outreach),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed_origins))
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_credentials(true)
                .max_age(std::time::Duration::from_secs(3600)),
        )
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}
