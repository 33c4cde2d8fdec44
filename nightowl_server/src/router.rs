use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use reqwest::Client;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use crate::{
    docs::{dto::ApiDoc, handler::api_docs},
    generate_schedule::handler::generate_schedule,
    info::handler::info,
    state::{ServerState, SettingsSource},
};

pub fn router() -> Router {
    let http = Client::builder()
        .user_agent(concat!("nightowl-server/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default();

    let state = Arc::new(ServerState::from((http, SettingsSource::Environment)));

    router_with_state(state)
}

pub fn router_with_state(state: Arc<ServerState>) -> Router {
    let doc = ApiDoc::openapi();

    Router::new()
        .merge(Redoc::with_url("/redoc", doc))
        .route("/", get(info))
        .route("/docs", get(api_docs))
        .route("/api/generate-schedule", post(generate_schedule))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
