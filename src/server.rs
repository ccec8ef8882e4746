//! HTTP front end serving the latest snapshot.

use std::path::PathBuf;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::page;
use crate::snapshot::SnapshotReader;
use crate::visjs::Network;

pub const PAGE_TITLE: &str = "Kafka ACLs";

#[derive(Clone)]
pub struct AppState {
    pub snapshots: SnapshotReader,
}

pub fn create_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let mut router = Router::new()
        .route("/", get(network_page))
        .route("/api/network", get(api_network))
        .route("/healthz", get(healthz));
    if let Some(dir) = static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }
    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Renders the page; before the first refresh it shows an empty network.
async fn network_page(State(state): State<AppState>) -> Response {
    let snapshot = state.snapshots.latest();
    let empty = Network::default();
    let network = snapshot.as_ref().map(|s| &s.network).unwrap_or(&empty);
    match page::render(network, PAGE_TITLE) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render page");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
        }
    }
}

async fn api_network(State(state): State<AppState>) -> Response {
    match state.snapshots.latest() {
        Some(snapshot) => Json(snapshot.as_ref().clone()).into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "no ACL snapshot yet").into_response(),
    }
}

async fn healthz(State(state): State<AppState>) -> Response {
    if state.snapshots.latest().is_some() {
        (StatusCode::OK, "ok").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "waiting for first refresh").into_response()
    }
}
