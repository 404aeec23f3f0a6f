mod api;
mod pages;

pub use api::*;
pub use pages::*;

use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::render::AssetBase;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let static_dir = match state.assets.base() {
        AssetBase::Dir(dir) => dir.clone(),
        AssetBase::Url(_) => PathBuf::from("static"),
    };

    Router::new()
        .route("/", get(index))
        .route("/certificate", post(generate_certificate))
        .route("/api/status", get(roster_status))
        .route("/api/lookup", get(lookup_participant))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
