//! HTTP surface: the zone list page and its static assets.

pub mod assets;
pub mod render;
pub mod zones;

use axum::{Extension, Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::SharedState;

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(zones::list_zones))
        .route("/static/{*path}", get(assets::static_asset))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
