use axum::{
    body::Body,
    extract::Path,
    http::{Response, StatusCode, header},
};
use rust_embed::RustEmbed;

use crate::error::AppError;

#[derive(RustEmbed)]
#[folder = "static"]
struct StaticAssets;

// GET /static/{*path}
pub async fn static_asset(Path(path): Path<String>) -> Result<Response<Body>, AppError> {
    if path.contains("..") {
        return Err(AppError::bad_request("invalid asset path"));
    }
    embedded_response(&path).ok_or(AppError::NotFound)
}

fn embedded_response(path: &str) -> Option<Response<Body>> {
    let asset = StaticAssets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
        .body(Body::from(asset.data.into_owned()))
        .ok()
}
