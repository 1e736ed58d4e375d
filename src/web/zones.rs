// GET / : the searchable zone table
use axum::{
    Extension,
    extract::Query,
    http::header,
    response::{Html, IntoResponse},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::SharedState;
use crate::error::AppError;
use crate::powerdns::{PowerDnsClient, Zone};
use crate::search::{SearchField, filter_zones};

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; base-uri 'self'; frame-ancestors 'none'; \
     form-action 'self'; style-src 'self'; img-src 'self' data:; object-src 'none'";

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default, rename = "type")]
    pub search_type: String,
}

/// Everything `index.html` needs.
#[derive(Debug, Serialize)]
pub struct IndexPage {
    pub zones: Vec<Zone>,
    pub query: String,
    pub search_type: SearchField,
    pub error: Option<String>,
}

/// Fetch all zones, narrow them by `query`, and fold a fetch failure into the
/// page as a message instead of failing the request.
pub async fn load_index(pdns: &PowerDnsClient, query: String, field: SearchField) -> IndexPage {
    match pdns.fetch_zones().await {
        Ok(zones) => {
            let zones = filter_zones(zones, &query, field);
            if !query.is_empty() {
                info!(
                    "search '{}' on {} matched {} zones",
                    query,
                    field.as_str(),
                    zones.len()
                );
            }
            IndexPage {
                zones,
                query,
                search_type: field,
                error: None,
            }
        }
        Err(err) => {
            error!("failed to fetch zones: {err}");
            IndexPage {
                zones: Vec::new(),
                query,
                search_type: field,
                error: Some(format!("Error fetching zones: {err}")),
            }
        }
    }
}

pub async fn list_zones(
    Extension(state): Extension<SharedState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let field = SearchField::parse(&params.search_type);
    let page = load_index(&state.pdns, params.q, field).await;
    let html = state.templates.render("index.html", &page)?;

    Ok((
        [
            (header::CONTENT_SECURITY_POLICY, CONTENT_SECURITY_POLICY),
            (header::REFERRER_POLICY, "no-referrer"),
        ],
        Html(html),
    ))
}
