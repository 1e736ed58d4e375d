//! A fake PowerDNS API on an ephemeral port, counting the calls it receives.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    routing::get,
};
use pdns_webui::{config::PdnsConfig, powerdns::PowerDnsClient};
use serde_json::Value;
use tokio::net::TcpListener;

pub const API_KEY: &str = "test-key";
pub const SERVER_ID: &str = "localhost";

pub type Reply = (StatusCode, String);

pub fn ok(body: Value) -> Reply {
    (StatusCode::OK, body.to_string())
}

#[derive(Default)]
struct Upstream {
    zones: Mutex<Option<Reply>>,
    details: Mutex<HashMap<String, Reply>>,
    zone_list_hits: AtomicUsize,
    detail_hits: Mutex<Vec<String>>,
}

impl Upstream {
    fn reject(&self, server_id: &str, headers: &HeaderMap) -> Option<Reply> {
        if headers.get("X-API-Key").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
            return Some((
                StatusCode::UNAUTHORIZED,
                r#"{"error": "Unauthorized"}"#.into(),
            ));
        }
        if headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) != Some("application/json") {
            return Some((StatusCode::NOT_ACCEPTABLE, "json only".into()));
        }
        if server_id != SERVER_ID {
            return Some((StatusCode::NOT_FOUND, r#"{"error": "Not Found"}"#.into()));
        }
        None
    }
}

pub struct FakePdns {
    pub base_url: String,
    upstream: Arc<Upstream>,
}

impl FakePdns {
    pub async fn spawn() -> Self {
        let upstream = Arc::new(Upstream::default());
        let app = Router::new()
            .route("/api/v1/servers/{server_id}/zones", get(list_zones))
            .route("/api/v1/servers/{server_id}/zones/{zone_id}", get(zone_detail))
            .with_state(upstream.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            upstream,
        }
    }

    pub fn set_zones(&self, reply: Reply) {
        *self.upstream.zones.lock().unwrap() = Some(reply);
    }

    pub fn set_zone_detail(&self, zone_id: &str, reply: Reply) {
        self.upstream
            .details
            .lock()
            .unwrap()
            .insert(zone_id.to_string(), reply);
    }

    pub fn zone_list_hits(&self) -> usize {
        self.upstream.zone_list_hits.load(Ordering::SeqCst)
    }

    /// Zone ids requested from the detail endpoint, in call order.
    pub fn detail_hits(&self) -> Vec<String> {
        self.upstream.detail_hits.lock().unwrap().clone()
    }

    pub fn config(&self) -> PdnsConfig {
        PdnsConfig {
            base_url: self.base_url.clone(),
            api_key: API_KEY.into(),
            server_id: SERVER_ID.into(),
        }
    }

    pub fn client(&self) -> PowerDnsClient {
        client_for(self.config())
    }
}

pub fn client_for(config: PdnsConfig) -> PowerDnsClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    PowerDnsClient::with_http(config, http)
}

async fn list_zones(
    State(up): State<Arc<Upstream>>,
    Path(server_id): Path<String>,
    headers: HeaderMap,
) -> Reply {
    up.zone_list_hits.fetch_add(1, Ordering::SeqCst);
    if let Some(rejection) = up.reject(&server_id, &headers) {
        return rejection;
    }
    up.zones
        .lock()
        .unwrap()
        .clone()
        .unwrap_or_else(|| (StatusCode::OK, "[]".into()))
}

async fn zone_detail(
    State(up): State<Arc<Upstream>>,
    Path((server_id, zone_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Reply {
    up.detail_hits.lock().unwrap().push(zone_id.clone());
    if let Some(rejection) = up.reject(&server_id, &headers) {
        return rejection;
    }
    up.details
        .lock()
        .unwrap()
        .get(&zone_id)
        .cloned()
        .unwrap_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                r#"{"error": "Could not find domain"}"#.into(),
            )
        })
}

pub fn zone_summary(id: &str) -> Value {
    serde_json::json!({
        "id": id,
        "name": id,
        "kind": "Native",
        "serial": 2024010101,
        "notified_serial": 2024010101,
        "last_check": 0,
        "dnssec": false,
        "account": "",
        "url": format!("/api/v1/servers/localhost/zones/{id}"),
    })
}

/// Seed two zones: example.com. (web1, db1, MX) and example.net. (one TXT).
pub fn seed_two_zones(pdns: &FakePdns) {
    pdns.set_zones(ok(serde_json::json!([
        zone_summary("example.com."),
        zone_summary("example.net."),
    ])));
    pdns.set_zone_detail(
        "example.com.",
        ok(serde_json::json!({
            "name": "example.com.",
            "rrsets": [
                {"name": "web1.example.com.", "type": "A", "ttl": 300,
                 "records": [{"content": "192.0.2.10", "disabled": false},
                             {"content": "192.0.2.11", "disabled": true}]},
                {"name": "db1.example.com.", "type": "A", "ttl": 300,
                 "records": [{"content": "192.0.2.20", "disabled": false}]},
                {"name": "example.com.", "type": "MX", "ttl": 3600,
                 "records": [{"content": "10 mail.example.com.", "disabled": false}]}
            ]
        })),
    );
    pdns.set_zone_detail(
        "example.net.",
        ok(serde_json::json!({
            "name": "example.net.",
            "rrsets": [
                {"name": "example.net.", "type": "TXT", "ttl": 60,
                 "records": [{"content": "\"v=spf1 -all\"", "disabled": false}]}
            ]
        })),
    );
}
