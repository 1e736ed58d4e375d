use crate::config::PdnsConfig;
use crate::powerdns::error::PdnsError;
use crate::powerdns::types::*;
use reqwest::{Client, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::debug;

#[derive(Clone)]
pub struct PowerDnsClient {
    http: Client,
    base_url: String, // e.g. "http://127.0.0.1:8081", without "/api/v1"
    api_key: String,
    server_id: String, // usually "localhost"
}

impl PowerDnsClient {
    /// Build on top of a preconfigured `reqwest::Client` (timeouts, proxy settings).
    pub fn with_http(config: PdnsConfig, http: Client) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            server_id: config.server_id,
        }
    }

    fn auth_header(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("X-API-Key", &self.api_key)
            .header(header::ACCEPT, "application/json")
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/api/v1/servers/{}/{}",
            self.base_url,
            self.server_id,
            path.trim_start_matches('/')
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PdnsError> {
        let url = self.url(path);
        debug!("GET {url}");
        let res = self.auth_header(self.http.get(url)).send().await?;
        let status = res.status();
        let body = res.text().await?;
        if status != StatusCode::OK {
            return Err(PdnsError::Api { status, body });
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// List every zone on the server and fill in its records, one zone at a
    /// time. The first failure aborts the whole listing.
    pub async fn fetch_zones(&self) -> Result<Vec<Zone>, PdnsError> {
        let mut zones: Vec<Zone> = self.get_json("zones").await?;
        for zone in &mut zones {
            zone.records = self.fetch_records(&zone.id).await?;
        }
        debug!("fetched {} zones", zones.len());
        Ok(zones)
    }

    pub async fn fetch_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>, PdnsError> {
        let detail: PdnsZoneDetail = self.get_json(&format!("zones/{}", zone_id)).await?;
        Ok(detail.into_records())
    }
}
