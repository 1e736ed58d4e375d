use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong talking to PowerDNS. Nothing here is retried;
/// callers only ever see the message.
#[derive(Debug, Error)]
pub enum PdnsError {
    #[error("request to PowerDNS failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error: {status} - {body}")]
    Api { status: StatusCode, body: String },

    #[error("error decoding PowerDNS response: {0}")]
    Decode(#[from] serde_json::Error),
}
