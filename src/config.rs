//! Configuration resolution: an optional TOML/JSON file, overridden field by
//! field by command-line flags and environment variables.
use serde::{Deserialize, Deserializer, de};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;

pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
/// Read from the working directory when no config file is named.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Connection settings for the PowerDNS API.
#[derive(Clone, PartialEq, Eq)]
pub struct PdnsConfig {
    pub base_url: String, // "http://127.0.0.1:8081"
    pub api_key: String,
    pub server_id: String, // "localhost"
}

impl fmt::Debug for PdnsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdnsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("server_id", &self.server_id)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub listen_address: String, // IP or hostname
    pub port: u16,
    pub pdns: PdnsConfig,
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// Settings as they appear in a config file. Every key is optional here;
/// required keys are enforced by [`resolve`].
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub powerdns_url: Option<String>,
    pub api_key: Option<String>,
    pub server_id: Option<String>,
    pub listen_address: Option<String>,
    #[serde(default, deserialize_with = "port_number_or_string")]
    pub port: Option<u16>,
    pub request_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// `*.json` is parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })
        } else {
            toml::from_str(&raw).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Values coming from flags or the environment. These win over the file.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub powerdns_url: Option<String>,
    pub api_key: Option<String>,
    pub server_id: Option<String>,
    pub listen_address: Option<String>,
    pub port: Option<u16>,
    pub request_timeout_secs: Option<u64>,
}

/// Merge file values and overrides into the final immutable config.
pub fn resolve(
    file: Option<FileConfig>,
    overrides: ConfigOverrides,
) -> Result<AppConfig, ConfigError> {
    let file = file.unwrap_or_default();

    let powerdns_url = pick(overrides.powerdns_url, file.powerdns_url);
    let api_key = pick(overrides.api_key, file.api_key);
    let server_id = pick(overrides.server_id, file.server_id);

    let mut missing = Vec::new();
    if powerdns_url.is_none() {
        missing.push("powerdns_url");
    }
    if api_key.is_none() {
        missing.push("api_key");
    }
    if server_id.is_none() {
        missing.push("server_id");
    }
    let (Some(powerdns_url), Some(api_key), Some(server_id)) = (powerdns_url, api_key, server_id)
    else {
        return Err(ConfigError::Missing(missing));
    };

    let listen_address = pick(overrides.listen_address, file.listen_address)
        .map(|host| strip_brackets(&host).to_string())
        .unwrap_or_else(|| DEFAULT_LISTEN_ADDRESS.to_string());
    let port = overrides.port.or(file.port).unwrap_or(DEFAULT_PORT);

    let request_timeout = overrides
        .request_timeout_secs
        .or(file.request_timeout_secs)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    Ok(AppConfig {
        listen_address,
        port,
        pdns: PdnsConfig {
            base_url: powerdns_url.trim_end_matches('/').to_string(),
            api_key,
            server_id,
        },
        request_timeout,
    })
}

fn pick(preferred: Option<String>, fallback: Option<String>) -> Option<String> {
    let non_empty = |v: String| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };
    preferred.and_then(non_empty).or_else(|| fallback.and_then(non_empty))
}

/// The explicit `--config` path, else `config.json` in `dir` if it exists.
pub fn config_file_path(explicit: Option<PathBuf>, dir: &Path) -> Option<PathBuf> {
    explicit.or_else(|| {
        let fallback = dir.join(DEFAULT_CONFIG_FILE);
        fallback.is_file().then_some(fallback)
    })
}

impl AppConfig {
    /// Bind the HTTP listener; hostnames are resolved here.
    pub async fn bind(&self) -> std::io::Result<TcpListener> {
        TcpListener::bind((self.listen_address.as_str(), self.port)).await
    }
}

// "[::1]" as well as "::1"
fn strip_brackets(host: &str) -> &str {
    host.strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host)
}

// Ports may be written as `8080` or `"8080"`.
fn port_number_or_string<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Option::<Port>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Port::Number(port)) => Ok(Some(port)),
        Some(Port::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid port '{text}'")))
        }
    }
}
