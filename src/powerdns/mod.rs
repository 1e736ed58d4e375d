//! Read-only PowerDNS HTTP API client.

pub mod client;
pub mod error;
pub mod types;

pub use client::PowerDnsClient;
pub use error::PdnsError;
pub use types::{DnsRecord, Zone};
