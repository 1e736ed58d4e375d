use serde::{Deserialize, Deserializer, Serialize};

/// One flattened record: a single content entry of an rrset, carrying the
/// owner name, type and TTL of the rrset it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsRecord {
    pub name: String, // "www.example.com."
    #[serde(rename = "type")]
    pub rrtype: String, // "A", "NS", ...
    pub content: String,
    pub ttl: u32,
    pub disabled: bool,
}

/// A zone as listed by `GET /servers/{id}/zones`, plus its records once
/// they have been fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,   // "example.com."
    pub name: String, // "example.com."
    #[serde(skip_deserializing)]
    pub records: Vec<DnsRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub serial: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: String, // "Native", "Master", ...
    #[serde(default, deserialize_with = "null_as_default")]
    pub dnssec: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_check: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notified_serial: u32,
}

/// Body of `GET /servers/{id}/zones/{zone_id}`; only the rrsets are read.
#[derive(Debug, Deserialize)]
pub struct PdnsZoneDetail {
    #[serde(default)]
    pub rrsets: Vec<PdnsRrset>,
}

#[derive(Debug, Deserialize)]
pub struct PdnsRrset {
    pub name: String,
    #[serde(rename = "type")]
    pub rrtype: String,
    pub ttl: u32,
    #[serde(default)]
    pub records: Vec<PdnsRecord>,
}

#[derive(Debug, Deserialize)]
pub struct PdnsRecord {
    pub content: String, // "192.0.2.1" or "ns1.example.net."
    #[serde(default)]
    pub disabled: bool,
}

impl PdnsZoneDetail {
    /// Flatten rrsets into one record per content entry, keeping rrset order
    /// and record order within each rrset.
    pub fn into_records(self) -> Vec<DnsRecord> {
        self.rrsets
            .into_iter()
            .flat_map(|rrset| {
                let PdnsRrset {
                    name,
                    rrtype,
                    ttl,
                    records,
                } = rrset;
                records.into_iter().map(move |rec| DnsRecord {
                    name: name.clone(),
                    rrtype: rrtype.clone(),
                    content: rec.content,
                    ttl,
                    disabled: rec.disabled,
                })
            })
            .collect()
    }
}

// PowerDNS sends `null` for some zone fields (e.g. an unset account).
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
