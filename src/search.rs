//! Case-insensitive substring search over zone records.
use crate::powerdns::types::{DnsRecord, Zone};
use serde::Serialize;

/// Which record field a query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Name,
    Content,
    Type,
    #[default]
    All,
}

impl SearchField {
    /// Anything other than `name`, `content` or `type` searches every field.
    pub fn parse(value: &str) -> Self {
        match value {
            "name" => SearchField::Name,
            "content" => SearchField::Content,
            "type" => SearchField::Type,
            _ => SearchField::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Content => "content",
            SearchField::Type => "type",
            SearchField::All => "all",
        }
    }

    fn matches(self, record: &DnsRecord, needle: &str) -> bool {
        let hit = |value: &str| value.to_lowercase().contains(needle);
        match self {
            SearchField::Name => hit(&record.name),
            SearchField::Content => hit(&record.content),
            SearchField::Type => hit(&record.rrtype),
            SearchField::All => hit(&record.name) || hit(&record.content) || hit(&record.rrtype),
        }
    }
}

/// Records whose selected field contains `query`, ignoring case, in input order.
pub fn filter_records(records: &[DnsRecord], query: &str, field: SearchField) -> Vec<DnsRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| field.matches(record, &needle))
        .cloned()
        .collect()
}

/// Narrow every zone to its matching records and drop zones left empty.
/// An empty query returns the zones untouched.
pub fn filter_zones(zones: Vec<Zone>, query: &str, field: SearchField) -> Vec<Zone> {
    if query.is_empty() {
        return zones;
    }

    zones
        .into_iter()
        .filter_map(|mut zone| {
            let matching = filter_records(&zone.records, query, field);
            if matching.is_empty() {
                return None;
            }
            zone.records = matching;
            Some(zone)
        })
        .collect()
}
