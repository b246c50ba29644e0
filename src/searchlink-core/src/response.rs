//! Typed shapes of the engine's JSON envelopes.
//!
//! Every field is optional on the wire: absent fields decode to their zero
//! value and unknown fields are ignored, so newer engine versions that add
//! keys keep decoding.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::models::{BulkCommand, Fields};

/// Response is the generic acknowledgement and single-document envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default)]
    pub found: bool,
    #[serde(default)]
    pub exists: bool,
    #[serde(rename = "_index", default, deserialize_with = "nullable")]
    pub index: String,
    #[serde(rename = "_type", default, deserialize_with = "nullable")]
    pub doc_type: String,
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(rename = "_version", default, deserialize_with = "nullable")]
    pub version: u64,
    #[serde(rename = "_source", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Fields>,
    /// Partial projection returned when specific `fields` were requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Fields>,
}

/// Shard counts the engine reports for an operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shard {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub successful: u32,
    #[serde(default)]
    pub failed: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub took: u64,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(rename = "_shards", default)]
    pub shards: Shard,
    #[serde(default)]
    pub hits: Hits,
    /// Cursor for the next page of a scan/scroll
    #[serde(rename = "_scroll_id", default, skip_serializing_if = "Option::is_none")]
    pub scroll_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facets: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<serde_json::Value>,
}

/// Hits keeps the engine's ranking order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hits {
    #[serde(default, deserialize_with = "total_count")]
    pub total: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub max_score: f64,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(rename = "_index", default)]
    pub index: String,
    #[serde(rename = "_type", default, deserialize_with = "nullable")]
    pub doc_type: String,
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_score", default, deserialize_with = "nullable")]
    pub score: f64,
    #[serde(rename = "_source", default, deserialize_with = "nullable")]
    pub source: Fields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Fields>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(rename = "_shards", default)]
    pub shards: Shard,
}

/// BulkResponse holds one outcome per submitted document, in submission order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkResponse {
    #[serde(default)]
    pub took: u64,
    #[serde(default)]
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<BulkItem>,
}

impl BulkResponse {
    /// Outcomes the engine rejected, with their submission position
    pub fn failures(&self) -> impl Iterator<Item = (usize, &BulkItem)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.outcome.error.is_some())
    }
}

/// BulkItem is one per-document outcome tagged by the command that produced it.
///
/// On the wire this is an object with a single key naming the command; the
/// wrapper is unpacked during decoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkItem {
    pub command: BulkCommand,
    pub outcome: Item,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub ok: bool,
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_type", default, deserialize_with = "nullable")]
    pub doc_type: String,
    #[serde(rename = "_version", default)]
    pub version: u64,
    #[serde(rename = "_index", default)]
    pub index: String,
    #[serde(default)]
    pub status: u16,
    /// Engine's per-item failure, kept as sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

impl<'de> Deserialize<'de> for BulkItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BulkItemVisitor;

        impl<'de> Visitor<'de> for BulkItemVisitor {
            type Value = BulkItem;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object with exactly one bulk command key")
            }

            fn visit_map<A>(self, mut map: A) -> Result<BulkItem, A::Error>
            where
                A: MapAccess<'de>,
            {
                let (command, outcome) = map
                    .next_entry::<BulkCommand, Item>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;

                if map.next_key::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(2, &self));
                }

                Ok(BulkItem { command, outcome })
            }
        }

        deserializer.deserialize_map(BulkItemVisitor)
    }
}

/// Metric is a diagnostic value whose type varies by engine version.
///
/// Sizes and durations show up both as numbers and as human strings
/// (`"size_in_bytes": 99` next to `"size": "99b"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Metric {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Metric::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Metric::Number(n) if *n >= 0.0 && n.fract() == 0.0 => Some(*n as u64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Metric::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Open mapping of metric name to value
pub type MetricMap = BTreeMap<String, Metric>;

/// Stats grouped by category (`docs`, `store`, `indexing`, ...)
pub type StatsGroups = HashMap<String, MetricMap>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(rename = "_shards", default)]
    pub shards: Shard,
    #[serde(rename = "_all", default)]
    pub all: StatsAll,
    /// Newer engines report per-index stats at the top level
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub indices: HashMap<String, IndexStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsAll {
    #[serde(default)]
    pub primaries: StatsGroups,
    #[serde(default)]
    pub total: StatsGroups,
    #[serde(default)]
    pub indices: HashMap<String, IndexStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    #[serde(default)]
    pub primaries: StatsGroups,
    #[serde(default)]
    pub total: StatsGroups,
}

impl StatsResponse {
    /// Per-index stats wherever this engine version put them
    pub fn index(&self, name: &str) -> Option<&IndexStats> {
        self.all.indices.get(name).or_else(|| self.indices.get(name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStatusResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(rename = "_shards", default)]
    pub shards: Shard,
    #[serde(default)]
    pub indices: HashMap<String, IndexStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStatus {
    #[serde(default)]
    pub index: MetricMap,
    #[serde(default)]
    pub translog: MetricMap,
    #[serde(default)]
    pub docs: MetricMap,
    #[serde(default)]
    pub merges: MetricMap,
    #[serde(default)]
    pub refresh: MetricMap,
    #[serde(default)]
    pub flush: MetricMap,
}

/// Treat an explicit `null` like an absent field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `hits.total` is a bare count on older engines and `{"value": n}` on newer ones
fn total_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Total {
        Count(u64),
        Object { value: u64 },
    }

    Ok(match Option::<Total>::deserialize(deserializer)? {
        Some(Total::Count(n)) | Some(Total::Object { value: n }) => n,
        None => 0,
    })
}
