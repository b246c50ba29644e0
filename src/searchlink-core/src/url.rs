//! Request URL construction.
//!
//! Paths follow the engine's multi-index convention: index and type lists are
//! comma-joined literally, then followed by either an API suffix (`_search`)
//! or a document id with a trailing slash, never both.

use std::collections::BTreeMap;
use ::url::form_urlencoded;

/// Target is the last path element of a request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Target {
    /// Address the index/type path itself (index create/delete)
    #[default]
    None,
    /// API suffix such as `_search`, `_bulk` or `_stats`
    Api(String),
    /// Single-document addressing by id
    Id(String),
}

impl Target {
    pub fn api(name: impl Into<String>) -> Self {
        Target::Api(name.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Target::Id(id.into())
    }
}

/// QueryArgs are extra query-string arguments, encoded sorted by key.
///
/// Values are stored unescaped and percent-encoded once, on output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs(BTreeMap<String, Vec<String>>);

impl QueryArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every value of `key` with `value`
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), vec![value.into()]);
        self
    }

    /// Append `value` to `key`, keeping earlier values
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.entry(key.into()).or_default().push(value.into());
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.0 {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryArgs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = QueryArgs::new();
        for (key, value) in iter {
            args.add(key, value);
        }
        args
    }
}

/// Build `http://host:port/<indices>/<types>/<target>?<args>`.
///
/// Empty lists are left out. A type list with no index list is addressed
/// under `_all`, the engine's name for every index.
pub fn build_url(
    host: &str,
    port: &str,
    indices: &[String],
    types: &[String],
    target: &Target,
    args: &QueryArgs,
) -> String {
    let mut segments: Vec<String> = Vec::with_capacity(3);

    if !indices.is_empty() {
        segments.push(indices.join(","));
    } else if !types.is_empty() {
        segments.push("_all".to_string());
    }

    if !types.is_empty() {
        segments.push(types.join(","));
    }

    match target {
        Target::Api(api) => segments.push(api.clone()),
        Target::Id(id) => segments.push(format!("{}/", id)),
        Target::None => {}
    }

    let mut url = format!("http://{}:{}/{}", host, port, segments.join("/"));
    if !args.is_empty() {
        url.push('?');
        url.push_str(&args.encode());
    }
    url
}
