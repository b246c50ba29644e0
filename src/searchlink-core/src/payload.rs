//! Request body encoding.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::models::Document;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// Payload is a request body given either as a JSON value or as
/// pre-serialized text.
///
/// Raw text is sent byte for byte, which lets callers control key order and
/// numeric precision.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Structured(serde_json::Value),
    Raw(String),
}

impl Payload {
    /// Capture any serializable value as a structured payload
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Payload::Structured)
            .map_err(encoding)
    }

    pub fn encode(&self) -> Result<Body> {
        let bytes = match self {
            Payload::Structured(value) => serde_json::to_vec(value).map_err(encoding)?,
            Payload::Raw(text) => text.as_bytes().to_vec(),
        };
        Ok(Body {
            content_type: JSON_CONTENT_TYPE,
            bytes,
        })
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Structured(value)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Raw(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Raw(text.to_string())
    }
}

/// Body is an encoded request body and the content type it is sent with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Body {
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

#[derive(Serialize)]
struct BulkMetadata<'a> {
    #[serde(rename = "_index", skip_serializing_if = "Option::is_none")]
    index: Option<&'a str>,
    #[serde(rename = "_type", skip_serializing_if = "str::is_empty")]
    doc_type: &'a str,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
}

/// Encode documents as newline-delimited action/source line pairs.
///
/// Each document yields an action line `{"<command>": {metadata}}` followed
/// by its fields, except deletes which have no source line. Every line,
/// including the last, ends with `\n`.
pub fn encode_bulk(documents: &[Document]) -> Result<Body> {
    if documents.is_empty() {
        return Err(Error::Encoding("bulk request has no documents".to_string()));
    }

    let mut bytes = Vec::new();
    for doc in documents {
        let metadata = BulkMetadata {
            index: doc.index.as_deref(),
            doc_type: &doc.doc_type,
            id: doc.id.as_deref(),
        };
        let action = BTreeMap::from([(doc.bulk_command.as_str(), metadata)]);

        serde_json::to_writer(&mut bytes, &action).map_err(encoding)?;
        bytes.push(b'\n');

        if doc.bulk_command.has_source() {
            serde_json::to_writer(&mut bytes, &doc.fields).map_err(encoding)?;
            bytes.push(b'\n');
        }
    }

    tracing::trace!(documents = documents.len(), bytes = bytes.len(), "encoded bulk body");

    Ok(Body {
        content_type: NDJSON_CONTENT_TYPE,
        bytes,
    })
}

fn encoding(err: serde_json::Error) -> Error {
    Error::Encoding(err.to_string())
}
