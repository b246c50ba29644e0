//! Response envelope decoding.
//!
//! The engine reports failures two ways: an `error` field in the body (with
//! an optional `status` echo) or a non-success HTTP status with a body that
//! is not a JSON envelope. Both become [`Error::Engine`] with the engine's
//! message untouched. A non-success status carrying a regular envelope is a
//! result, not an error: get and delete of a missing document come back as
//! 404 with `exists`/`found` set to false.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::Document;
use crate::response::BulkResponse;

/// Decode a response body into `T`, surfacing engine-side errors first
pub fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) if !is_success(status) => return Err(raw_engine_error(status, body)),
        Err(err) => return Err(Error::decoding(err, body)),
    };

    if let Some(err) = engine_error(status, &value) {
        return Err(err);
    }

    if !value.is_object() {
        if !is_success(status) {
            return Err(raw_engine_error(status, body));
        }
        return Err(Error::decoding("expected a JSON object at the top level", body));
    }

    serde_json::from_value(value).map_err(|err| Error::decoding(err, body))
}

/// Decode a bulk response and line it up with the submitted documents.
///
/// Item `i` must answer document `i` under that document's own command.
pub fn decode_bulk(status: u16, body: &[u8], documents: &[Document]) -> Result<BulkResponse> {
    let bulk: BulkResponse = decode(status, body)?;

    if bulk.items.len() != documents.len() {
        return Err(Error::decoding(
            format!(
                "bulk response has {} items for {} documents",
                bulk.items.len(),
                documents.len()
            ),
            body,
        ));
    }

    let misaligned = bulk
        .items
        .iter()
        .zip(documents)
        .position(|(item, doc)| item.command != doc.bulk_command);
    if let Some(position) = misaligned {
        return Err(Error::decoding(
            format!(
                "bulk item {} answers {} for a {} document",
                position, bulk.items[position].command, documents[position].bulk_command
            ),
            body,
        ));
    }

    Ok(bulk)
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn engine_error(status: u16, value: &Value) -> Option<Error> {
    let error = value.get("error").filter(|e| !e.is_null())?;

    let message = match error {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    let status = value
        .get("status")
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
        .unwrap_or(status);

    Some(Error::Engine { status, message })
}

fn raw_engine_error(status: u16, body: &[u8]) -> Error {
    Error::Engine {
        status,
        message: String::from_utf8_lossy(body).into_owned(),
    }
}
