//! Searchlink Core Library
//!
//! Transport-free building blocks of the searchlink client:
//! - URL construction for index, type, id and API addressing
//! - Request body encoding, including the newline-delimited bulk format
//! - Typed decoding of the engine's response envelopes
//! - Error taxonomy and connection configuration

pub mod config;
pub mod decode;
pub mod error;
pub mod models;
pub mod payload;
pub mod response;
pub mod url;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use models::*;
pub use payload::{encode_bulk, Body, Payload};
pub use response::*;
pub use crate::url::{build_url, QueryArgs, Target};
