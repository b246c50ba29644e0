//! Searchlink Client Library
//!
//! HTTP client for document-oriented search engines exposing a REST
//! document API: index administration, single-document CRUD, search,
//! bulk mutation and stats.
//!
//! ```rust,no_run
//! use searchlink_rs::{Connection, QueryArgs};
//! use serde_json::json;
//!
//! # async fn demo() -> searchlink_rs::Result<()> {
//! let conn = Connection::new("localhost", "9200");
//! let results = conn
//!     .search(json!({"query": {"match_all": {}}}), &["tweets"], &[])
//!     .await?;
//! println!("{} hits", results.hits.total);
//! # Ok(())
//! # }
//! ```

mod connection;
mod request;
mod transport;

pub use connection::Connection;
pub use request::Request;
pub use transport::{HttpTransport, Method, RawResponse, Transport};

pub use searchlink_core::{
    BulkCommand, BulkItem, BulkResponse, Config, CountResponse, Document, Error, Fields, Hit, Hits,
    IndexStats, IndexStatus, IndexStatusResponse, Item, Metric, MetricMap, Payload, QueryArgs,
    Response, Result, SearchResponse, Shard, StatsResponse,
};
