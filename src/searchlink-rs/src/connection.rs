use searchlink_core::{
    BulkResponse, Config, CountResponse, Document, Error, IndexStatusResponse, Payload, QueryArgs,
    Response, Result, SearchResponse, StatsResponse,
};
use searchlink_core::decode::decode_bulk;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::request::Request;
use crate::transport::{HttpTransport, Method, Transport};

/// Connection addresses one engine node.
///
/// It holds no mutable state: every operation builds and runs its own
/// [`Request`], so a connection can be cloned or shared across tasks freely.
#[derive(Clone)]
pub struct Connection {
    host: String,
    port: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

impl Connection {
    /// Create a connection using the default HTTP transport
    pub fn new(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self::with_transport(host, port, Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(
        host: impl Into<String>,
        port: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            transport,
        }
    }

    /// Create a connection from loaded configuration, applying its timeout
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = match config.timeout_secs {
            Some(secs) => HttpTransport::with_timeout(Duration::from_secs(secs))?,
            None => HttpTransport::new(),
        };
        Ok(Self::with_transport(
            config.host.clone(),
            config.port.clone(),
            Arc::new(transport),
        ))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Start a request against this connection
    pub fn request(&self, method: Method) -> Request<'_> {
        Request::new(self, method)
    }

    /// Create an index, optionally with settings and mappings
    #[tracing::instrument(skip(self, mapping))]
    pub async fn create_index(&self, name: &str, mapping: Option<Payload>) -> Result<Response> {
        let mut req = self.request(Method::PUT).indices([name]);
        if let Some(mapping) = mapping {
            req = req.payload(mapping);
        }
        req.run().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_index(&self, name: &str) -> Result<Response> {
        self.request(Method::DELETE).indices([name]).run().await
    }

    /// Make recent writes to `name` visible to search
    #[tracing::instrument(skip(self))]
    pub async fn refresh_index(&self, name: &str) -> Result<Response> {
        self.request(Method::POST)
            .indices([name])
            .api("_refresh")
            .run()
            .await
    }

    /// Index a single document.
    ///
    /// Documents with an id are PUT to that id; without one the engine
    /// assigns the id.
    #[tracing::instrument(skip(self, doc, args), fields(index = ?doc.index, id = ?doc.id))]
    pub async fn index(&self, doc: &Document, args: QueryArgs) -> Result<Response> {
        let index = require_index(doc)?;
        let fields = Payload::Structured(serde_json::Value::Object(doc.fields.clone()));

        let req = match &doc.id {
            Some(id) => self.request(Method::PUT).id(id.as_str()),
            None => self.request(Method::POST),
        };

        req.indices([index])
            .types([doc.doc_type.as_str()])
            .payload(fields)
            .args(args)
            .run()
            .await
    }

    #[tracing::instrument(skip(self, args))]
    pub async fn get(&self, index: &str, doc_type: &str, id: &str, args: QueryArgs) -> Result<Response> {
        self.request(Method::GET)
            .indices([index])
            .types([doc_type])
            .id(id)
            .args(args)
            .run()
            .await
    }

    /// Delete a single document by id.
    ///
    /// Deleting an id that no longer exists is not an error: the engine
    /// answers with `found == false` and still increments the version.
    #[tracing::instrument(skip(self, doc, args), fields(index = ?doc.index, id = ?doc.id))]
    pub async fn delete(&self, doc: &Document, args: QueryArgs) -> Result<Response> {
        let index = require_index(doc)?;
        let id = doc
            .id
            .as_deref()
            .ok_or_else(|| Error::Encoding("document id is required for delete".to_string()))?;

        self.request(Method::DELETE)
            .indices([index])
            .types([doc.doc_type.as_str()])
            .id(id)
            .args(args)
            .run()
            .await
    }

    #[tracing::instrument(skip(self, query))]
    pub async fn search(
        &self,
        query: impl Into<Payload>,
        indices: &[&str],
        types: &[&str],
    ) -> Result<SearchResponse> {
        self.search_with_args(query, indices, types, QueryArgs::new())
            .await
    }

    /// Search with extra query-string arguments (routing, paging, `search_type`)
    #[tracing::instrument(skip(self, query, args))]
    pub async fn search_with_args(
        &self,
        query: impl Into<Payload>,
        indices: &[&str],
        types: &[&str],
        args: QueryArgs,
    ) -> Result<SearchResponse> {
        self.request(Method::POST)
            .indices(indices.iter().copied())
            .types(types.iter().copied())
            .api("_search")
            .payload(query)
            .args(args)
            .run()
            .await
    }

    #[tracing::instrument(skip(self, query))]
    pub async fn count(
        &self,
        query: impl Into<Payload>,
        indices: &[&str],
        types: &[&str],
    ) -> Result<CountResponse> {
        self.request(Method::POST)
            .indices(indices.iter().copied())
            .types(types.iter().copied())
            .api("_count")
            .payload(query)
            .run()
            .await
    }

    /// Open a scan cursor; pages are fetched with [`Connection::scroll`].
    ///
    /// The first response carries only the scroll id, no hits.
    #[tracing::instrument(skip(self, query))]
    pub async fn scan(
        &self,
        query: impl Into<Payload>,
        indices: &[&str],
        types: &[&str],
        scroll: &str,
        size: usize,
    ) -> Result<SearchResponse> {
        let mut args = QueryArgs::new();
        args.set("search_type", "scan")
            .set("scroll", scroll)
            .set("size", size.to_string());

        self.search_with_args(query, indices, types, args).await
    }

    /// Fetch the next page of a scan or scroll search
    #[tracing::instrument(skip(self, scroll_id))]
    pub async fn scroll(&self, scroll_id: &str, scroll: &str) -> Result<SearchResponse> {
        self.request(Method::POST)
            .api("_search/scroll")
            .payload(Payload::Raw(scroll_id.to_string()))
            .args(QueryArgs::new().with("scroll", scroll))
            .run()
            .await
    }

    /// Send documents in one bulk request addressed to `index`.
    ///
    /// The returned items line up with `documents` position by position.
    #[tracing::instrument(skip(self, documents), fields(documents = documents.len()))]
    pub async fn bulk_send(&self, index: &str, documents: &[Document]) -> Result<BulkResponse> {
        let req = self
            .request(Method::POST)
            .indices([index])
            .api("_bulk")
            .bulk(documents);
        let response = req.send().await?;
        decode_bulk(response.status, &response.body, documents)
    }

    /// Index statistics; an empty index list covers the whole cluster
    #[tracing::instrument(skip(self, args))]
    pub async fn stats(&self, indices: &[&str], args: QueryArgs) -> Result<StatsResponse> {
        self.request(Method::GET)
            .indices(indices.iter().copied())
            .api("_stats")
            .args(args)
            .run()
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn index_status(&self, indices: &[&str]) -> Result<IndexStatusResponse> {
        self.request(Method::GET)
            .indices(indices.iter().copied())
            .api("_status")
            .run()
            .await
    }
}

fn require_index(doc: &Document) -> Result<&str> {
    doc.index
        .as_deref()
        .ok_or_else(|| Error::Encoding("document index is required outside bulk requests".to_string()))
}
