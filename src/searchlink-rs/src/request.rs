use searchlink_core::decode::decode;
use searchlink_core::{build_url, encode_bulk, Body, Document, Payload, QueryArgs, Result, Target};
use serde::de::DeserializeOwned;

use crate::connection::Connection;
use crate::transport::{Method, RawResponse};

/// What a request carries as its body
#[derive(Debug, Clone)]
enum Content<'a> {
    Empty,
    Payload(Payload),
    Bulk(&'a [Document]),
}

/// Request is one logical operation against the engine.
///
/// Built per call and dropped once the response is decoded; it only borrows
/// the [`Connection`].
#[derive(Debug, Clone)]
pub struct Request<'a> {
    conn: &'a Connection,
    method: Method,
    target: Target,
    indices: Vec<String>,
    types: Vec<String>,
    content: Content<'a>,
    args: QueryArgs,
}

impl<'a> Request<'a> {
    pub fn new(conn: &'a Connection, method: Method) -> Self {
        Self {
            conn,
            method,
            target: Target::None,
            indices: Vec::new(),
            types: Vec::new(),
            content: Content::Empty,
            args: QueryArgs::new(),
        }
    }

    pub fn indices<I, S>(mut self, indices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indices = indices.into_iter().map(Into::into).collect();
        self
    }

    pub fn types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Address an API suffix; replaces any id
    pub fn api(mut self, api: impl Into<String>) -> Self {
        self.target = Target::Api(api.into());
        self
    }

    /// Address a single document; replaces any API suffix
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.target = Target::Id(id.into());
        self
    }

    pub fn payload(mut self, payload: impl Into<Payload>) -> Self {
        self.content = Content::Payload(payload.into());
        self
    }

    pub fn bulk(mut self, documents: &'a [Document]) -> Self {
        self.content = Content::Bulk(documents);
        self
    }

    pub fn args(mut self, args: QueryArgs) -> Self {
        self.args = args;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> String {
        build_url(
            self.conn.host(),
            self.conn.port(),
            &self.indices,
            &self.types,
            &self.target,
            &self.args,
        )
    }

    /// Encode the body; `None` when the request carries nothing
    pub fn body(&self) -> Result<Option<Body>> {
        match &self.content {
            Content::Empty => Ok(None),
            Content::Payload(payload) => payload.encode().map(Some),
            Content::Bulk(documents) => encode_bulk(documents).map(Some),
        }
    }

    /// Perform the exchange without decoding.
    ///
    /// Encoding failures return before anything is sent.
    pub async fn send(&self) -> Result<RawResponse> {
        let body = self.body()?;
        let url = self.url();

        tracing::debug!(method = %self.method, url = %url, "sending request");
        if let Some(text) = body.as_ref().and_then(Body::as_str) {
            tracing::trace!(body = text, "request body");
        }

        let response = self
            .conn
            .transport()
            .perform(self.method.clone(), &url, body)
            .await?;

        tracing::debug!(status = response.status, bytes = response.body.len(), "received response");
        Ok(response)
    }

    pub async fn run<T: DeserializeOwned>(&self) -> Result<T> {
        let response = self.send().await?;
        decode(response.status, &response.body)
    }
}
