use async_trait::async_trait;
use reqwest::Client as HttpClient;
use searchlink_core::{Body, Error, Result};
use std::time::Duration;

pub use reqwest::Method;

/// Status and body of one HTTP exchange, before decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Transport performs a single HTTP exchange.
///
/// Implementations report connection, DNS and timeout failures as
/// [`Error::Transport`] with the underlying message unchanged, and must not
/// retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn perform(&self, method: Method, url: &str, body: Option<Body>) -> Result<RawResponse>;
}

/// reqwest-backed transport
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: HttpClient,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: HttpClient::new(),
        }
    }

    /// Transport whose requests fail with a transport error after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;
        Ok(Self { client })
    }

    pub fn from_client(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(&self, method: Method, url: &str, body: Option<Body>) -> Result<RawResponse> {
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, body.content_type)
                .body(body.bytes);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(transport_error)?;

        Ok(RawResponse {
            status,
            body: bytes.to_vec(),
        })
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    Error::Transport(err.to_string())
}
