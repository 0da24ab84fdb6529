mod error;
mod reqwest;
#[cfg(test)]
mod stub;

#[cfg(test)]
pub use self::stub::{StubHttpClient, build_stub_response};
pub use self::{error::HttpClientError, reqwest::ReqwestHttpClient};
use async_trait::async_trait;
use http::{HeaderMap, StatusCode};
use url::Url;

/// A bare HTTP client sending a single request without following redirects.
#[async_trait]
pub trait BareHttpClient: Send + Sync {
    /// Sends a GET request.
    async fn get(&self, request: &BareRequest) -> Result<BareResponse, HttpClientError>;
}

/// A bare HTTP request.
#[derive(Clone, Debug)]
pub struct BareRequest {
    /// A URL.
    pub url: Url,
    /// Headers.
    pub headers: HeaderMap,
}

/// A bare HTTP response.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BareResponse {
    /// A URL.
    pub url: Url,
    /// A status code.
    pub status: StatusCode,
    /// Headers.
    pub headers: HeaderMap,
    /// A body.
    pub body: Vec<u8>,
}
