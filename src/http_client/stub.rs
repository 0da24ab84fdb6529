use crate::http_client::{BareHttpClient, BareRequest, BareResponse, HttpClientError};
use async_trait::async_trait;
use core::time::Duration;
use http::{HeaderMap, StatusCode};
use tokio::time::sleep;
use url::Url;

#[derive(Debug)]
pub struct StubHttpClient {
    result: Result<BareResponse, HttpClientError>,
    delay: Duration,
}

impl StubHttpClient {
    pub fn new(result: Result<BareResponse, HttpClientError>) -> Self {
        Self {
            result,
            delay: Default::default(),
        }
    }

    pub fn set_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl BareHttpClient for StubHttpClient {
    async fn get(&self, request: &BareRequest) -> Result<BareResponse, HttpClientError> {
        sleep(self.delay).await;

        let response = self.result.clone()?;

        if response.url != request.url {
            return Err(HttpClientError::Http("unexpected url".into()));
        }

        Ok(response)
    }
}

pub fn build_stub_response(
    url: &str,
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
) -> Result<BareResponse, HttpClientError> {
    Ok(BareResponse {
        url: Url::parse(url).unwrap(),
        status,
        headers,
        body,
    })
}
