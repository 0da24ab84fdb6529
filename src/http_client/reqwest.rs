use super::{BareHttpClient, BareRequest, BareResponse, HttpClientError};
use crate::{
    config::{ProxyConfig, TrustConfig},
    error::Error,
};
use alloc::sync::Arc;
use async_trait::async_trait;
use core::{error, iter::successors};
use log::{trace, warn};
use reqwest::{Certificate, Client, ClientBuilder, Proxy, redirect::Policy};
use std::io;
use tokio::fs::read;
use url::Url;

/// An HTTP client based on [`reqwest`].
#[derive(Debug)]
pub struct ReqwestHttpClient {
    client: Client,
    proxy: ProxyConfig,
}

impl ReqwestHttpClient {
    /// Creates an HTTP client.
    pub async fn new(proxy: &ProxyConfig, trust: &TrustConfig) -> Result<Self, Error> {
        let mut builder = ClientBuilder::new()
            .tcp_keepalive(None)
            .redirect(Policy::none());

        if proxy.is_empty() {
            builder = builder.no_proxy();
        }

        if let Some(url) = proxy.http() {
            builder = builder.proxy(Proxy::http(url.as_str())?);
        }

        if let Some(url) = proxy.https() {
            builder = builder.proxy(Proxy::https(url.as_str())?);
        }

        builder = match trust {
            TrustConfig::BuiltIn => builder,
            TrustConfig::Bundle(path) => {
                let certificates = Certificate::from_pem_bundle(&read(path).await?)?;

                trace!(
                    "loaded {} certificates from {}",
                    certificates.len(),
                    path.display()
                );

                certificates.into_iter().fold(
                    builder.tls_built_in_root_certs(false),
                    ClientBuilder::add_root_certificate,
                )
            }
            TrustConfig::Insecure => {
                warn!("certificate verification is disabled");
                builder.danger_accept_invalid_certs(true)
            }
        };

        Ok(Self {
            client: builder.build()?,
            proxy: proxy.clone(),
        })
    }

    fn classify(&self, url: &Url, error: &reqwest::Error) -> HttpClientError {
        ErrorSignals::new(error, self.proxy.get(url.scheme()).is_some())
            .classify(render_sources(error).into())
    }
}

#[async_trait]
impl BareHttpClient for ReqwestHttpClient {
    async fn get(&self, request: &BareRequest) -> Result<BareResponse, HttpClientError> {
        trace!("sending a request to {}", &request.url);

        let response = self
            .client
            .get(request.url.clone())
            .headers(request.headers.clone())
            .send()
            .await
            .map_err(|error| self.classify(&request.url, &error))?;

        trace!("got {} response from {}", response.status(), &request.url);

        Ok(BareResponse {
            url: response.url().clone(),
            status: response.status(),
            headers: response.headers().clone(),
            body: response
                .bytes()
                .await
                .map_err(|error| self.classify(&request.url, &error))?
                .to_vec(),
        })
    }
}

/// Causes observed on an error chain.
#[derive(Clone, Copy, Debug, Default)]
struct ErrorSignals {
    tls: bool,
    proxy: bool,
    connect: bool,
    timeout: bool,
}

impl ErrorSignals {
    fn new(error: &reqwest::Error, proxied: bool) -> Self {
        let connect = error.is_connect();

        Self {
            tls: sources(error).any(is_tls_error),
            // The outermost message embeds the target URL.
            proxy: (proxied && connect) || sources(error).skip(1).any(is_proxy_error),
            connect,
            timeout: error.is_timeout(),
        }
    }

    // The most specific cause wins as a TLS failure through a proxy is also a
    // connection failure.
    fn classify(self, message: Arc<str>) -> HttpClientError {
        if self.tls {
            HttpClientError::Tls(message)
        } else if self.proxy {
            HttpClientError::Proxy(message)
        } else if self.connect {
            HttpClientError::Connection(message)
        } else if self.timeout {
            HttpClientError::Timeout(message)
        } else {
            HttpClientError::Http(message)
        }
    }
}

fn sources<'a>(
    error: &'a (dyn error::Error + 'static),
) -> impl Iterator<Item = &'a (dyn error::Error + 'static)> {
    // I/O errors hide their inner errors from `source`.
    successors(Some(error), |&error| {
        error
            .downcast_ref::<io::Error>()
            .and_then(io::Error::get_ref)
            .map(|error| error as &(dyn error::Error + 'static))
            .or_else(|| error.source())
    })
}

fn is_tls_error(error: &(dyn error::Error + 'static)) -> bool {
    error.is::<rustls::Error>()
}

fn is_proxy_error(error: &(dyn error::Error + 'static)) -> bool {
    let message = error.to_string().to_lowercase();

    message.contains("tunnel") || message.contains("proxy")
}

fn render_sources(error: &reqwest::Error) -> String {
    let mut messages = Vec::<String>::new();

    for error in sources(error) {
        let message = error.to_string();

        if messages.last() != Some(&message) {
            messages.push(message);
        }
    }

    messages.join(": ")
}
