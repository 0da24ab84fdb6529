use alloc::sync::Arc;
use core::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// A transport failure, classified from the most specific cause.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HttpClientError {
    /// A TLS handshake or certificate verification failure.
    Tls(Arc<str>),
    /// A failure reaching or negotiating with a proxy.
    Proxy(Arc<str>),
    /// A connection failure to the target host.
    Connection(Arc<str>),
    /// A timeout.
    Timeout(Arc<str>),
    /// Any other request failure.
    Http(Arc<str>),
}

impl HttpClientError {
    /// Returns a detail message.
    pub fn message(&self) -> &str {
        match self {
            Self::Tls(message)
            | Self::Proxy(message)
            | Self::Connection(message)
            | Self::Timeout(message)
            | Self::Http(message) => message,
        }
    }
}

impl Error for HttpClientError {}

impl Display for HttpClientError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tls(error) => write!(formatter, "tls: {error}"),
            Self::Proxy(error) => write!(formatter, "proxy: {error}"),
            Self::Connection(error) => write!(formatter, "connection: {error}"),
            Self::Timeout(error) => write!(formatter, "timeout: {error}"),
            Self::Http(error) => write!(formatter, "{error}"),
        }
    }
}

impl From<tokio::time::error::Elapsed> for HttpClientError {
    fn from(error: tokio::time::error::Elapsed) -> Self {
        Self::Timeout(error.to_string().into())
    }
}
