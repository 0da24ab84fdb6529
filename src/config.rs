mod error;
mod serde;
mod toml;

pub use self::{
    error::ConfigError,
    serde::{SerializableConfig, compile_config},
    toml::read_config,
};
use core::time::Duration;
use std::path::PathBuf;
use url::Url;

/// A default target URL.
pub const DEFAULT_URL: &str = "https://mcr.microsoft.com";
/// A default timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A probe configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    url: Url,
    proxy: ProxyConfig,
    trust: TrustConfig,
    timeout: Duration,
}

impl Config {
    /// Creates a configuration.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            proxy: Default::default(),
            trust: Default::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Returns a target URL.
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Returns a proxy configuration.
    pub const fn proxy(&self) -> &ProxyConfig {
        &self.proxy
    }

    /// Returns a trust configuration.
    pub const fn trust(&self) -> &TrustConfig {
        &self.trust
    }

    /// Returns a timeout.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sets a proxy configuration.
    pub fn set_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = proxy;
        self
    }

    /// Sets a trust configuration.
    pub fn set_trust(mut self, trust: TrustConfig) -> Self {
        self.trust = trust;
        self
    }

    /// Sets a timeout.
    pub const fn set_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A proxy configuration keyed by target URL schemes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProxyConfig {
    http: Option<Url>,
    https: Option<Url>,
}

impl ProxyConfig {
    /// Creates a proxy configuration.
    pub const fn new(http: Option<Url>, https: Option<Url>) -> Self {
        Self { http, https }
    }

    /// Returns a proxy for `http` URLs.
    pub const fn http(&self) -> Option<&Url> {
        self.http.as_ref()
    }

    /// Returns a proxy for `https` URLs.
    pub const fn https(&self) -> Option<&Url> {
        self.https.as_ref()
    }

    /// Returns a proxy for a URL scheme.
    pub fn get(&self, scheme: &str) -> Option<&Url> {
        match scheme {
            "http" => self.http(),
            "https" => self.https(),
            _ => None,
        }
    }

    /// Returns `true` if no proxy is configured.
    pub const fn is_empty(&self) -> bool {
        self.http.is_none() && self.https.is_none()
    }
}

/// A certificate trust configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum TrustConfig {
    /// Built-in web PKI roots.
    #[default]
    BuiltIn,
    /// Certificates in a PEM bundle file.
    Bundle(PathBuf),
    /// No certificate verification. Only for testing.
    Insecure,
}
