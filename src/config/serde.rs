use super::{Config, DEFAULT_URL, ProxyConfig, TrustConfig, error::ConfigError};
use duration_string::DurationString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// A serializable configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SerializableConfig {
    url: Option<Url>,
    timeout: Option<DurationString>,
    proxy: Option<SerializableProxyConfig>,
    tls: Option<TlsConfig>,
}

impl SerializableConfig {
    /// Sets a target URL.
    pub fn set_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    /// Sets a timeout.
    pub fn set_timeout(mut self, timeout: &str) -> Result<Self, ConfigError> {
        self.timeout = Some(
            timeout
                .parse::<DurationString>()
                .map_err(|error| ConfigError::InvalidDuration(error.to_string()))?,
        );
        Ok(self)
    }

    /// Sets a proxy for `http` URLs.
    pub fn set_http_proxy(mut self, url: Url) -> Self {
        self.proxy.get_or_insert_default().http = Some(url);
        self
    }

    /// Sets a proxy for `https` URLs.
    pub fn set_https_proxy(mut self, url: Url) -> Self {
        self.proxy.get_or_insert_default().https = Some(url);
        self
    }

    /// Sets a CA bundle path.
    pub fn set_ca_bundle(mut self, path: PathBuf) -> Self {
        self.tls.get_or_insert_default().ca_bundle = Some(path);
        self
    }

    /// Sets whether certificate verification is disabled.
    pub fn set_insecure(mut self, insecure: bool) -> Self {
        self.tls.get_or_insert_default().insecure = Some(insecure);
        self
    }

    /// Merges another configuration.
    pub fn merge(&mut self, other: Self) {
        if other.url.is_some() {
            self.url = other.url;
        }

        if other.timeout.is_some() {
            self.timeout = other.timeout;
        }

        if let Some(other) = other.proxy {
            if let Some(proxy) = &mut self.proxy {
                proxy.merge(other);
            } else {
                self.proxy = Some(other);
            }
        }

        if let Some(other) = other.tls {
            if let Some(tls) = &mut self.tls {
                tls.merge(other);
            } else {
                self.tls = Some(other);
            }
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SerializableProxyConfig {
    http: Option<Url>,
    https: Option<Url>,
}

impl SerializableProxyConfig {
    fn merge(&mut self, other: Self) {
        if other.http.is_some() {
            self.http = other.http;
        }

        if other.https.is_some() {
            self.https = other.https;
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TlsConfig {
    ca_bundle: Option<PathBuf>,
    insecure: Option<bool>,
}

impl TlsConfig {
    fn merge(&mut self, other: Self) {
        if other.ca_bundle.is_some() {
            self.ca_bundle = other.ca_bundle;
        }

        if other.insecure.is_some() {
            self.insecure = other.insecure;
        }
    }
}

/// Compiles a configuration.
pub fn compile_config(config: SerializableConfig) -> Result<Config, ConfigError> {
    let url = match config.url {
        Some(url) => url,
        None => Url::parse(DEFAULT_URL)?,
    };
    let proxy = config
        .proxy
        .map(|proxy| ProxyConfig::new(proxy.http, proxy.https))
        .unwrap_or_default();
    let tls = config.tls.unwrap_or_default();
    let trust = match (tls.ca_bundle, tls.insecure.unwrap_or_default()) {
        (Some(path), true) => return Err(ConfigError::ConflictingTrust(path)),
        (Some(path), false) => TrustConfig::Bundle(path),
        (None, true) => TrustConfig::Insecure,
        (None, false) => TrustConfig::BuiltIn,
    };

    let mut compiled = Config::new(url).set_proxy(proxy).set_trust(trust);

    if let Some(timeout) = config.timeout {
        compiled = compiled.set_timeout(*timeout);
    }

    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TIMEOUT;
    use core::time::Duration;
    use pretty_assertions::assert_eq;

    #[test]
    fn compile_empty() {
        let config = compile_config(Default::default()).unwrap();

        assert_eq!(config.url(), &Url::parse(DEFAULT_URL).unwrap());
        assert!(config.proxy().is_empty());
        assert_eq!(config.trust(), &TrustConfig::BuiltIn);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn compile_full() {
        let proxy = Url::parse("http://proxy.internal:3128").unwrap();

        let config = compile_config(SerializableConfig {
            url: Some(Url::parse("https://example.com").unwrap()),
            timeout: Some(Duration::from_secs(42).into()),
            proxy: Some(SerializableProxyConfig {
                http: Some(proxy.clone()),
                https: Some(proxy.clone()),
            }),
            tls: Some(TlsConfig {
                ca_bundle: Some("/etc/ssl/certs/ca-certificates.crt".into()),
                insecure: Some(false),
            }),
        })
        .unwrap();

        assert_eq!(
            config,
            Config::new(Url::parse("https://example.com").unwrap())
                .set_proxy(ProxyConfig::new(Some(proxy.clone()), Some(proxy)))
                .set_trust(TrustConfig::Bundle(
                    "/etc/ssl/certs/ca-certificates.crt".into()
                ))
                .set_timeout(Duration::from_secs(42))
        );
    }

    #[test]
    fn compile_insecure() {
        assert_eq!(
            compile_config(SerializableConfig::default().set_insecure(true))
                .unwrap()
                .trust(),
            &TrustConfig::Insecure
        );
    }

    #[test]
    fn fail_to_compile_conflicting_trust() {
        assert!(matches!(
            compile_config(
                SerializableConfig::default()
                    .set_ca_bundle("ca.pem".into())
                    .set_insecure(true)
            ),
            Err(ConfigError::ConflictingTrust(_))
        ));
    }

    #[test]
    fn set_timeout() {
        assert_eq!(
            SerializableConfig::default()
                .set_timeout("250ms")
                .unwrap()
                .timeout
                .as_deref()
                .copied(),
            Some(Duration::from_millis(250))
        );
    }

    #[test]
    fn fail_to_set_invalid_timeout() {
        assert!(matches!(
            SerializableConfig::default().set_timeout("soon"),
            Err(ConfigError::InvalidDuration(_))
        ));
    }

    #[test]
    fn merge_configs() {
        let foo = Url::parse("http://foo.internal:3128").unwrap();
        let bar = Url::parse("http://bar.internal:3128").unwrap();

        let mut config = SerializableConfig::default()
            .set_url(Url::parse("https://foo.com").unwrap())
            .set_http_proxy(foo.clone())
            .set_https_proxy(foo)
            .set_ca_bundle("foo.pem".into());

        config.merge(
            SerializableConfig::default()
                .set_https_proxy(bar.clone())
                .set_timeout("1s")
                .unwrap(),
        );

        let config = compile_config(config).unwrap();

        assert_eq!(config.url().as_str(), "https://foo.com/");
        assert_eq!(
            config.proxy().http(),
            Some(&Url::parse("http://foo.internal:3128").unwrap())
        );
        assert_eq!(config.proxy().https(), Some(&bar));
        assert_eq!(config.trust(), &TrustConfig::Bundle("foo.pem".into()));
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }
}
