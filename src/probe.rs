use crate::{
    config::Config,
    http_client::{BareHttpClient, BareRequest},
    outcome::Report,
    timer::Timer,
};
use http::{HeaderValue, header::USER_AGENT};
use log::debug;
use tokio::time::timeout;

const AGENT: &str = concat!("proxy-probe/", env!("CARGO_PKG_VERSION"));

/// A connectivity probe sending a single request.
pub struct Probe {
    client: Box<dyn BareHttpClient>,
    timer: Box<dyn Timer>,
}

impl Probe {
    /// Creates a probe.
    pub fn new(client: impl BareHttpClient + 'static, timer: impl Timer + 'static) -> Self {
        Self {
            client: Box::new(client),
            timer: Box::new(timer),
        }
    }

    /// Sends a request once and classifies its outcome.
    pub async fn run(&self, config: &Config) -> Report {
        let request = BareRequest {
            url: config.url().clone(),
            headers: [(USER_AGENT, HeaderValue::from_static(AGENT))]
                .into_iter()
                .collect(),
        };

        debug!(
            "probing {} with timeout {:?} via {:?}",
            request.url,
            config.timeout(),
            config.proxy().get(request.url.scheme())
        );

        let start = self.timer.now();
        let result = timeout(config.timeout(), self.client.get(&request))
            .await
            .unwrap_or_else(|error| Err(error.into()));
        let duration = self.timer.now().duration_since(start);

        debug!("probe finished in {duration:?}");

        Report::new(request.url, result.into(), duration)
    }
}
