use crate::http_client::{BareResponse, HttpClientError};
use core::time::Duration;
use http::{StatusCode, header::LOCATION};
use serde::Serialize;
use url::Url;

/// A maximum number of characters kept from an unexpected response body.
pub const BODY_PREVIEW_LENGTH: usize = 300;

/// A transport failure category.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// TLS handshake or certificate verification failed.
    Tls,
    /// A proxy was unreachable or rejected the request.
    Proxy,
    /// A connection to the target failed.
    Connection,
    /// A request timed out.
    Timeout,
    /// Any other request failure.
    Other,
}

/// A probe outcome.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    /// A `200` response.
    Success,
    /// A `302` response.
    Redirect {
        /// A `Location` header value.
        location: Option<String>,
    },
    /// Any other response.
    UnexpectedStatus {
        /// A status code.
        #[serde(with = "http_serde::status_code")]
        status: StatusCode,
        /// A body preview.
        body: String,
    },
    /// A transport failure.
    Failure {
        /// A failure category.
        kind: FailureKind,
        /// A detail message.
        message: String,
    },
}

impl Outcome {
    /// Classifies a response.
    pub fn from_response(response: &BareResponse) -> Self {
        match response.status {
            StatusCode::OK => Self::Success,
            StatusCode::FOUND => Self::Redirect {
                location: response
                    .headers
                    .get(LOCATION)
                    .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned()),
            },
            status => Self::UnexpectedStatus {
                status,
                body: preview_body(&response.body),
            },
        }
    }

    /// Returns a process exit code.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Redirect { .. } => 2,
            Self::UnexpectedStatus { .. } => 3,
            Self::Failure { kind, .. } => match kind {
                FailureKind::Tls => 4,
                FailureKind::Proxy => 5,
                FailureKind::Connection => 6,
                FailureKind::Timeout => 7,
                FailureKind::Other => 8,
            },
        }
    }
}

impl From<Result<BareResponse, HttpClientError>> for Outcome {
    fn from(result: Result<BareResponse, HttpClientError>) -> Self {
        match result {
            Ok(response) => Self::from_response(&response),
            Err(error) => error.into(),
        }
    }
}

impl From<HttpClientError> for Outcome {
    fn from(error: HttpClientError) -> Self {
        Self::Failure {
            kind: match &error {
                HttpClientError::Tls(_) => FailureKind::Tls,
                HttpClientError::Proxy(_) => FailureKind::Proxy,
                HttpClientError::Connection(_) => FailureKind::Connection,
                HttpClientError::Timeout(_) => FailureKind::Timeout,
                HttpClientError::Http(_) => FailureKind::Other,
            },
            message: error.message().into(),
        }
    }
}

fn preview_body(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(BODY_PREVIEW_LENGTH)
        .collect()
}

/// A probe report.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Report {
    url: Url,
    outcome: Outcome,
    duration: Duration,
}

impl Report {
    /// Creates a report.
    pub const fn new(url: Url, outcome: Outcome, duration: Duration) -> Self {
        Self {
            url,
            outcome,
            duration,
        }
    }

    /// Returns a target URL.
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Returns an outcome.
    pub const fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns a duration of the probe.
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}
