mod options;
mod report;

pub use self::options::{RenderFormat, RenderOptions};
use self::report::RenderedReport;
use crate::{
    error::Error,
    outcome::{FailureKind, Outcome, Report},
};
use colored::Colorize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Renders a probe report.
pub async fn render_report(
    report: &Report,
    options: &RenderOptions,
    writer: &mut (impl AsyncWrite + Unpin),
) -> Result<(), Error> {
    match options.format() {
        RenderFormat::Text => render_text(report, writer).await,
        RenderFormat::Json => {
            render_line(
                writer,
                &serde_json::to_string(&RenderedReport::from(report))?,
            )
            .await
        }
    }
}

async fn render_text(report: &Report, writer: &mut (impl AsyncWrite + Unpin)) -> Result<(), Error> {
    let lines = match report.outcome() {
        Outcome::Success => vec![
            "✅ Success! TLS, proxy, and DNS are all working."
                .green()
                .to_string(),
        ],
        Outcome::Redirect { location } => vec![
            format!(
                "🔁 302 Redirect: {}",
                location.as_deref().unwrap_or("(no location)")
            )
            .yellow()
            .to_string(),
            "➡️ Likely redirected by a proxy to a login or block page.".into(),
        ],
        Outcome::UnexpectedStatus { status, body } => vec![
            format!("⚠️ Unexpected status code: {}", status.as_u16())
                .yellow()
                .to_string(),
            body.clone(),
        ],
        Outcome::Failure { kind, message } => {
            let (headline, cause) = describe_failure(*kind);
            let mut lines = vec![headline.red().to_string()];

            if let Some(cause) = cause {
                lines.push(format!("🔎 Possible cause: {cause}"));
            }

            if !message.is_empty() {
                lines.push(message.clone());
            }

            lines
        }
    };

    for line in lines {
        render_line(writer, &line).await?;
    }

    render_line(
        writer,
        &format!(
            "{} {}",
            report.url(),
            format!("{} ms", report.duration().as_millis()).dimmed()
        ),
    )
    .await
}

const fn describe_failure(kind: FailureKind) -> (&'static str, Option<&'static str>) {
    match kind {
        FailureKind::Tls => (
            "❌ TLS error: certificate verification failed.",
            Some("proxy TLS interception or an untrusted certificate."),
        ),
        FailureKind::Proxy => (
            "❌ Proxy error: unable to reach the proxy.",
            Some("proxy misconfigured, authentication failed, or proxy host down."),
        ),
        FailureKind::Connection => (
            "❌ Connection error: network or DNS failure.",
            Some("DNS resolution failed, firewall block, or bad endpoint."),
        ),
        FailureKind::Timeout => (
            "⏱️ Request timed out.",
            Some("proxy or server too slow or unreachable."),
        ),
        FailureKind::Other => ("❌ Unknown request error.", None),
    }
}

async fn render_line(writer: &mut (impl AsyncWrite + Unpin), string: &str) -> Result<(), Error> {
    writer.write_all(string.as_bytes()).await?;
    writer.write_all(b"\n").await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;
    use http::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use url::Url;

    fn build_report(outcome: Outcome) -> Report {
        Report::new(
            Url::parse("https://example.com").unwrap(),
            outcome,
            Duration::from_millis(42),
        )
    }

    async fn render(outcome: Outcome, format: RenderFormat) -> String {
        let mut output = Vec::<u8>::new();

        render_report(
            &build_report(outcome),
            &RenderOptions::new().set_format(format),
            &mut output,
        )
        .await
        .unwrap();

        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn render_success() {
        let output = render(Outcome::Success, RenderFormat::Text).await;

        assert!(output.contains("Success!"));
        assert!(output.contains("https://example.com/"));
        assert!(output.contains("42 ms"));
    }

    #[tokio::test]
    async fn render_redirect() {
        let output = render(
            Outcome::Redirect {
                location: Some("https://login.example.com".into()),
            },
            RenderFormat::Text,
        )
        .await;

        assert!(output.contains("302 Redirect: https://login.example.com"));
        assert!(output.contains("login or block page"));
    }

    #[tokio::test]
    async fn render_redirect_without_location() {
        let output = render(Outcome::Redirect { location: None }, RenderFormat::Text).await;

        assert!(output.contains("302 Redirect: (no location)"));
    }

    #[tokio::test]
    async fn render_unexpected_status() {
        let output = render(
            Outcome::UnexpectedStatus {
                status: StatusCode::FORBIDDEN,
                body: "blocked by policy".into(),
            },
            RenderFormat::Text,
        )
        .await;

        assert!(output.contains("Unexpected status code: 403"));
        assert!(output.contains("\nblocked by policy\n"));
    }

    #[tokio::test]
    async fn render_failures() {
        for (kind, headline) in [
            (FailureKind::Tls, "TLS error"),
            (FailureKind::Proxy, "Proxy error"),
            (FailureKind::Connection, "Connection error"),
            (FailureKind::Timeout, "Request timed out"),
            (FailureKind::Other, "Unknown request error"),
        ] {
            let output = render(
                Outcome::Failure {
                    kind,
                    message: "connection refused".into(),
                },
                RenderFormat::Text,
            )
            .await;

            assert!(output.contains(headline));
            assert!(output.contains("\nconnection refused\n"));
        }
    }

    #[tokio::test]
    async fn render_failure_cause() {
        let output = render(
            Outcome::Failure {
                kind: FailureKind::Proxy,
                message: Default::default(),
            },
            RenderFormat::Text,
        )
        .await;

        assert!(output.contains("Possible cause: proxy misconfigured"));
    }

    #[tokio::test]
    async fn render_json() {
        let output = render(
            Outcome::Failure {
                kind: FailureKind::Tls,
                message: "invalid peer certificate".into(),
            },
            RenderFormat::Json,
        )
        .await;

        assert!(output.ends_with('\n'));
        assert_eq!(
            serde_json::from_str::<Value>(&output).unwrap(),
            json!({
                "url": "https://example.com/",
                "duration": 42,
                "outcome": {
                    "type": "failure",
                    "kind": "tls",
                    "message": "invalid peer certificate",
                },
            })
        );
    }

    #[tokio::test]
    async fn render_json_status() {
        let output = render(
            Outcome::UnexpectedStatus {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "oops".into(),
            },
            RenderFormat::Json,
        )
        .await;

        assert_eq!(
            serde_json::from_str::<Value>(&output).unwrap()["outcome"],
            json!({
                "type": "unexpected_status",
                "status": 500,
                "body": "oops",
            })
        );
    }
}
