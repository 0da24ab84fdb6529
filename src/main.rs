#![doc = include_str!("../README.md")]

use clap::Parser;
use core::error::Error;
use env_logger::Env;
use proxy_probe::{
    ClockTimer, Probe, RenderFormat, RenderOptions, ReqwestHttpClient, SerializableConfig,
    compile_config, read_config, render_report,
};
use std::{path::PathBuf, process::exit};
use tokio::io::{AsyncWriteExt, stdout};
use url::Url;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    /// A target URL.
    url: Option<Url>,
    /// A configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// A proxy for both `http` and `https` URLs.
    #[arg(long)]
    proxy: Option<Url>,
    /// A proxy for `http` URLs.
    #[arg(long)]
    http_proxy: Option<Url>,
    /// A proxy for `https` URLs.
    #[arg(long)]
    https_proxy: Option<Url>,
    /// A CA certificate bundle in PEM.
    #[arg(long)]
    ca_bundle: Option<PathBuf>,
    /// Disables certificate verification. Only for testing.
    #[arg(long)]
    insecure: bool,
    /// A timeout (e.g. `10s` or `500ms`).
    #[arg(long)]
    timeout: Option<String>,
    /// Sets an output format.
    #[arg(long, default_value = "text")]
    format: RenderFormat,
    /// Becomes verbose.
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(code) => exit(code),
        Err(error) => {
            eprintln!("{error}");
            exit(1)
        }
    }
}

async fn run() -> Result<i32, Box<dyn Error>> {
    let arguments = Arguments::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(if arguments.verbose {
        "proxy_probe=trace"
    } else {
        "warn"
    }))
    .init();

    let mut config = if let Some(path) = &arguments.config {
        read_config(path).await?
    } else {
        SerializableConfig::default()
    };
    config.merge(compile_arguments(&arguments)?);
    let config = compile_config(config)?;

    let probe = Probe::new(
        ReqwestHttpClient::new(config.proxy(), config.trust()).await?,
        ClockTimer::new(),
    );
    let report = probe.run(&config).await;
    let mut output = stdout();

    render_report(
        &report,
        &RenderOptions::new().set_format(arguments.format),
        &mut output,
    )
    .await?;
    output.flush().await?;

    Ok(report.outcome().exit_code())
}

fn compile_arguments(arguments: &Arguments) -> Result<SerializableConfig, Box<dyn Error>> {
    let mut config = SerializableConfig::default();

    if let Some(url) = &arguments.url {
        config = config.set_url(url.clone());
    }

    if let Some(url) = arguments.http_proxy.as_ref().or(arguments.proxy.as_ref()) {
        config = config.set_http_proxy(url.clone());
    }

    if let Some(url) = arguments.https_proxy.as_ref().or(arguments.proxy.as_ref()) {
        config = config.set_https_proxy(url.clone());
    }

    if let Some(path) = &arguments.ca_bundle {
        config = config.set_ca_bundle(path.clone());
    }

    if arguments.insecure {
        config = config.set_insecure(true);
    }

    if let Some(timeout) = &arguments.timeout {
        config = config.set_timeout(timeout)?;
    }

    Ok(config)
}
