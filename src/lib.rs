#![doc = include_str!("../README.md")]

extern crate alloc;

mod config;
mod error;
mod http_client;
mod outcome;
mod probe;
mod render;
mod timer;

pub use self::{
    config::{
        Config, ConfigError, DEFAULT_TIMEOUT, DEFAULT_URL, ProxyConfig, SerializableConfig,
        TrustConfig, compile_config, read_config,
    },
    error::Error,
    http_client::{BareHttpClient, BareRequest, BareResponse, HttpClientError, ReqwestHttpClient},
    outcome::{BODY_PREVIEW_LENGTH, FailureKind, Outcome, Report},
    probe::Probe,
    render::{RenderFormat, RenderOptions, render_report},
    timer::{ClockTimer, Timer},
};
