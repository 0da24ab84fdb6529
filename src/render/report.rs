use crate::outcome::{Outcome, Report};
use serde::Serialize;
use url::Url;

#[derive(Debug, Serialize)]
pub struct RenderedReport<'a> {
    url: &'a Url,
    duration: u128,
    outcome: &'a Outcome,
}

impl<'a> From<&'a Report> for RenderedReport<'a> {
    fn from(report: &'a Report) -> Self {
        Self {
            url: report.url(),
            duration: report.duration().as_millis(),
            outcome: report.outcome(),
        }
    }
}
