use std::time::Duration;

use serde::Deserialize;

use crate::args::parsers::parse_duration_text;
use crate::args::{HttpMethod, OutputFormat};
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub method: Option<HttpMethod>,
    pub headers: Option<Vec<String>>,
    pub data: Option<String>,
    pub json: Option<String>,
    #[serde(alias = "concurrency")]
    pub batch_size: Option<usize>,
    #[serde(alias = "batch_count")]
    pub batches: Option<u64>,
    #[serde(alias = "wait")]
    pub delay: Option<DurationValue>,
    pub ttfb_only: Option<bool>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub charts_path: Option<String>,
    pub no_charts: Option<bool>,
    pub output_format: Option<OutputFormat>,
    pub no_color: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => {
                let duration = parse_duration_text(text)?;
                if duration.as_millis() == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(duration)
                }
            }
        }
    }

    /// Like [`Self::to_duration`] but accepts zero, for the inter-batch pause.
    pub(crate) fn to_delay(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_text(text),
        }
    }
}
