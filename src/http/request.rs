use reqwest::{Client, Request, Url};

use crate::{
    args::{HttpMethod, VolleyArgs},
    error::{AppError, AppResult, HttpError, ValidationError},
};

/// Everything needed to build one request, resolved from CLI and config.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub data: String,
    pub json: Option<String>,
}

impl RequestSpec {
    /// Resolve the request spec from merged arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if no target URL was provided.
    pub fn from_args(args: &VolleyArgs) -> AppResult<Self> {
        let url = args
            .url
            .clone()
            .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
        Ok(Self {
            method: args.method,
            url,
            headers: args.headers.clone(),
            data: args.data.clone(),
            json: args.json.clone(),
        })
    }
}

/// Build the request template that every volley clones.
///
/// # Errors
///
/// Returns an error if the URL does not parse or the request cannot be
/// assembled.
pub fn build_request(client: &Client, spec: &RequestSpec) -> AppResult<Request> {
    let url = Url::parse(&spec.url).map_err(|err| {
        AppError::http(HttpError::InvalidUrl {
            url: spec.url.clone(),
            source: err,
        })
    })?;

    let mut request_builder = match spec.method {
        HttpMethod::Get => client.get(url),
        HttpMethod::Post => client.post(url),
    };

    for (key, value) in &spec.headers {
        request_builder = request_builder.header(key, value);
    }

    if let Some(json) = spec.json.as_ref() {
        request_builder = request_builder
            .header("Content-Type", "application/json")
            .body(json.clone());
    } else if !spec.data.is_empty() {
        request_builder = request_builder.body(spec.data.clone());
    }

    request_builder
        .build()
        .map_err(|err| AppError::http(HttpError::BuildRequestFailed { source: err }))
}
