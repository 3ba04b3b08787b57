use std::time::Duration;

use reqwest::Client;

use crate::{
    args::{DEFAULT_USER_AGENT, VolleyArgs},
    error::{AppError, AppResult, HttpError},
};

/// Build the shared HTTP client.
///
/// Connection pooling is disabled so every request opens a fresh
/// connection and the measured TTFB includes DNS, TCP, and TLS setup.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed.
pub fn build_client(args: &VolleyArgs) -> AppResult<Client> {
    let mut client_builder = Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .pool_max_idle_per_host(0)
        .pool_idle_timeout(Some(Duration::from_secs(0)));

    if let Some(timeout) = args.request_timeout {
        client_builder = client_builder.timeout(timeout);
    }
    if let Some(timeout) = args.connect_timeout {
        client_builder = client_builder.connect_timeout(timeout);
    }

    client_builder
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}
