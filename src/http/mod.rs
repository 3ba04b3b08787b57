//! HTTP client setup, request templates, and timed request execution.

mod client;
mod execute;
mod request;


pub use client::build_client;
pub use execute::execute_request;
pub use request::{RequestSpec, build_request};
