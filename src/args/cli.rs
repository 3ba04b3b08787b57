use clap::Parser;
use std::time::Duration;

use super::defaults::default_charts_path;
use super::parsers::{
    parse_bool_env, parse_delay_arg, parse_duration_arg, parse_header, parse_positive_u64,
    parse_positive_usize,
};
use super::types::{HttpMethod, OutputFormat, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Batch-paced HTTP load tester in Rust - fires fixed-size request volleys at a steady cadence and reports TTFB percentiles, achieved throughput, and chart exports."
)]
pub struct VolleyArgs {
    /// Target URL for the load test
    #[arg(long, short)]
    pub url: Option<String>,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long, short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body data (for POST/PUT/PATCH)
    #[arg(long, short, default_value = "")]
    pub data: String,

    /// JSON request body; also sets 'Content-Type: application/json'
    #[arg(long, short = 'j', conflicts_with = "data")]
    pub json: Option<String>,

    /// Number of requests fired concurrently in each batch
    #[arg(
        long = "batch-size",
        short = 'b',
        aliases = ["concurrency"],
        default_value = "10",
        value_parser = parse_positive_usize
    )]
    pub batch_size: PositiveUsize,

    /// Number of batches to run
    #[arg(
        long = "batches",
        short = 'n',
        alias = "batch-count",
        default_value = "5",
        value_parser = parse_positive_u64
    )]
    pub batch_count: PositiveU64,

    /// Pause between batches, measured from batch completion (supports ms/s/m/h, 0 to disable)
    #[arg(
        long = "delay",
        short = 'w',
        alias = "wait",
        default_value = "1s",
        value_parser = parse_delay_arg
    )]
    pub delay: Duration,

    /// Measure time to first byte only and skip reading response bodies
    #[arg(long = "ttfb-only")]
    pub ttfb_only: bool,

    /// Request timeout (supports ms/s/m/h); requests wait indefinitely unless set
    #[arg(long = "timeout", value_parser = parse_duration_arg)]
    pub request_timeout: Option<Duration>,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(long = "connect-timeout", value_parser = parse_duration_arg)]
    pub connect_timeout: Option<Duration>,

    /// Path to save charts to
    #[arg(long, short = 'c', default_value_t = default_charts_path())]
    pub charts_path: String,

    /// Disable chart generation
    #[arg(long = "no-charts")]
    pub no_charts: bool,

    /// Output format for the run report (text prints the summary table, json
    /// prints a machine-readable document with the full snapshot)
    #[arg(long = "output-format", short = 'o', default_value = "text", value_enum)]
    pub output_format: OutputFormat,

    /// Enable verbose logging (sets log level to debug unless overridden by VOLLEY_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Path to config file (TOML/JSON). Defaults to ./volley.toml or ./volley.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
