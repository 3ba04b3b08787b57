mod args;
mod charts;
mod config;
mod engine;
mod entry;
mod error;
mod http;
mod logger;
mod metrics;
mod report;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
