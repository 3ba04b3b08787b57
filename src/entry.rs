use std::ffi::OsString;
use std::path::Path;

use chrono::Utc;
use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::VolleyArgs;
use crate::charts::render_charts;
use crate::config::{DEFAULT_CONFIG_FILES, apply_config, load_config};
use crate::engine::{BatchConfig, Engine};
use crate::error::AppResult;
use crate::http::{RequestSpec, build_client, build_request};
use crate::metrics::summarize;
use crate::report::print_report;

pub(crate) fn run() -> AppResult<()> {
    let (args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args, &matches))
}

fn parse_args() -> AppResult<Option<(VolleyArgs, ArgMatches)>> {
    let mut cmd = VolleyArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = VolleyArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

async fn run_async(mut args: VolleyArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }

    let spec = RequestSpec::from_args(&args)?;
    let client = build_client(&args)?;
    let template = build_request(&client, &spec)?;
    let config = BatchConfig::from_args(&args);

    let started_at = Utc::now();
    let engine = Engine::new(client, template, config);
    let snapshot = engine.run().await?;

    let summary = summarize(&snapshot)?;
    print_report(args.output_format, started_at, &summary, &snapshot)?;

    render_charts(&snapshot, &args).await?;

    Ok(())
}
