//! SheetLink setup CLI.

use clap::{ColorChoice, Parser};
use sheetlink_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_columns, run_configure, run_detect, run_link, run_profile, run_status, run_upload,
};
use crate::summary::{print_detect, print_status};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let api_url = cli.api_url.clone();
    let api_url = api_url.as_deref();
    let exit_code = match cli.command {
        Command::Status => match run_status(api_url) {
            Ok(report) => {
                print_status(&report);
                0
            }
            Err(error) => fail(&error),
        },
        Command::Columns => {
            run_columns();
            0
        }
        Command::Detect(args) => {
            match run_detect(&args, api_url).and_then(|outcome| print_detect(&outcome, args.json)) {
                Ok(()) => 0,
                Err(error) => fail(&error),
            }
        }
        Command::Configure(args) => match run_configure(&args, api_url) {
            Ok(()) => 0,
            Err(error) => fail(&error),
        },
        Command::Profile(args) => match run_profile(&args, api_url) {
            Ok(()) => 0,
            Err(error) => fail(&error),
        },
        Command::Link(args) => match run_link(&args, api_url) {
            Ok(()) => 0,
            Err(error) => fail(&error),
        },
        Command::Upload(args) => match run_upload(&args, api_url) {
            Ok(()) => 0,
            Err(error) => fail(&error),
        },
    };
    std::process::exit(exit_code);
}

fn fail(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
