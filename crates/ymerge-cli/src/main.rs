use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

mod cli;
mod commands;
mod config;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let config = match config::CliConfig::resolve(&cli) {
        Ok(config) => config,
        Err(err) => return report(&err),
    };

    log_subscriber(
        config.log_level.as_level(),
        std::io::stderr,
        std::io::stderr().is_terminal(),
    )
    .init();

    match commands::run(&cli.files, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

/// The stderr log: no timestamps or targets, colour only when `ansi` is set.
fn log_subscriber<W>(level: Level, writer: W, ansi: bool) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(level)
        .with_ansi(ansi)
        .with_target(false)
        .without_time()
        .finish()
}

fn report(err: &anyhow::Error) -> ExitCode {
    eprintln!("{} {err:#}", "error:".red().bold());
    ExitCode::FAILURE
}
