mod args;
mod commands;
mod fixture;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

use crate::args::Args;
use crate::commands::Command;

#[derive(Parser)]
#[command(name = "recall")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    args: Args,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = match (cli.args.global.quiet, cli.args.global.verbose) {
        (true, _) => EnvFilter::new("error"),
        (false, 0) => EnvFilter::new("info"),
        (false, 1) => EnvFilter::new("debug"),
        (false, _) => EnvFilter::new("trace"),
    };

    let log_dir = recall_conf::log_dir().unwrap_or_else(|_| "/tmp".into());
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.as_str(), "recall.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(non_blocking)
        .init();

    match cli.command.run().await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e}");
            for cause in e.chain().skip(1) {
                eprintln!("Caused by: {cause}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
