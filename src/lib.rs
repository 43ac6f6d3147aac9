pub mod cli;
pub mod io_utils;
pub mod reorder;

use std::{
    env,
    ffi::OsString,
    io::{self, Write},
    sync::OnceLock,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug};

use crate::cli::Cli;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            // stderr carries the skip diagnostics; keep it quiet by default
            builder.filter_module("book_reorder", LevelFilter::Warn);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    run_from(env::args_os())
}

/// Runs the tool with an explicit argument vector. The first element is the
/// program name echoed by the usage message.
pub fn run_from<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    init_logging();
    let args = args.into_iter().map(Into::<OsString>::into).collect::<Vec<OsString>>();
    let cli = Cli::parse_from(&args);
    match cli.input {
        Some(path) => {
            reorder::process(&path)?;
            Ok(())
        }
        None => {
            let program = args
                .first()
                .map(|arg| arg.to_string_lossy().into_owned())
                .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
            debug!("No input path given to {program}");
            write_usage(&mut io::stderr().lock(), &program).context("Writing usage message")
        }
    }
}

pub fn write_usage<W>(out: &mut W, program: &str) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "Error, no filename provided")?;
    writeln!(out, "Usage: {program} filename")
}
