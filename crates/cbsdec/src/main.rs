use std::io;

use anyhow::Context;
use clap::Parser;
use log::{info, LevelFilter};

use cbspws::HeaderParserBuilder;

mod app;
mod cli;

use cli::{Args, CliError};

fn main() {
    match cbsdec() {
        Ok(()) => {}
        Err(cli_error) => cli_error.exit(),
    }
}

fn cbsdec() -> Result<(), CliError> {
    // Parse options and start logging
    let args = Args::try_parse()?;
    log_setup(&args);

    // create the parser
    let parser = HeaderParserBuilder::new()
        .with_gsm_max_length(args.gsm_max_len)
        .with_etws_primary_max_length(args.etws_max_len)
        .build();

    let cfg = app::Config::from(&args);

    let summary = if !args.pdu.is_empty() {
        // PDUs from the command line
        app::run(&cfg, &parser, args.pdu.iter().cloned())
    } else {
        // file setup: locks stdin in case we need it
        let stdin = io::stdin();
        let stdin_handle = stdin.lock();
        let inbuf = file_setup(&args, stdin_handle)?;

        app::run(&cfg, &parser, app::input_lines(inbuf))
    };

    info!("{}", summary);
    Ok(())
}

fn log_setup(args: &Args) {
    if args.quiet {
        // no logging
        return;
    } else if std::env::var_os("RUST_LOG").is_none() {
        // parameter controls
        let log_filter = match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        pretty_env_logger::formatted_builder()
            .filter_module("cbspws", log_filter)
            .filter_module("cbsdec", log_filter)
            .init();
    } else {
        // environment controls
        pretty_env_logger::init();
    }
}

fn file_setup<'stdin>(
    args: &Args,
    stdin: std::io::StdinLock<'stdin>,
) -> Result<Box<dyn io::BufRead + 'stdin>, anyhow::Error> {
    if args.input_is_stdin() {
        info!("CBS decoder reading standard input");
        if is_terminal(&std::io::stdin()) && !args.quiet {
            eprintln!("Enter one hex-encoded PDU per line. Press Ctrl+D to finish.");
        }
        Ok(Box::new(io::BufReader::new(stdin)))
    } else {
        info!("CBS decoder reading file: \"{}\"", &args.file);
        Ok(Box::new(io::BufReader::new(
            std::fs::File::open(&args.file)
                .with_context(|| format!("Unable to open --file \"{}\"", args.file))?,
        )))
    }
}

#[cfg(not(target_os = "windows"))]
fn is_terminal<S>(stream: &S) -> bool
where
    S: std::os::fd::AsRawFd,
{
    terminal_size::terminal_size_using_fd(stream.as_raw_fd()).is_some()
}

#[cfg(target_os = "windows")]
fn is_terminal<S>(stream: &S) -> bool
where
    S: std::os::windows::io::AsRawHandle,
{
    terminal_size::terminal_size_using_handle(stream.as_raw_handle()).is_some()
}
