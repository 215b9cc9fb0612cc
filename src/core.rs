use std::io::{self, BufRead, Write};

use crate::cli::{help_text, Args, Collector, Prompt, TerminalPrompt};
use crate::client::ApiClient;
use crate::config::Config;
use crate::errors::{Result, UdrError};
use crate::logging;
use crate::output::{write_args, write_raw, write_record};
use crate::request;
use crate::response;
use crate::status::ExitStatus;

/// Notice shown before reading parameters from stdin
const INTERACTIVE_NOTICE: &str =
    "Too few arguments. Let's try interactive mode. End with \"EOF\" (without quotes)";

/// Main entry point for the CLI.
///
/// Parses arguments, runs the pipeline once and turns the outcome into an
/// exit status. All errors end up in [`handle_error`].
pub fn run(argv: Vec<String>) -> ExitStatus {
    let args = match Args::parse_with_extensions(argv) {
        Ok(args) => args,
        Err(e) => return handle_error(UdrError::OptionSyntax(e), false),
    };

    logging::init(args.verbose, args.log_format);

    // Unlocked reader: the credentials prompt reads stdin on its own
    let stdin = io::BufReader::new(io::stdin());
    let stdout = io::stdout();
    let result = program(&args, stdin, &mut stdout.lock(), &mut TerminalPrompt);

    match result {
        Ok(status) => status,
        Err(e) => handle_error(e, args.verbose > 0),
    }
}

/// One API call: collect, validate, send, report.
///
/// Input and output streams are parameters so the whole pipeline can run
/// against buffers.
pub fn program<R: BufRead, W: Write>(
    args: &Args,
    stdin: R,
    out: &mut W,
    prompt: &mut dyn Prompt,
) -> Result<ExitStatus> {
    let config = Config::load(&args.config)?;
    let endpoint = config.endpoint(args.url.as_deref());

    let mut collector = Collector::from_config(&config);
    if args.has_parameters() {
        collector.read_command_line(args, prompt)?;
    } else {
        eprintln!("{}", INTERACTIVE_NOTICE);
        collector.read_interactive(stdin)?;
    }
    let query = collector.finish();

    if args.print_args {
        write_args(out, &query)?;
    }

    request::validate(&query)?;

    let client = ApiClient::new(&endpoint)?;
    client.verify_trust()?;
    let body = client.call(&query)?;

    if args.raw_response {
        write_raw(out, &body)?;
        return Ok(ExitStatus::Success);
    }

    let record = response::parse(&body)?;
    write_record(out, &record)?;

    let status = ExitStatus::from_record(&record);
    tracing::info!(code = record.code().unwrap_or("-"), exit = status as u8, "API call finished");
    Ok(status)
}

/// Report an error and pick the exit status
fn handle_error(error: UdrError, verbose: bool) -> ExitStatus {
    match error {
        UdrError::OptionSyntax(e) => {
            use clap::error::ErrorKind;
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                e.print().ok();
            } else {
                eprintln!("udrcmd: {}", e.kind());
                println!("{}", help_text());
            }
            ExitStatus::Success
        }
        UdrError::UserInterrupt => {
            eprintln!("{}", UdrError::UserInterrupt);
            ExitStatus::Success
        }
        other => {
            if verbose {
                eprintln!("Error: {:?}", other);
            }
            eprintln!("{}", other);
            ExitStatus::Error
        }
    }
}
