use udrcmd::cli::terminal;
use udrcmd::core;
use udrcmd::status::ExitStatus;

/// Entry point - installs the Ctrl+C handler and calls core::run()
///
/// Returns ExitStatus directly, which implements std::process::Termination.
fn main() -> ExitStatus {
    // Blocking console reads do not return on SIGINT, so leave from here.
    // Nothing has been sent that would need undoing; only terminal echo
    // from an interrupted password prompt has to come back.
    ctrlc::set_handler(|| {
        terminal::restore();
        eprintln!("\nExiting...");
        std::process::exit(ExitStatus::Success as i32);
    })
    .ok();

    let args: Vec<String> = std::env::args().collect();
    core::run(args)
}
