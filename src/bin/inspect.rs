use clap::Parser;
use cloudpeek::cli::InspectArgs;
use cloudpeek::{logging, pipeline};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = InspectArgs::parse();
    logging::init();

    let mut stdout = std::io::stdout().lock();
    match pipeline::inspect(&args.path, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
