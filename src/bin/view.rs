use clap::Parser;
use cloudpeek::cli::ViewArgs;
use cloudpeek::{AppError, logging, pipeline};
use std::process::ExitCode;

fn run(args: ViewArgs) -> Result<(), AppError> {
    let cloud = {
        let mut stdout = std::io::stdout().lock();
        pipeline::prepare_xyz(&args.path, &mut stdout)?
    };
    pipeline::show(cloud, "cloudpeek", args.point_size)
}

fn main() -> ExitCode {
    let args = ViewArgs::parse();
    logging::init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
