use clap::Parser;
use cloudpeek::cli::ViewRgbaArgs;
use cloudpeek::{AppError, logging, pipeline};
use std::process::ExitCode;

fn run(args: ViewRgbaArgs) -> Result<(), AppError> {
    let cloud = {
        let mut stdout = std::io::stdout().lock();
        pipeline::prepare_xyzrgba(&args.xyz, &args.rgba, &mut stdout)?
    };
    pipeline::show(cloud, "cloudpeek (XYZ + RGBA)", args.point_size)
}

fn main() -> ExitCode {
    let args = ViewRgbaArgs::parse();
    logging::init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
