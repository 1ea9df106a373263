//! Error type for the command-line tools.

use cloudpeek_data::DataError;
use cloudpeek_window::ViewerError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Viewer(#[from] ViewerError),

    #[error("failed to write to stdout: {0}")]
    Output(#[from] io::Error),
}
