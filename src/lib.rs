//! Cloudpeek
//!
//! Three small tools over `.npy` point clouds:
//! - `cloudpeek-inspect` prints an array's shape and first rows
//! - `cloudpeek-view` opens an XYZ or XYZRGB array in the viewer
//! - `cloudpeek-view-rgba` pairs an XYZ array with an RGBA array and opens the viewer

pub mod cli;
mod error;
pub mod logging;
pub mod pipeline;

pub use error::AppError;
