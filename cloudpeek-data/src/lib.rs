//! Cloudpeek Data Crate
//!
//! Loading and shaping utilities for point-cloud arrays stored as NumPy `.npy` files.
//! This crate is GPU-agnostic: it turns files into [`PointArray`]s and arrays into
//! [`PointCloud`]s, and formats shape diagnostics.

pub mod columns;
pub mod error;
pub mod npy;
pub mod report;
pub mod types;

pub use columns::{COLOR_SCALE, combine_xyz_rgba, split_columns, validate_lengths};
pub use error::DataError;
pub use npy::{Element, ElementKind, PointArray, load_array, read_array};
pub use report::{PREVIEW_ROWS, format_shape, write_inspection, write_preview};
pub use types::{DEFAULT_POINT_COLOR, PointCloud};
