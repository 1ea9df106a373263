//! Error type shared by loading and shaping operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid npy data: {0}")]
    Npy(#[from] io::Error),

    #[error("unsupported dtype {0}; expected a plain numeric or bool dtype")]
    UnsupportedDtype(String),

    #[error("expected a 2-D array, found shape {0:?}")]
    Shape(Vec<u64>),

    #[error("array holds {actual} values, shape ({rows}, {cols}) needs {}", .rows * .cols)]
    ValueCount {
        rows: usize,
        cols: usize,
        actual: usize,
    },

    #[error("unsupported column count {columns}; expected 3 (XYZ) or 6 (XYZRGB)")]
    UnsupportedWidth { columns: usize },

    #[error("position array must have 3 columns, found {columns}")]
    PositionWidth { columns: usize },

    #[error("unsupported color column count {columns}; expected 3 (RGB) or 4 (RGBA)")]
    UnsupportedColorWidth { columns: usize },

    #[error("XYZ and RGBA arrays have different lengths ({xyz} vs {rgba})")]
    LengthMismatch { xyz: usize, rgba: usize },
}
