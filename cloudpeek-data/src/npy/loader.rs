//! `.npy` file loading functions

use super::array::column_major_to_row_major;
use crate::{DataError, ElementKind, PointArray};
use npyz::{DType, NpyFile, Order};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// Read every element as `$from` and widen to `$to`.
macro_rules! widen {
    ($npy:expr, $from:ty => $to:ty) => {
        $npy.into_vec::<$from>()?
            .into_iter()
            .map(<$to>::from)
            .collect::<Vec<$to>>()
    };
}

/// Load a two-dimensional array from an `.npy` file.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_array(path: &Path) -> Result<PointArray, DataError> {
    debug!("Loading npy array from: {}", path.display());
    let file = File::open(path).map_err(|source| DataError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let array = read_array(BufReader::new(file)).inspect_err(|e| {
        warn!("Failed to parse npy file: {}", e);
    })?;

    info!(
        "npy array parsed: {} rows, {} columns ({:?})",
        array.rows(),
        array.cols(),
        array.kind()
    );
    Ok(array)
}

/// Parse a two-dimensional array from any reader holding `.npy` bytes.
pub fn read_array<R: Read>(reader: R) -> Result<PointArray, DataError> {
    let npy = NpyFile::new(reader)?;

    let shape = npy.shape().to_vec();
    let (rows, cols) = match shape.as_slice() {
        [rows, cols] => (*rows as usize, *cols as usize),
        _ => return Err(DataError::Shape(shape)),
    };
    let order = npy.order();

    let descr = match npy.dtype() {
        DType::Plain(type_str) => type_str.to_string(),
        other => return Err(DataError::UnsupportedDtype(format!("{other:?}"))),
    };
    debug!("npy header: descr={}, shape=({}, {}), order={:?}", descr, rows, cols, order);

    // descr is "<f4", ">i8", "|u1" and so on; the first byte is the byte order.
    match descr.get(1..).unwrap_or_default() {
        "f4" => PointArray::new(rows, cols, reorder(widen!(npy, f32 => f64), rows, cols, order)),
        "f8" => PointArray::new(rows, cols, reorder(npy.into_vec::<f64>()?, rows, cols, order)),
        "b1" => {
            let values: Vec<f64> = npy
                .into_vec::<bool>()?
                .into_iter()
                .map(|b| if b { 1.0 } else { 0.0 })
                .collect();
            PointArray::with_kind(rows, cols, ElementKind::Bool, reorder(values, rows, cols, order))
        }
        signed @ ("i1" | "i2" | "i4" | "i8") => {
            let values = match signed {
                "i1" => widen!(npy, i8 => i64),
                "i2" => widen!(npy, i16 => i64),
                "i4" => widen!(npy, i32 => i64),
                _ => npy.into_vec::<i64>()?,
            };
            PointArray::from_signed(rows, cols, reorder(values, rows, cols, order))
        }
        unsigned @ ("u1" | "u2" | "u4" | "u8") => {
            let values = match unsigned {
                "u1" => widen!(npy, u8 => u64),
                "u2" => widen!(npy, u16 => u64),
                "u4" => widen!(npy, u32 => u64),
                _ => npy.into_vec::<u64>()?,
            };
            PointArray::from_unsigned(rows, cols, reorder(values, rows, cols, order))
        }
        _ => Err(DataError::UnsupportedDtype(descr)),
    }
}

fn reorder<T: Copy>(values: Vec<T>, rows: usize, cols: usize, order: Order) -> Vec<T> {
    match order {
        Order::C => values,
        Order::Fortran => column_major_to_row_major(rows, cols, values),
    }
}
