//! The load → report → build sequences behind each binary.
//!
//! Every function loads all of its input before writing anything, so a failed
//! load leaves `out` untouched.

use crate::AppError;
use cloudpeek_data::{
    PointCloud, combine_xyz_rgba, format_shape, load_array, split_columns, write_inspection,
};
use cloudpeek_window::{PointDelegate, PointInitData, ViewerError, run_with_delegate};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Load `path` and write the inspector report.
pub fn inspect<W: Write>(path: &Path, out: &mut W) -> Result<(), AppError> {
    let array = load_array(path)?;
    write_inspection(out, &array)?;
    Ok(())
}

/// Load a single N×3 or N×6 array, print its shape and build the cloud.
pub fn prepare_xyz<W: Write>(path: &Path, out: &mut W) -> Result<PointCloud, AppError> {
    let array = load_array(path)?;
    writeln!(out, "Point cloud shape: {}", format_shape(&array))?;
    Ok(split_columns(&array)?)
}

/// Load a position array and a color array, print both shapes and combine them.
///
/// Row counts are checked before any color is normalized.
pub fn prepare_xyzrgba<W: Write>(
    xyz_path: &Path,
    rgba_path: &Path,
    out: &mut W,
) -> Result<PointCloud, AppError> {
    let xyz = load_array(xyz_path)?;
    let rgba = load_array(rgba_path)?;
    writeln!(out, "XYZ shape: {}", format_shape(&xyz))?;
    writeln!(out, "RGBA shape: {}", format_shape(&rgba))?;
    Ok(combine_xyz_rgba(&xyz, &rgba)?)
}

/// Open the viewer on `cloud`. Returns once the window is closed.
///
/// An empty cloud is refused before any window or GPU device is created.
pub fn show(cloud: PointCloud, title: &str, point_size: Option<f32>) -> Result<(), AppError> {
    let init = PointInitData::new(cloud)
        .map_err(ViewerError::from)?
        .with_point_size(point_size);
    info!(
        "Opening viewer with {} points ({})",
        init.cloud().len(),
        if init.cloud().has_colors() { "colored" } else { "uncolored" }
    );
    run_with_delegate::<PointDelegate>(title, init)?;
    Ok(())
}
