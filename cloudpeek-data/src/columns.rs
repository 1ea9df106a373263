//! Column splitting and paired-array validation.
//!
//! Turns loaded [`PointArray`]s into [`PointCloud`]s: positions come from the
//! first three columns, colors are stored 0..255 and divided by [`COLOR_SCALE`].

use crate::{DataError, PointArray, PointCloud};
use tracing::debug;

/// Divisor mapping stored 0..255 color channels onto the 0..1 range the renderer expects.
pub const COLOR_SCALE: f64 = 255.0;

/// Interpret a single array as XYZ (3 columns) or XYZRGB (6 columns).
pub fn split_columns(array: &PointArray) -> Result<PointCloud, DataError> {
    match array.cols() {
        3 => {
            debug!("Treating {} rows as XYZ", array.rows());
            Ok(PointCloud::from_positions(array.vec3_columns(0, 1.0)))
        }
        6 => {
            debug!("Treating {} rows as XYZRGB", array.rows());
            PointCloud::with_colors(
                array.vec3_columns(0, 1.0),
                array.vec3_columns(3, COLOR_SCALE),
            )
        }
        columns => Err(DataError::UnsupportedWidth { columns }),
    }
}

/// Check that a position array and a color array describe the same number of points.
pub fn validate_lengths(xyz: &PointArray, rgba: &PointArray) -> Result<(), DataError> {
    if xyz.rows() != rgba.rows() {
        return Err(DataError::LengthMismatch {
            xyz: xyz.rows(),
            rgba: rgba.rows(),
        });
    }
    Ok(())
}

/// Combine separately stored positions and RGBA colors, dropping alpha.
pub fn combine_xyz_rgba(xyz: &PointArray, rgba: &PointArray) -> Result<PointCloud, DataError> {
    validate_lengths(xyz, rgba)?;

    if xyz.cols() != 3 {
        return Err(DataError::PositionWidth { columns: xyz.cols() });
    }
    if !matches!(rgba.cols(), 3 | 4) {
        return Err(DataError::UnsupportedColorWidth {
            columns: rgba.cols(),
        });
    }

    PointCloud::with_colors(xyz.vec3_columns(0, 1.0), rgba.vec3_columns(0, COLOR_SCALE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn array(rows: usize, cols: usize, values: Vec<f64>) -> PointArray {
        PointArray::new(rows, cols, values).unwrap()
    }

    #[test]
    fn test_xyz_has_no_colors() {
        let cloud = split_columns(&array(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])).unwrap();
        assert!(cloud.colors().is_none());
        assert_eq!(
            cloud.positions(),
            &[Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)]
        );
    }

    #[test]
    fn test_xyzrgb_colors_divided_by_255() {
        let channels = [0.0, 17.0, 128.0, 200.0, 254.0, 255.0];
        let mut values = Vec::new();
        for pair in channels.chunks(3) {
            values.extend_from_slice(&[0.5, -0.5, 2.0]);
            values.extend_from_slice(pair);
        }
        let cloud = split_columns(&array(2, 6, values)).unwrap();
        let colors = cloud.colors().unwrap();

        let flat: Vec<f32> = colors.iter().flat_map(|c| c.to_array()).collect();
        for (got, raw) in flat.iter().zip(channels) {
            assert_eq!(*got, (raw / 255.0) as f32);
            assert!((0.0..=1.0).contains(got));
        }
        assert_eq!(cloud.positions()[1], Vec3::new(0.5, -0.5, 2.0));
    }

    #[test]
    fn test_unsupported_width_is_reported() {
        for cols in [0, 1, 2, 4, 5, 7] {
            let err = split_columns(&array(1, cols, vec![0.0; cols])).unwrap_err();
            assert!(matches!(err, DataError::UnsupportedWidth { columns } if columns == cols));
        }
    }

    #[test]
    fn test_validate_equal_lengths() {
        assert!(validate_lengths(&array(2, 3, vec![0.0; 6]), &array(2, 4, vec![0.0; 8])).is_ok());
    }

    #[test]
    fn test_validate_unequal_lengths() {
        let err =
            validate_lengths(&array(3, 3, vec![0.0; 9]), &array(2, 4, vec![0.0; 8])).unwrap_err();
        assert!(matches!(err, DataError::LengthMismatch { xyz: 3, rgba: 2 }));
        assert!(err.to_string().contains("different lengths"));
    }

    #[test]
    fn test_mismatch_checked_before_color_width() {
        // A bad color width must not mask the length mismatch.
        let err =
            combine_xyz_rgba(&array(1, 3, vec![0.0; 3]), &array(2, 7, vec![0.0; 14])).unwrap_err();
        assert!(matches!(err, DataError::LengthMismatch { .. }));
    }

    #[test]
    fn test_combine_drops_alpha() {
        let xyz = array(1, 3, vec![1.0, 2.0, 3.0]);
        let rgba = array(1, 4, vec![255.0, 0.0, 51.0, 7.0]);
        let cloud = combine_xyz_rgba(&xyz, &rgba).unwrap();
        assert_eq!(cloud.colors().unwrap(), &[Vec3::new(1.0, 0.0, 0.2)]);
        assert_eq!(cloud.positions(), &[Vec3::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn test_combine_rejects_bad_widths() {
        let err = combine_xyz_rgba(&array(1, 6, vec![0.0; 6]), &array(1, 4, vec![0.0; 4]))
            .unwrap_err();
        assert!(matches!(err, DataError::PositionWidth { columns: 6 }));

        let err = combine_xyz_rgba(&array(1, 3, vec![0.0; 3]), &array(1, 2, vec![0.0; 2]))
            .unwrap_err();
        assert!(matches!(err, DataError::UnsupportedColorWidth { columns: 2 }));
    }
}
