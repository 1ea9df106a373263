//! In-memory point cloud handed to the viewer.

use crate::DataError;
use glam::Vec3;

/// Color used for points when the source carries no color channels.
pub const DEFAULT_POINT_COLOR: Vec3 = Vec3::splat(0.8);

/// Positions plus an optional per-point color table (linear, 0-1 range).
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    positions: Vec<Vec3>,
    colors: Option<Vec<Vec3>>,
}

impl PointCloud {
    /// Create an uncolored point cloud.
    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            colors: None,
        }
    }

    /// Create a colored point cloud. Both tables must have one entry per point.
    pub fn with_colors(positions: Vec<Vec3>, colors: Vec<Vec3>) -> Result<Self, DataError> {
        if positions.len() != colors.len() {
            return Err(DataError::LengthMismatch {
                xyz: positions.len(),
                rgba: colors.len(),
            });
        }
        Ok(Self {
            positions,
            colors: Some(colors),
        })
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> Option<&[Vec3]> {
        self.colors.as_deref()
    }

    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate `(position, color)` pairs, substituting [`DEFAULT_POINT_COLOR`] when uncolored.
    pub fn iter(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.positions.iter().enumerate().map(move |(i, &position)| {
            let color = self
                .colors
                .as_ref()
                .map_or(DEFAULT_POINT_COLOR, |colors| colors[i]);
            (position, color)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncolored_iter_uses_default() {
        let cloud = PointCloud::from_positions(vec![Vec3::X, Vec3::Y]);
        assert!(!cloud.has_colors());
        let colors: Vec<Vec3> = cloud.iter().map(|(_, c)| c).collect();
        assert_eq!(colors, vec![DEFAULT_POINT_COLOR; 2]);
    }

    #[test]
    fn test_with_colors_length_check() {
        let err = PointCloud::with_colors(vec![Vec3::ZERO; 3], vec![Vec3::ONE; 2]).unwrap_err();
        assert!(matches!(err, DataError::LengthMismatch { xyz: 3, rgba: 2 }));
    }

    #[test]
    fn test_colored_iter_pairs() {
        let cloud = PointCloud::with_colors(vec![Vec3::X], vec![Vec3::new(1.0, 0.0, 0.0)]).unwrap();
        assert_eq!(cloud.len(), 1);
        assert_eq!(cloud.iter().next(), Some((Vec3::X, Vec3::new(1.0, 0.0, 0.0))));
    }
}
