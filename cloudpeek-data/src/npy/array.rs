//! Row-major numeric table loaded from an `.npy` file

use crate::DataError;
use glam::Vec3;

/// Element family of the source array, kept so diagnostics print values the way
/// they were stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Float,
    Int,
    Uint,
    Bool,
}

/// One stored value, typed by its source element kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element {
    Float(f64),
    Int(i64),
    Uint(u64),
    Bool(bool),
}

/// Integer values as stored, for kinds whose range exceeds what `f64` holds exactly.
#[derive(Debug, Clone, PartialEq)]
enum Exact {
    Signed(Vec<i64>),
    Unsigned(Vec<u64>),
}

/// A two-dimensional numeric table, one row per point.
///
/// Values are widened to `f64` and kept in row-major order regardless of the
/// source dtype and memory order. Integer arrays also keep their stored values so
/// [`PointArray::element`] reports them exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct PointArray {
    rows: usize,
    cols: usize,
    kind: ElementKind,
    values: Vec<f64>,
    exact: Option<Exact>,
}

fn check_count(rows: usize, cols: usize, actual: usize) -> Result<(), DataError> {
    if rows.checked_mul(cols) != Some(actual) {
        return Err(DataError::ValueCount { rows, cols, actual });
    }
    Ok(())
}

/// Reorder column-major (Fortran order) values into row-major order.
///
/// Values whose count does not match the shape are returned untouched so the
/// constructor can reject them.
pub(crate) fn column_major_to_row_major<T: Copy>(rows: usize, cols: usize, values: Vec<T>) -> Vec<T> {
    if rows.checked_mul(cols) != Some(values.len()) {
        return values;
    }
    let mut row_major = Vec::with_capacity(values.len());
    for r in 0..rows {
        for c in 0..cols {
            row_major.push(values[c * rows + r]);
        }
    }
    row_major
}

impl PointArray {
    /// Create a float array from row-major values.
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self, DataError> {
        Self::with_kind(rows, cols, ElementKind::Float, values)
    }

    /// Create an array from row-major values tagged with their source element kind.
    pub fn with_kind(
        rows: usize,
        cols: usize,
        kind: ElementKind,
        values: Vec<f64>,
    ) -> Result<Self, DataError> {
        check_count(rows, cols, values.len())?;
        Ok(Self {
            rows,
            cols,
            kind,
            values,
            exact: None,
        })
    }

    /// Create a signed integer array from row-major values.
    pub fn from_signed(rows: usize, cols: usize, values: Vec<i64>) -> Result<Self, DataError> {
        check_count(rows, cols, values.len())?;
        Ok(Self {
            rows,
            cols,
            kind: ElementKind::Int,
            values: values.iter().map(|&v| v as f64).collect(),
            exact: Some(Exact::Signed(values)),
        })
    }

    /// Create an unsigned integer array from row-major values.
    pub fn from_unsigned(rows: usize, cols: usize, values: Vec<u64>) -> Result<Self, DataError> {
        check_count(rows, cols, values.len())?;
        Ok(Self {
            rows,
            cols,
            kind: ElementKind::Uint,
            values: values.iter().map(|&v| v as f64).collect(),
            exact: Some(Exact::Unsigned(values)),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Get one row, or None when out of range.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.cols;
        Some(&self.values[start..start + self.cols])
    }

    /// Iterate rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |i| {
            let start = i * self.cols;
            &self.values[start..start + self.cols]
        })
    }

    /// The value at `(row, col)` as it was stored.
    pub fn element(&self, row: usize, col: usize) -> Option<Element> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let index = row * self.cols + col;
        let value = self.values[index];
        let element = match (&self.exact, self.kind) {
            (Some(Exact::Signed(stored)), _) => Element::Int(stored[index]),
            (Some(Exact::Unsigned(stored)), _) => Element::Uint(stored[index]),
            (None, ElementKind::Float) => Element::Float(value),
            (None, ElementKind::Int) => Element::Int(value as i64),
            (None, ElementKind::Uint) => Element::Uint(value as u64),
            (None, ElementKind::Bool) => Element::Bool(value != 0.0),
        };
        Some(element)
    }

    /// Gather three consecutive columns starting at `start` as vectors, each divided by `scale`.
    ///
    /// Callers must ensure `start + 3 <= cols`.
    pub(crate) fn vec3_columns(&self, start: usize, scale: f64) -> Vec<Vec3> {
        debug_assert!(start + 3 <= self.cols);
        self.iter_rows()
            .map(|row| {
                Vec3::new(
                    (row[start] / scale) as f32,
                    (row[start + 1] / scale) as f32,
                    (row[start + 2] / scale) as f32,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_count_mismatch() {
        let err = PointArray::new(2, 3, vec![0.0; 5]).unwrap_err();
        assert!(matches!(
            err,
            DataError::ValueCount {
                rows: 2,
                cols: 3,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_rows_are_row_major() {
        let array = PointArray::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(array.shape(), (2, 3));
        assert_eq!(array.row(1), Some(&[4.0, 5.0, 6.0][..]));
        assert_eq!(array.row(2), None);
        assert_eq!(array.iter_rows().count(), 2);
    }

    #[test]
    fn test_column_major_transposes() {
        // Column-major storage of [[1, 2, 3], [4, 5, 6]].
        let values = column_major_to_row_major(2, 3, vec![1, 4, 2, 5, 3, 6]);
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_column_major_leaves_miscounted_values() {
        assert_eq!(column_major_to_row_major(2, 3, vec![1, 2]), vec![1, 2]);
    }

    #[test]
    fn test_large_integers_stay_exact() {
        let signed = PointArray::from_signed(1, 2, vec![9_007_199_254_740_993, i64::MIN]).unwrap();
        assert_eq!(signed.kind(), ElementKind::Int);
        assert_eq!(signed.element(0, 0), Some(Element::Int(9_007_199_254_740_993)));
        assert_eq!(signed.element(0, 1), Some(Element::Int(i64::MIN)));

        let unsigned = PointArray::from_unsigned(1, 1, vec![u64::MAX]).unwrap();
        assert_eq!(unsigned.element(0, 0), Some(Element::Uint(u64::MAX)));
        assert_eq!(unsigned.element(1, 0), None);
    }

    #[test]
    fn test_integer_count_mismatch() {
        assert!(matches!(
            PointArray::from_unsigned(2, 2, vec![1, 2, 3]),
            Err(DataError::ValueCount { actual: 3, .. })
        ));
    }

    #[test]
    fn test_zero_width_rows() {
        let array = PointArray::new(4, 0, Vec::new()).unwrap();
        assert_eq!(array.iter_rows().filter(|row| row.is_empty()).count(), 4);
    }

    #[test]
    fn test_vec3_columns_scale() {
        let array = PointArray::new(1, 6, vec![1.0, 2.0, 3.0, 255.0, 0.0, 51.0]).unwrap();
        assert_eq!(array.vec3_columns(0, 1.0), vec![Vec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(array.vec3_columns(3, 255.0), vec![Vec3::new(1.0, 0.0, 0.2)]);
    }
}
