//! Render delegate implementations.
//!
//! - [`PointDelegate`] - Point cloud rendering

mod point;

pub use point::{DEFAULT_POINT_SIZE_FRACTION, PointDelegate, PointInitData, point_vertex_count};
