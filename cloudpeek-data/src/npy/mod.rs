//! NumPy `.npy` array loading

mod array;
mod loader;

pub use array::{Element, ElementKind, PointArray};
pub use loader::{load_array, read_array};
