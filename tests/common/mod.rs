//! `.npy` fixtures written into temporary directories.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

fn header(descr: &str, rows: usize, cols: usize) -> Vec<u8> {
    let mut dict =
        format!("{{'descr': '{descr}', 'fortran_order': False, 'shape': ({rows}, {cols}), }}");
    while (10 + dict.len() + 1) % 64 != 0 {
        dict.push(' ');
    }
    dict.push('\n');

    let mut bytes = b"\x93NUMPY\x01\x00".to_vec();
    bytes.extend_from_slice(&(dict.len() as u16).to_le_bytes());
    bytes.extend_from_slice(dict.as_bytes());
    bytes
}

/// Write a row-major `rows × cols` little-endian f64 array to `dir/name`.
pub fn write_f64(dir: &Path, name: &str, rows: usize, cols: usize, values: &[f64]) -> PathBuf {
    assert_eq!(values.len(), rows * cols);
    let mut bytes = header("<f8", rows, cols);
    bytes.extend(values.iter().flat_map(|v| v.to_le_bytes()));
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

/// Write a row-major `rows × cols` u8 array to `dir/name`.
pub fn write_u8(dir: &Path, name: &str, rows: usize, cols: usize, values: &[u8]) -> PathBuf {
    assert_eq!(values.len(), rows * cols);
    let mut bytes = header("|u1", rows, cols);
    bytes.extend_from_slice(values);
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}
