mod common;

use cloudpeek::{AppError, pipeline};
use cloudpeek_data::DataError;

fn run_inspect(path: &std::path::Path) -> (Result<(), AppError>, String) {
    let mut out = Vec::new();
    let result = pipeline::inspect(path, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_inspect_report() {
    let dir = tempfile::tempdir().unwrap();
    let values: Vec<f64> = (0..7 * 3).map(|i| i as f64 * 0.5).collect();
    let path = common::write_f64(dir.path(), "cloud.npy", 7, 3, &values);

    let (result, output) = run_inspect(&path);
    result.unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "Shape of the point cloud: (7, 3)");
    assert_eq!(lines[1], "Number of fields per point: 3");
    assert_eq!(lines[2], "First 5 points:");
    assert_eq!(lines[3], "[[0.000000 0.500000 1.000000]");
    assert_eq!(lines[7], " [6.000000 6.500000 7.000000]]");
    assert_eq!(lines.len(), 8);
}

#[test]
fn test_inspect_short_array_shows_every_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_u8(dir.path(), "small.npy", 2, 6, &[1, 2, 3, 255, 0, 7, 4, 5, 6, 9, 8, 7]);

    let (result, output) = run_inspect(&path);
    result.unwrap();

    assert!(output.contains("Shape of the point cloud: (2, 6)\n"));
    assert!(output.contains("Number of fields per point: 6\n"));
    assert!(output.ends_with("[[1 2 3 255 0 7]\n [4 5 6 9 8 7]]\n"));
}

#[test]
fn test_inspect_missing_file_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (result, output) = run_inspect(&dir.path().join("missing.npy"));

    assert!(matches!(result, Err(AppError::Data(DataError::Open { .. }))));
    assert!(output.is_empty());
}

#[test]
fn test_inspect_malformed_file_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.npy");
    std::fs::write(&path, b"not a numpy file").unwrap();

    let (result, output) = run_inspect(&path);
    assert!(matches!(result, Err(AppError::Data(_))));
    assert!(output.is_empty());
}
