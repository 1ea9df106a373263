//! Shape diagnostics printed before inspecting or viewing an array.

use crate::{Element, PointArray};
use std::io::{self, Write};

/// Number of leading rows shown by the inspector.
pub const PREVIEW_ROWS: usize = 5;

/// Format the array shape as `(rows, cols)`.
pub fn format_shape(array: &PointArray) -> String {
    let (rows, cols) = array.shape();
    format!("({rows}, {cols})")
}

fn format_element(element: Element) -> String {
    match element {
        Element::Float(value) => format!("{value:.6}"),
        Element::Int(value) => value.to_string(),
        Element::Uint(value) => value.to_string(),
        Element::Bool(true) => "True".to_string(),
        Element::Bool(false) => "False".to_string(),
    }
}

/// Write the first `limit` rows as a nested, bracketed table.
///
/// Prints all rows when the array has fewer than `limit`.
pub fn write_preview<W: Write>(out: &mut W, array: &PointArray, limit: usize) -> io::Result<()> {
    let shown = array.rows().min(limit);
    if shown == 0 {
        return writeln!(out, "[]");
    }

    for i in 0..shown {
        let open = if i == 0 { "[[" } else { " [" };
        let close = if i + 1 == shown { "]]" } else { "]" };
        let cells: Vec<String> = (0..array.cols())
            .filter_map(|col| array.element(i, col))
            .map(format_element)
            .collect();
        writeln!(out, "{open}{}{close}", cells.join(" "))?;
    }
    Ok(())
}

/// Write the inspector report: shape, fields per point, and the first rows.
pub fn write_inspection<W: Write>(out: &mut W, array: &PointArray) -> io::Result<()> {
    writeln!(out, "Shape of the point cloud: {}", format_shape(array))?;
    writeln!(out, "Number of fields per point: {}", array.cols())?;
    writeln!(out, "First {PREVIEW_ROWS} points:")?;
    write_preview(out, array, PREVIEW_ROWS)
}
