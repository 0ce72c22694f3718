//! Console rendering of a grid
//!
//! `render_table` lays cells out in aligned columns for reading;
//! `render_quoted` dumps every field wrapped in the text delimiter.

use super::model::Grid;

/// Narrowest column in the table view
pub const MIN_COLUMN_WIDTH: usize = 4;
/// Widest column in the table view; longer cells are cut
pub const MAX_COLUMN_WIDTH: usize = 40;

const ELLIPSIS: char = '…';
const NEWLINE_MARKER: char = '⏎';

/// Column widths (in characters) for the table view
pub fn column_widths(grid: &Grid) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();

    for row in grid.rows() {
        for (col, cell) in row.enumerate() {
            let cell_width = cell.chars().count().clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
            match widths.get_mut(col) {
                Some(width) => *width = (*width).max(cell_width),
                None => widths.push(cell_width),
            }
        }
    }

    widths
}

/// Fit a cell into `width` characters, marking newlines and cut text
fn fit_cell(text: &str, width: usize) -> String {
    let visible = text.chars().map(|c| if c == '\n' { NEWLINE_MARKER } else { c });

    if text.chars().count() <= width {
        let mut cell: String = visible.collect();
        let pad = width - cell.chars().count();
        cell.extend(std::iter::repeat(' ').take(pad));
        cell
    } else {
        let mut cell: String = visible.take(width.saturating_sub(1)).collect();
        cell.push(ELLIPSIS);
        cell
    }
}

/// Aligned table with a row-number gutter and `|` column separators
pub fn render_table(grid: &Grid) -> String {
    let widths = column_widths(grid);
    let gutter = grid.height().to_string().len();
    let mut output = String::new();

    for (index, row) in grid.rows().enumerate() {
        output.push_str(&format!("{:>gutter$} ", index, gutter = gutter));
        for (col, cell) in row.enumerate() {
            output.push_str("| ");
            output.push_str(&fit_cell(cell, widths[col]));
            output.push(' ');
        }
        output.push_str("|\n");
    }

    output
}

/// Every field wrapped in the text delimiter and followed by the field
/// delimiter, one row per line
pub fn render_quoted(grid: &Grid) -> String {
    let text_delim = grid.text_delim();
    let field_delim = grid.field_delim();
    let mut output = String::new();

    for row in grid.rows() {
        for cell in row {
            output.push(text_delim);
            output.push_str(cell);
            output.push(text_delim);
            output.push(field_delim);
        }
        output.push('\n');
    }

    output
}
