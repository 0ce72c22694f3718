//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::PathBuf;

use csvgrid::csv::Grid;

/// Build a grid from string slices
pub fn grid(rows: &[&[&str]]) -> Grid {
    Grid::from_rows(
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect(),
    )
}

/// All cell text of a grid, row by row
pub fn contents(grid: &Grid) -> Vec<Vec<String>> {
    grid.rows()
        .map(|row| row.map(str::to_string).collect())
        .collect()
}

/// One row's cell text
pub fn row(grid: &Grid, row: usize) -> Vec<&str> {
    grid.row_cells(row).collect()
}

/// Panic if any row has width 0
pub fn assert_width_invariant(grid: &Grid) {
    for r in 0..grid.height() {
        assert!(
            grid.width(r) >= 1,
            "row {} has width {} (height {})",
            r,
            grid.width(r),
            grid.height()
        );
    }
}

/// Write `content` to `name` inside `dir` and return the path
pub fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}
