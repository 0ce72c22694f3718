//! Benchmarks for grid mutation
//!
//! Run with: cargo bench grid_operations

use csvgrid::csv::Grid;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn filled(rows: usize, cols: usize) -> Grid {
    Grid::from_rows(
        (0..rows)
            .map(|r| (0..cols).map(|c| format!("{}:{}", r, c)).collect())
            .collect(),
    )
}

// ============================================================================
// Growth
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn set_field_far_corner(n: usize) {
    let mut grid = Grid::new();
    let _ = grid.set_field(n, n, divan::black_box("corner"));
    divan::black_box(grid);
}

#[divan::bench(args = [100, 1000])]
fn append_rows(n: usize) {
    let mut grid = Grid::new();
    for _ in 0..n {
        let _ = grid.append_row();
    }
    divan::black_box(grid);
}

// ============================================================================
// Shifting
// ============================================================================

#[divan::bench(args = [100, 1000, 10000])]
fn remove_first_row(bencher: divan::Bencher, n: usize) {
    bencher
        .with_inputs(|| filled(n, 4))
        .bench_local_values(|mut grid| {
            let _ = grid.remove_row(0);
            grid
        });
}

#[divan::bench(args = [10, 100, 1000])]
fn insert_field_at_start(bencher: divan::Bencher, cols: usize) {
    bencher
        .with_inputs(|| filled(1, cols))
        .bench_local_values(|mut grid| {
            let _ = grid.insert_field(0, 0, "new");
            grid
        });
}

// ============================================================================
// Reading
// ============================================================================

#[divan::bench(args = [8, 64, 1024])]
fn get_field_into_buffer(capacity: usize) {
    let grid = filled(10, 10);
    let mut buffer = vec![0u8; capacity];
    divan::black_box(grid.get_field(&mut buffer, 5, 5));
}

#[divan::bench]
fn copy_row_within() {
    let mut grid = filled(100, 20);
    let _ = grid.copy_row_within(99, 0);
    divan::black_box(grid);
}
