//! The example program: load, edit, show, read back and save a grid

use std::io::Write;

use anyhow::Result;

use crate::cli::{PrintMode, RunConfig};
use crate::csv::{render, Grid};

/// Execute a run configuration, writing user-facing output to `out`
pub fn run(config: &RunConfig, out: &mut impl Write) -> Result<Grid> {
    let mut grid = Grid::with_delimiters(config.delimiters);
    grid.load(&config.input)
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", config.input.display(), e))?;

    tracing::info!(
        "Loaded {} ({} rows)",
        config.input.display(),
        grid.height()
    );

    for edit in &config.edits {
        edit.apply(&mut grid)
            .map_err(|e| anyhow::anyhow!("Failed to apply {:?}: {}", edit, e))?;
        tracing::debug!("Applied {:?}", edit);
    }

    match config.print {
        PrintMode::Table => write!(out, "{}", render::render_table(&grid))?,
        PrintMode::Raw => write!(out, "{}", render::render_quoted(&grid))?,
        PrintMode::None => {}
    }

    if let Some((row, col)) = config.get {
        let mut buffer = vec![0u8; config.capacity];
        let status = grid.get_field(&mut buffer, row, col);
        let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
        writeln!(
            out,
            "{}:{} = \"{}\" ({})",
            row,
            col,
            String::from_utf8_lossy(&buffer[..end]),
            status.label()
        )?;
    }

    if let Some(output) = &config.output {
        grid.save(output)
            .map_err(|e| anyhow::anyhow!("Failed to save {}: {}", output.display(), e))?;
        writeln!(out, "Saved {} rows to {}", grid.height(), output.display())?;
    }

    Ok(grid)
}
