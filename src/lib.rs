//! csvgrid - mutable in-memory CSV documents
//!
//! This crate parses CSV files into a grid of text cells, supports editing
//! individual cells and whole rows, and writes the grid back as correctly
//! quoted CSV.

pub mod app;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod csv;
pub mod tracing;

// Re-export commonly used types
pub use config::GridConfig;
pub use crate::csv::{Delimiters, FieldStatus, Grid, GridError, LoadError, SaveError};
