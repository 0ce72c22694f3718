//! Command-line argument parsing
//!
//! Supports:
//! - Loading a CSV file with custom delimiters
//! - Setting and inserting fields, removing rows
//! - Printing the grid and reading a single field
//! - Saving the result to another file

use clap::Parser;
use std::path::PathBuf;

use crate::config::GridConfig;
use crate::csv::{Delimiters, Grid, GridError};

/// Load, edit and save CSV files
#[derive(Parser, Debug)]
#[command(name = "csvgrid", version, about = "Load, edit and save CSV files")]
pub struct CliArgs {
    /// CSV file to load
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the edited grid to FILE
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Set a field, growing the grid as needed (0-based coordinates)
    #[arg(long = "set", value_name = "ROW:COL=TEXT")]
    pub set: Vec<String>,

    /// Insert a field, shifting later fields in the row right
    #[arg(long = "insert", value_name = "ROW:COL=TEXT")]
    pub insert: Vec<String>,

    /// Remove a row (applied after --set and --insert)
    #[arg(long = "remove-row", value_name = "ROW")]
    pub remove_row: Vec<usize>,

    /// Read one field into a fixed-capacity buffer and print it
    #[arg(long, value_name = "ROW:COL")]
    pub get: Option<String>,

    /// Buffer capacity for --get, including the terminator
    #[arg(long, value_name = "N")]
    pub capacity: Option<usize>,

    /// Print the grid as an aligned table
    #[arg(short = 'p', long)]
    pub print: bool,

    /// Print every field wrapped in the text delimiter
    #[arg(long, conflicts_with = "print")]
    pub raw: bool,

    /// Field delimiter (default from config, else ',')
    #[arg(long, value_name = "C")]
    pub field_delim: Option<char>,

    /// Text delimiter (default from config, else '"')
    #[arg(long, value_name = "C")]
    pub text_delim: Option<char>,
}

/// A single grid modification requested on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Set { row: usize, col: usize, text: String },
    Insert { row: usize, col: usize, text: String },
    RemoveRow(usize),
}

impl Edit {
    pub fn apply(&self, grid: &mut Grid) -> Result<(), GridError> {
        match self {
            Edit::Set { row, col, text } => grid.set_field(*row, *col, text),
            Edit::Insert { row, col, text } => grid.insert_field(*row, *col, text),
            Edit::RemoveRow(row) => grid.remove_row(*row),
        }
    }
}

/// How to show the grid after editing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintMode {
    #[default]
    None,
    Table,
    Raw,
}

/// Configuration derived from CLI arguments and the config file
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub delimiters: Delimiters,
    /// Edits in application order
    pub edits: Vec<Edit>,
    /// Field to read with `get_field`, as (row, col)
    pub get: Option<(usize, usize)>,
    pub capacity: usize,
    pub print: PrintMode,
}

/// Parse `ROW:COL`
fn parse_coords(spec: &str) -> Result<(usize, usize), String> {
    let (row, col) = spec
        .split_once(':')
        .ok_or_else(|| format!("Expected ROW:COL, got '{}'", spec))?;
    let row = row
        .trim()
        .parse()
        .map_err(|_| format!("Invalid row '{}' in '{}'", row, spec))?;
    let col = col
        .trim()
        .parse()
        .map_err(|_| format!("Invalid column '{}' in '{}'", col, spec))?;
    Ok((row, col))
}

/// Parse `ROW:COL=TEXT` (TEXT may itself contain `=` or be empty)
fn parse_assignment(spec: &str) -> Result<(usize, usize, String), String> {
    let (coords, text) = spec
        .split_once('=')
        .ok_or_else(|| format!("Expected ROW:COL=TEXT, got '{}'", spec))?;
    let (row, col) = parse_coords(coords)?;
    Ok((row, col, text.to_string()))
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self, defaults: &GridConfig) -> Result<RunConfig, String> {
        let fallback = defaults.delimiters();
        let delimiters = Delimiters::new(
            self.field_delim.unwrap_or(fallback.field),
            self.text_delim.unwrap_or(fallback.text),
        );
        if delimiters.field == delimiters.text {
            return Err(format!(
                "Field and text delimiters must differ (both '{}')",
                delimiters.field
            ));
        }
        if delimiters.field == '\n' || delimiters.text == '\n' {
            return Err("Newline cannot be used as a delimiter".to_string());
        }

        let mut edits = Vec::new();
        for spec in &self.set {
            let (row, col, text) = parse_assignment(spec)?;
            edits.push(Edit::Set { row, col, text });
        }
        for spec in &self.insert {
            let (row, col, text) = parse_assignment(spec)?;
            edits.push(Edit::Insert { row, col, text });
        }

        // Highest row first so earlier removals don't shift later targets
        let mut removals = self.remove_row.clone();
        removals.sort_unstable_by(|a, b| b.cmp(a));
        removals.dedup();
        edits.extend(removals.into_iter().map(Edit::RemoveRow));

        let get = self.get.as_deref().map(parse_coords).transpose()?;

        let print = if self.print {
            PrintMode::Table
        } else if self.raw {
            PrintMode::Raw
        } else {
            PrintMode::None
        };

        Ok(RunConfig {
            input: self.input,
            output: self.output,
            delimiters,
            edits,
            get,
            capacity: self.capacity.unwrap_or(defaults.get_capacity),
            print,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["csvgrid", "data.csv"];
        argv.extend_from_slice(extra);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_minimal_args() {
        let config = args(&[]).into_config(&GridConfig::default()).unwrap();
        assert_eq!(config.input, PathBuf::from("data.csv"));
        assert!(config.output.is_none());
        assert!(config.edits.is_empty());
        assert_eq!(config.delimiters, Delimiters::default());
        assert_eq!(config.capacity, 64);
        assert_eq!(config.print, PrintMode::None);
    }

    #[test]
    fn test_edits_in_order() {
        let config = args(&[
            "--set",
            "10:9=test",
            "--insert",
            "0:1=a=b",
            "--remove-row",
            "1",
            "--remove-row",
            "4",
            "--remove-row",
            "1",
        ])
        .into_config(&GridConfig::default())
        .unwrap();

        assert_eq!(
            config.edits,
            vec![
                Edit::Set {
                    row: 10,
                    col: 9,
                    text: "test".to_string()
                },
                Edit::Insert {
                    row: 0,
                    col: 1,
                    text: "a=b".to_string()
                },
                Edit::RemoveRow(4),
                Edit::RemoveRow(1),
            ]
        );
    }

    #[test]
    fn test_set_with_empty_text() {
        let config = args(&["--set", "0:0="])
            .into_config(&GridConfig::default())
            .unwrap();
        assert_eq!(
            config.edits,
            vec![Edit::Set {
                row: 0,
                col: 0,
                text: String::new()
            }]
        );
    }

    #[test]
    fn test_bad_coordinates() {
        let err = args(&["--set", "x:1=a"])
            .into_config(&GridConfig::default())
            .unwrap_err();
        assert!(err.contains("Invalid row"));

        let err = args(&["--get", "3"])
            .into_config(&GridConfig::default())
            .unwrap_err();
        assert!(err.contains("ROW:COL"));
    }

    #[test]
    fn test_get_and_capacity() {
        let config = args(&["--get", "2:3", "--capacity", "8"])
            .into_config(&GridConfig::default())
            .unwrap();
        assert_eq!(config.get, Some((2, 3)));
        assert_eq!(config.capacity, 8);
    }

    #[test]
    fn test_delimiters_from_flags_and_config() {
        let defaults = GridConfig {
            field_delim: ';',
            text_delim: '\'',
            get_capacity: 32,
        };
        let config = args(&[]).into_config(&defaults).unwrap();
        assert_eq!(config.delimiters, Delimiters::new(';', '\''));
        assert_eq!(config.capacity, 32);

        let config = args(&["--field-delim", "|"]).into_config(&defaults).unwrap();
        assert_eq!(config.delimiters, Delimiters::new('|', '\''));
    }

    #[test]
    fn test_same_delimiters_rejected() {
        let err = args(&["--field-delim", "\""])
            .into_config(&GridConfig::default())
            .unwrap_err();
        assert!(err.contains("must differ"));
    }

    #[test]
    fn test_print_modes() {
        let config = args(&["--print"])
            .into_config(&GridConfig::default())
            .unwrap();
        assert_eq!(config.print, PrintMode::Table);

        let config = args(&["--raw"]).into_config(&GridConfig::default()).unwrap();
        assert_eq!(config.print, PrintMode::Raw);

        assert!(CliArgs::try_parse_from(["csvgrid", "x.csv", "--print", "--raw"]).is_err());
    }

    #[test]
    fn test_edit_apply() {
        let mut grid = Grid::new();
        Edit::Set {
            row: 1,
            col: 1,
            text: "b".to_string(),
        }
        .apply(&mut grid)
        .unwrap();
        Edit::Insert {
            row: 1,
            col: 0,
            text: "a".to_string(),
        }
        .apply(&mut grid)
        .unwrap();
        Edit::RemoveRow(0).apply(&mut grid).unwrap();

        assert_eq!(grid.height(), 1);
        assert_eq!(grid.row_cells(0).collect::<Vec<_>>(), vec!["a", "", "b"]);
    }
}
