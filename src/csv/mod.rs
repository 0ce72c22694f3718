//! CSV document model
//!
//! Parses CSV text into a mutable grid of cells and writes it back with
//! correct quoting:
//! - Quote-aware field tokenizer with configurable delimiters
//! - Variable-width rows with insert/append/remove/copy operations
//! - Load/save to files
//!
//! # Architecture
//!
//! ```text
//! Grid
//! ├── Delimiters (field, text)
//! └── rows: Vec<Row>
//!             └── cells: Vec<Cell>   (always at least one)
//!
//! load:  file ─► Tokenizer ─► (text, FieldEnd)* ─► Grid
//! save:  Grid ─► escape_field per cell ─► file
//! ```

mod cell;
mod codec;
mod error;
mod model;
pub mod render;
mod tokenizer;

pub use cell::Cell;
pub use codec::{escape_field, parse_csv, to_csv_string, write_csv};
pub use error::{FieldStatus, GridError, LoadError, SaveError};
pub use model::{Delimiters, Grid, DEFAULT_FIELD_DELIM, DEFAULT_TEXT_DELIM};
pub use tokenizer::{tokenize, FieldEnd, Tokenizer};
