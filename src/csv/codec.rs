//! Loading and saving grids as CSV text
//!
//! Parsing drives the [`Tokenizer`] and feeds each field into the grid.
//! Serializing quotes a field only when it contains the text delimiter,
//! the field delimiter or a newline.

use std::borrow::Cow;
use std::convert::Infallible;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::error::{GridError, LoadError, SaveError};
use super::model::{Delimiters, Grid};
use super::tokenizer::{FieldEnd, Tokenizer};

/// Parse CSV content into a new grid using `delimiters`
///
/// Empty content gives a grid with no rows.
pub fn parse_csv(content: &str, delimiters: Delimiters) -> Result<Grid, GridError> {
    let mut grid = Grid::with_delimiters(delimiters);
    let mut tokenizer = Tokenizer::new(content.chars(), delimiters);

    if tokenizer.is_at_end() {
        return Ok(grid);
    }

    let mut row = grid.append_row()?;
    let mut entry = 0;

    loop {
        let (text, end) = tokenizer.read_field();
        grid.replace_field(row, entry, text)?;

        match end {
            FieldEnd::SameRow => {
                grid.append_field(row)?;
                entry += 1;
            }
            FieldEnd::NewRow => {
                row = grid.append_row()?;
                entry = 0;
            }
            FieldEnd::EndOfInput => break,
        }
    }

    Ok(grid)
}

/// Quote `text` for output if it contains a delimiter or newline
///
/// Text delimiters inside a quoted field are doubled.
pub fn escape_field(text: &str, delimiters: Delimiters) -> Cow<'_, str> {
    let needs_quotes = text
        .chars()
        .any(|c| c == delimiters.text || c == delimiters.field || c == '\n');

    if !needs_quotes {
        return Cow::Borrowed(text);
    }

    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(delimiters.text);
    for ch in text.chars() {
        if ch == delimiters.text {
            quoted.push(ch);
        }
        quoted.push(ch);
    }
    quoted.push(delimiters.text);
    Cow::Owned(quoted)
}

/// Walk the grid in output order, handing each piece of text to `emit`
fn emit_csv<E, F>(grid: &Grid, mut emit: F) -> Result<(), E>
where
    F: FnMut(&str) -> Result<(), E>,
{
    let delimiters = grid.delimiters();
    let mut delim_buf = [0u8; 4];
    let field_delim: &str = delimiters.field.encode_utf8(&mut delim_buf);

    for (i, row) in grid.rows().enumerate() {
        if i > 0 {
            emit("\n")?;
        }
        for (j, text) in row.enumerate() {
            if j > 0 {
                emit(field_delim)?;
            }
            emit(escape_field(text, delimiters).as_ref())?;
        }
    }
    Ok(())
}

/// Serialize the grid to a writer
///
/// Rows are separated by `\n` with no newline after the last row.
pub fn write_csv<W: Write>(grid: &Grid, mut out: W) -> io::Result<()> {
    emit_csv(grid, |piece| out.write_all(piece.as_bytes()))
}

/// Serialize the grid to a string
pub fn to_csv_string(grid: &Grid) -> String {
    let mut output = String::new();
    let _ = emit_csv(grid, |piece| -> Result<(), Infallible> {
        output.push_str(piece);
        Ok(())
    });
    output
}

fn decode(bytes: Vec<u8>, path: &Path) -> String {
    match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(
                "{} is not valid UTF-8 (at byte {}), replacing invalid sequences",
                path.display(),
                e.utf8_error().valid_up_to()
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

impl Grid {
    /// Replace this grid's rows with the contents of a CSV file
    ///
    /// The grid's own delimiters are used for parsing. On any error the
    /// grid is left unchanged.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();

        let metadata =
            fs::metadata(path).map_err(|e| LoadError::from_io(path.to_path_buf(), e))?;
        if metadata.is_dir() {
            return Err(LoadError::IsDirectory(path.to_path_buf()));
        }

        let bytes = fs::read(path).map_err(|e| LoadError::from_io(path.to_path_buf(), e))?;
        let byte_len = bytes.len();
        let content = decode(bytes, path);

        let parsed = parse_csv(&content, self.delimiters())?;
        *self = parsed;

        tracing::debug!(
            "Loaded {} ({} bytes, {} rows)",
            path.display(),
            byte_len,
            self.height()
        );
        Ok(())
    }

    /// Write the grid to `path`, creating or overwriting the file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        let path = path.as_ref();
        let write_error = |source| SaveError::Write {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(write_error)?;
        let mut out = BufWriter::new(file);
        write_csv(self, &mut out).map_err(write_error)?;
        out.flush().map_err(write_error)?;

        tracing::debug!("Saved {} ({} rows)", path.display(), self.height());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Grid {
        parse_csv(content, Delimiters::default()).unwrap()
    }

    fn row(grid: &Grid, row: usize) -> Vec<&str> {
        grid.row_cells(row).collect()
    }

    #[test]
    fn test_parse_simple_csv() {
        let grid = parse("name,age\nAda,36\n");
        assert_eq!(grid.height(), 2);
        assert_eq!(row(&grid, 0), vec!["name", "age"]);
        assert_eq!(row(&grid, 1), vec!["Ada", "36"]);
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let grid = parse("name,age\nAda,36");
        assert_eq!(grid.height(), 2);
        assert_eq!(row(&grid, 1), vec!["Ada", "36"]);
    }

    #[test]
    fn test_parse_empty_fields() {
        let grid = parse("a,,b,");
        assert_eq!(row(&grid, 0), vec!["a", "", "b", ""]);
    }

    #[test]
    fn test_parse_ragged_rows() {
        let grid = parse("a,b,c\n1\n\nx,y");
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.width(0), 3);
        assert_eq!(grid.width(1), 1);
        assert_eq!(row(&grid, 2), vec![""]);
        assert_eq!(row(&grid, 3), vec!["x", "y"]);
    }

    #[test]
    fn test_parse_quoted_fields() {
        let content = "\"hello, world\",\"test\"\n\"with \"\"quotes\"\"\",normal\n";
        let grid = parse(content);
        assert_eq!(grid.field(0, 0), Some("hello, world"));
        assert_eq!(grid.field(1, 0), Some("with \"quotes\""));
        assert_eq!(grid.field(1, 1), Some("normal"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_keeps_delimiters() {
        let delims = Delimiters::new('\t', '\'');
        let grid = parse_csv("a\tb", delims).unwrap();
        assert_eq!(grid.delimiters(), delims);
        assert_eq!(row(&grid, 0), vec!["a", "b"]);
    }

    #[test]
    fn test_escape_field() {
        let d = Delimiters::default();
        assert!(matches!(escape_field("plain", d), Cow::Borrowed("plain")));
        assert_eq!(escape_field("a,b", d), "\"a,b\"");
        assert_eq!(escape_field("line\nbreak", d), "\"line\nbreak\"");
        assert_eq!(escape_field("say \"hi\"", d), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("", d), "");
    }

    #[test]
    fn test_to_csv_string_layout() {
        let grid = Grid::from_rows(vec![
            vec!["a".into(), "b,c".into(), "".into()],
            vec!["d".into()],
        ]);
        assert_eq!(to_csv_string(&grid), "a,\"b,c\",\nd");
    }

    #[test]
    fn test_to_csv_string_custom_delimiters() {
        let mut grid = Grid::from_rows(vec![vec!["x;y".into(), "it's".into(), "a,b".into()]]);
        grid.set_field_delim(';');
        grid.set_text_delim('\'');
        assert_eq!(to_csv_string(&grid), "'x;y';'it''s';a,b");
    }

    #[test]
    fn test_round_trip_special_text() {
        let original = Grid::from_rows(vec![
            vec!["a,\"b\nc".into(), "plain".into()],
            vec!["".into(), "\"\"".into(), "end,".into()],
        ]);
        let reparsed = parse(&to_csv_string(&original));
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_write_csv_matches_string() {
        let grid = parse("a,\"b\"\"c\"\n1,2");
        let mut out = Vec::new();
        write_csv(&grid, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), to_csv_string(&grid));
    }

    #[test]
    fn test_load_and_save_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv");
        fs::write(&path, "name,age\nAda,36\n").unwrap();

        let mut grid = Grid::new();
        grid.load(&path).unwrap();
        assert_eq!(grid.height(), 2);

        grid.set_field(1, 1, "37").unwrap();
        let out = dir.path().join("out.csv");
        grid.save(&out).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "name,age\nAda,37");
    }

    #[test]
    fn test_load_missing_file_leaves_grid() {
        let dir = tempfile::tempdir().unwrap();
        let mut grid = parse("keep,me");
        let err = grid.load(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
        assert_eq!(row(&grid, 0), vec!["keep", "me"]);
    }

    #[test]
    fn test_load_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut grid = Grid::new();
        assert!(matches!(
            grid.load(dir.path()),
            Err(LoadError::IsDirectory(_))
        ));
    }

    #[test]
    fn test_load_uses_grid_delimiters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.psv");
        fs::write(&path, "a|'b|c'\n").unwrap();

        let mut grid = Grid::new();
        grid.set_field_delim('|');
        grid.set_text_delim('\'');
        grid.load(&path).unwrap();
        assert_eq!(row(&grid, 0), vec!["a", "b|c"]);
        assert_eq!(grid.field_delim(), '|');
    }

    #[test]
    fn test_load_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.csv");
        fs::write(&path, b"caf\xe9,ok").unwrap();

        let mut grid = Grid::new();
        grid.load(&path).unwrap();
        assert_eq!(grid.field(0, 0), Some("caf\u{FFFD}"));
        assert_eq!(grid.field(0, 1), Some("ok"));
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let grid = parse("a");
        let err = grid
            .save(dir.path().join("no/such/dir/out.csv"))
            .unwrap_err();
        assert!(matches!(err, SaveError::Write { .. }));
    }
}
