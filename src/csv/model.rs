//! CSV grid data model
//!
//! `Grid` owns its rows, each row owns its cells. Every row keeps at least
//! one cell; operations that would leave a row empty clear its last cell
//! instead. Growth is reserved fallibly up front so a failed allocation
//! leaves the grid exactly as it was.

use super::cell::{try_clone_text, Cell};
use super::error::{FieldStatus, GridError};

/// Default field delimiter
pub const DEFAULT_FIELD_DELIM: char = ',';
/// Default text delimiter
pub const DEFAULT_TEXT_DELIM: char = '"';

/// Field and text delimiter pair used for parsing and serializing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    /// Separates fields within a row
    pub field: char,
    /// Quotes fields that contain special characters
    pub text: char,
}

impl Delimiters {
    pub fn new(field: char, text: char) -> Self {
        Self { field, text }
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD_DELIM, DEFAULT_TEXT_DELIM)
    }
}

/// One row of cells (never empty once created by the grid)
#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// A row holding exactly one empty cell
    fn try_new() -> Result<Self, GridError> {
        let mut cells = Vec::new();
        cells.try_reserve_exact(1)?;
        cells.push(Cell::new());
        Ok(Self { cells })
    }

    fn width(&self) -> usize {
        self.cells.len()
    }

    fn try_clone(&self) -> Result<Self, GridError> {
        let mut cells = Vec::new();
        cells.try_reserve_exact(self.cells.len())?;
        for cell in &self.cells {
            cells.push(cell.try_clone()?);
        }
        Ok(Self { cells })
    }

    /// Append `count` empty cells, all or nothing
    fn grow(&mut self, count: usize) -> Result<(), GridError> {
        self.cells.try_reserve(count)?;
        self.cells.extend((0..count).map(|_| Cell::new()));
        Ok(())
    }
}

/// Mutable in-memory CSV document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Row>,
    delimiters: Delimiters,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create an empty grid with default delimiters
    pub fn new() -> Self {
        Self::with_delimiters(Delimiters::default())
    }

    /// Create an empty grid with the given delimiters
    pub fn with_delimiters(delimiters: Delimiters) -> Self {
        Self {
            rows: Vec::new(),
            delimiters,
        }
    }

    /// Create a grid from rows of text
    ///
    /// An empty input row becomes a row with one empty field.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| {
                let mut cells: Vec<Cell> = row.into_iter().map(Cell::from_text).collect();
                if cells.is_empty() {
                    cells.push(Cell::new());
                }
                Row { cells }
            })
            .collect();

        Self {
            rows,
            delimiters: Delimiters::default(),
        }
    }

    // === Delimiters ===

    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    pub fn field_delim(&self) -> char {
        self.delimiters.field
    }

    pub fn text_delim(&self) -> char {
        self.delimiters.text
    }

    /// Change the field delimiter for later parse/serialize calls
    pub fn set_field_delim(&mut self, delim: char) {
        self.delimiters.field = delim;
    }

    /// Change the text delimiter for later parse/serialize calls
    pub fn set_text_delim(&mut self, delim: char) {
        self.delimiters.text = delim;
    }

    // === Dimensions and read access ===

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of fields in `row` (0 if the row does not exist)
    pub fn width(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Row::width)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text of a field, `None` if it does not exist
    pub fn field(&self, row: usize, entry: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(entry))
            .map(Cell::text)
    }

    /// Length of a field's text in bytes (0 if it does not exist)
    pub fn field_len(&self, row: usize, entry: usize) -> usize {
        self.field(row, entry).map_or(0, str::len)
    }

    /// Iterate over the text of every field in `row` (nothing if absent)
    pub fn row_cells(&self, row: usize) -> impl Iterator<Item = &str> {
        self.rows
            .get(row)
            .into_iter()
            .flat_map(|r| r.cells.iter().map(Cell::text))
    }

    /// Iterate over all rows, each as an iterator of field text
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = &str>> {
        self.rows.iter().map(|r| r.cells.iter().map(Cell::text))
    }

    /// Copy a field into `dest` as a NUL-terminated byte string
    ///
    /// `dest.len()` is the capacity. At most `dest.len() - 1` bytes of text
    /// are copied and a NUL is always written inside the buffer, so a
    /// capacity of 6 is needed to read `hello` completely. Missing and empty
    /// fields zero-fill the buffer and report [`FieldStatus::Empty`].
    pub fn get_field(&self, dest: &mut [u8], row: usize, entry: usize) -> FieldStatus {
        if dest.is_empty() {
            return FieldStatus::CapacityZero;
        }

        let text = match self.field(row, entry) {
            Some(text) if !text.is_empty() => text.as_bytes(),
            _ => {
                dest.fill(0);
                return FieldStatus::Empty;
            }
        };

        let room = dest.len() - 1;
        let copied = text.len().min(room);
        dest[..copied].copy_from_slice(&text[..copied]);
        dest[copied] = 0;

        if text.len() > room {
            FieldStatus::Truncated
        } else {
            FieldStatus::Complete
        }
    }

    // === Structural growth ===

    /// Append a row holding one empty field, returning its index
    pub fn append_row(&mut self) -> Result<usize, GridError> {
        let row = Row::try_new()?;
        self.rows.try_reserve(1)?;
        self.rows.push(row);
        Ok(self.rows.len() - 1)
    }

    /// Append an empty field to the end of `row`
    pub fn append_field(&mut self, row: usize) -> Result<(), GridError> {
        let height = self.height();
        let target = self
            .rows
            .get_mut(row)
            .ok_or(GridError::RowOutOfRange { row, height })?;
        target.grow(1)
    }

    /// Append rows until `row` exists, all or nothing
    fn ensure_row(&mut self, row: usize) -> Result<(), GridError> {
        if row < self.rows.len() {
            return Ok(());
        }

        let missing = row
            .checked_add(1)
            .ok_or(GridError::CoordinateOverflow { row, entry: 0 })?
            - self.rows.len();
        let mut new_rows = Vec::new();
        new_rows.try_reserve_exact(missing)?;
        for _ in 0..missing {
            new_rows.push(Row::try_new()?);
        }
        self.rows.try_reserve(missing)?;
        self.rows.extend(new_rows);

        tracing::debug!(added = missing, height = self.rows.len(), "grid grew rows");
        Ok(())
    }

    // === Removal ===

    /// Remove the last field of `row`
    ///
    /// A one-field row has that field cleared instead. A missing row is a
    /// no-op.
    pub fn remove_last_field(&mut self, row: usize) -> Result<(), GridError> {
        let Some(target) = self.rows.get_mut(row) else {
            return Ok(());
        };

        match target.width() {
            0 => Err(GridError::EmptyRow { row }),
            1 => {
                target.cells[0].clear();
                Ok(())
            }
            _ => {
                target.cells.pop();
                Ok(())
            }
        }
    }

    /// Remove the last row (no-op on an empty grid)
    pub fn remove_last_row(&mut self) -> Result<(), GridError> {
        let Some(last) = self.rows.len().checked_sub(1) else {
            return Ok(());
        };

        for _ in 0..self.rows[last].width() {
            self.remove_last_field(last)?;
        }
        self.rows.pop();
        Ok(())
    }

    /// Clear a field
    ///
    /// The last field of a row with more than one field is removed, any
    /// other field is emptied in place. Out-of-range coordinates are a no-op.
    pub fn clear_field(&mut self, row: usize, entry: usize) -> Result<(), GridError> {
        let width = self.width(row);
        if entry >= width {
            return Ok(());
        }

        if entry == width - 1 && entry != 0 {
            self.remove_last_field(row)
        } else {
            self.rows[row].cells[entry].clear();
            Ok(())
        }
    }

    /// Reduce `row` to a single empty field
    ///
    /// Clearing the last row removes it. Out-of-range rows are a no-op.
    pub fn clear_row(&mut self, row: usize) -> Result<(), GridError> {
        if row >= self.rows.len() {
            return Ok(());
        }
        if row == self.rows.len() - 1 {
            return self.remove_last_row();
        }

        let cells = &mut self.rows[row].cells;
        cells.truncate(1);
        cells[0].clear();
        Ok(())
    }

    /// Remove `row`, shifting later rows up by one
    pub fn remove_row(&mut self, row: usize) -> Result<(), GridError> {
        if row >= self.rows.len() {
            return Ok(());
        }
        self.rows.remove(row);
        Ok(())
    }

    /// Remove a field, shifting later fields in the row left by one
    ///
    /// The only field of a row is cleared rather than removed.
    pub fn remove_field(&mut self, row: usize, entry: usize) -> Result<(), GridError> {
        let width = self.width(row);
        if entry >= width {
            return Ok(());
        }
        if width == 1 {
            return self.remove_last_field(row);
        }
        self.rows[row].cells.remove(entry);
        Ok(())
    }

    /// Remove every row
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    // === Writing ===

    /// Write `text` at `(row, entry)`, appending rows and fields as needed
    pub fn set_field(&mut self, row: usize, entry: usize, text: &str) -> Result<(), GridError> {
        let needed = entry
            .checked_add(1)
            .ok_or(GridError::CoordinateOverflow { row, entry })?;
        let owned = try_clone_text(text)?;

        if let Some(target) = self.rows.get_mut(row) {
            let missing = needed.saturating_sub(target.width());
            target.grow(missing)?;
            target.cells[entry].replace(owned);
            return Ok(());
        }

        // Build the new row completely before any rows are added
        let mut last = Row::try_new()?;
        last.grow(entry)?;
        last.cells[entry].replace(owned);
        self.put_row(row, last)
    }

    /// Move already-owned text into an existing field
    pub(crate) fn replace_field(
        &mut self,
        row: usize,
        entry: usize,
        text: String,
    ) -> Result<(), GridError> {
        self.existing_cell_mut(row, entry)?.replace(text);
        Ok(())
    }

    /// Insert `text` at `(row, entry)`, shifting later fields right
    ///
    /// Coordinates that do not exist yet behave like [`Grid::set_field`].
    pub fn insert_field(&mut self, row: usize, entry: usize, text: &str) -> Result<(), GridError> {
        if entry >= self.width(row) {
            return self.set_field(row, entry, text);
        }

        let owned = try_clone_text(text)?;
        let cells = &mut self.rows[row].cells;
        cells.try_reserve(1)?;
        cells.insert(entry, Cell::from_text(owned));
        Ok(())
    }

    // === Copying ===

    /// Deep copy `src_row` of `src` into `dest_row` of this grid
    ///
    /// The destination row takes the source width and is created (along
    /// with any rows before it) if needed. A missing source row clears the
    /// destination row instead.
    pub fn copy_row_from(
        &mut self,
        dest_row: usize,
        src: &Grid,
        src_row: usize,
    ) -> Result<(), GridError> {
        match src.rows.get(src_row) {
            Some(source) => {
                let copy = source.try_clone()?;
                self.put_row(dest_row, copy)
            }
            None => self.clear_row(dest_row),
        }
    }

    /// Deep copy one row of this grid onto another
    pub fn copy_row_within(&mut self, dest_row: usize, src_row: usize) -> Result<(), GridError> {
        match self.rows.get(src_row) {
            Some(_) if src_row == dest_row => Ok(()),
            Some(source) => {
                let copy = source.try_clone()?;
                self.put_row(dest_row, copy)
            }
            None => self.clear_row(dest_row),
        }
    }

    fn put_row(&mut self, dest_row: usize, row: Row) -> Result<(), GridError> {
        self.ensure_row(dest_row)?;
        self.rows[dest_row] = row;
        Ok(())
    }

    /// Deep copy one field of `src` into an existing field of this grid
    pub fn copy_field_from(
        &mut self,
        dest_row: usize,
        dest_entry: usize,
        src: &Grid,
        src_row: usize,
        src_entry: usize,
    ) -> Result<(), GridError> {
        let text = try_clone_text(src.existing_field(src_row, src_entry)?)?;
        self.existing_cell_mut(dest_row, dest_entry)?.replace(text);
        Ok(())
    }

    /// Deep copy one field of this grid onto another existing field
    ///
    /// Copying a field onto itself is a no-op.
    pub fn copy_field_within(
        &mut self,
        dest_row: usize,
        dest_entry: usize,
        src_row: usize,
        src_entry: usize,
    ) -> Result<(), GridError> {
        let text = try_clone_text(self.existing_field(src_row, src_entry)?)?;
        let dest = self.existing_cell_mut(dest_row, dest_entry)?;
        if (dest_row, dest_entry) != (src_row, src_entry) {
            dest.replace(text);
        }
        Ok(())
    }

    fn existing_field(&self, row: usize, entry: usize) -> Result<&str, GridError> {
        let height = self.height();
        let target = self
            .rows
            .get(row)
            .ok_or(GridError::RowOutOfRange { row, height })?;
        target
            .cells
            .get(entry)
            .map(Cell::text)
            .ok_or(GridError::FieldOutOfRange {
                row,
                entry,
                width: target.width(),
            })
    }

    fn existing_cell_mut(&mut self, row: usize, entry: usize) -> Result<&mut Cell, GridError> {
        let height = self.height();
        let target = self
            .rows
            .get_mut(row)
            .ok_or(GridError::RowOutOfRange { row, height })?;
        let width = target.width();
        target
            .cells
            .get_mut(entry)
            .ok_or(GridError::FieldOutOfRange { row, entry, width })
    }
}
