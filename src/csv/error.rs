//! Error and status types for grid operations, loading and saving

use std::collections::TryReserveError;
use std::path::PathBuf;

/// Errors from grid mutation and access
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The requested row does not exist
    RowOutOfRange { row: usize, height: usize },
    /// The requested field does not exist in an existing row
    FieldOutOfRange {
        row: usize,
        entry: usize,
        width: usize,
    },
    /// A row was found with no fields (every row must keep at least one)
    EmptyRow { row: usize },
    /// A coordinate is too large to ever exist; the grid is unchanged
    CoordinateOverflow { row: usize, entry: usize },
    /// Growing storage failed; the grid is unchanged
    Alloc(TryReserveError),
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RowOutOfRange { row, height } => {
                write!(f, "row {} out of range (height {})", row, height)
            }
            Self::FieldOutOfRange { row, entry, width } => write!(
                f,
                "field {} out of range in row {} (width {})",
                entry, row, width
            ),
            Self::EmptyRow { row } => write!(f, "row {} has no fields", row),
            Self::CoordinateOverflow { row, entry } => write!(
                f,
                "coordinate {}:{} exceeds the addressable grid size",
                row, entry
            ),
            Self::Alloc(e) => write!(f, "allocation failed: {}", e),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Alloc(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TryReserveError> for GridError {
    fn from(e: TryReserveError) -> Self {
        Self::Alloc(e)
    }
}

/// Errors that can occur when loading a CSV file into a grid
#[derive(Debug)]
pub enum LoadError {
    /// File does not exist
    NotFound(PathBuf),
    /// Permission denied to read file
    PermissionDenied(PathBuf),
    /// Path is a directory, not a file
    IsDirectory(PathBuf),
    /// Other I/O error while opening or reading
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Building the grid failed
    Grid(GridError),
}

impl LoadError {
    pub(crate) fn from_io(path: PathBuf, e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io { path, source: e },
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "file not found: {}", path.display()),
            Self::PermissionDenied(path) => write!(f, "permission denied: {}", path.display()),
            Self::IsDirectory(path) => write!(f, "cannot load directory: {}", path.display()),
            Self::Io { path, source } => write!(f, "error reading {}: {}", path.display(), source),
            Self::Grid(e) => write!(f, "failed to build grid: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for LoadError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Errors that can occur when saving a grid to disk
#[derive(Debug)]
pub enum SaveError {
    /// The file could not be created or written (invalid name, insufficient access, ...)
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Write { path, source } => {
                write!(f, "unable to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Write { source, .. } => Some(source),
        }
    }
}

/// Outcome of copying a field into a caller-supplied buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    /// The whole text was copied
    Complete,
    /// The text was cut to fit the buffer
    Truncated,
    /// The cell is empty or does not exist; the buffer was zero-filled
    Empty,
    /// The buffer has no room at all
    CapacityZero,
}

impl FieldStatus {
    /// Short label for display
    pub fn label(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Truncated => "truncated",
            Self::Empty => "empty",
            Self::CapacityZero => "capacity zero",
        }
    }
}
