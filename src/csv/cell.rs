//! A single grid cell

use super::error::GridError;

/// Owned text of one field
///
/// A fresh cell holds the empty string. Its length is always the length
/// of the stored text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    text: String,
}

impl Cell {
    /// Create an empty cell
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell owning `text`
    pub fn from_text(text: String) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the text, reserving fallibly before anything is overwritten
    pub fn set(&mut self, text: &str) -> Result<(), GridError> {
        if text.len() > self.text.capacity() {
            self.text.try_reserve_exact(text.len() - self.text.len())?;
        }
        self.text.clear();
        self.text.push_str(text);
        Ok(())
    }

    /// Take ownership of already-allocated text
    pub fn replace(&mut self, text: String) {
        self.text = text;
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Deep copy that reports allocation failure instead of aborting
    pub fn try_clone(&self) -> Result<Self, GridError> {
        try_clone_text(&self.text).map(Self::from_text)
    }
}

/// Copy `text` into a new `String`, reserving fallibly
pub(crate) fn try_clone_text(text: &str) -> Result<String, GridError> {
    let mut owned = String::new();
    owned.try_reserve_exact(text.len())?;
    owned.push_str(text);
    Ok(owned)
}
