//! Character-level CSV field tokenizer
//!
//! Reads one field at a time from a character source and reports what
//! follows it. Quoted fields may contain the field delimiter, newlines and
//! doubled text delimiters. Anything between a closing text delimiter and
//! the next field delimiter, newline or end of input is discarded.

use super::model::Delimiters;

/// What follows a field that was just read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEnd {
    /// Another field follows on the same row
    SameRow,
    /// The next field starts a new row
    NewRow,
    /// There is no next field
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Plain,
    Quoted,
    /// Just saw a text delimiter inside a quoted region: either an escaped
    /// delimiter or the end of the quoted text
    QuotedMaybeEnd,
}

/// Field tokenizer over any `char` iterator
///
/// Holds one character of pushback so a newline can be checked for being
/// the final line terminator without losing the following character.
#[derive(Debug)]
pub struct Tokenizer<I>
where
    I: Iterator<Item = char>,
{
    chars: I,
    pushback: Option<char>,
    field_delim: char,
    text_delim: char,
}

impl<I> Tokenizer<I>
where
    I: Iterator<Item = char>,
{
    pub fn new(chars: I, delimiters: Delimiters) -> Self {
        Self {
            chars,
            pushback: None,
            field_delim: delimiters.field,
            text_delim: delimiters.text,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        self.pushback.take().or_else(|| self.chars.next())
    }

    fn unread(&mut self, ch: char) {
        debug_assert!(self.pushback.is_none(), "pushback slot already in use");
        self.pushback = Some(ch);
    }

    /// True when no characters remain (does not consume anything)
    pub fn is_at_end(&mut self) -> bool {
        match self.next_char() {
            Some(ch) => {
                self.unread(ch);
                false
            }
            None => true,
        }
    }

    /// Read the next field's decoded text and classify what follows it
    pub fn read_field(&mut self) -> (String, FieldEnd) {
        let mut text = String::new();
        let mut state = State::Plain;

        let terminator = loop {
            let Some(ch) = self.next_char() else {
                break None;
            };

            match state {
                State::Plain => {
                    if ch == self.text_delim {
                        // Unquoted text before an opening quote is dropped
                        text.clear();
                        state = State::Quoted;
                    } else if ch == self.field_delim || ch == '\n' {
                        break Some(ch);
                    } else {
                        text.push(ch);
                    }
                }
                State::Quoted => {
                    if ch == self.text_delim {
                        state = State::QuotedMaybeEnd;
                    } else {
                        text.push(ch);
                    }
                }
                State::QuotedMaybeEnd => {
                    if ch == self.text_delim {
                        text.push(ch);
                        state = State::Quoted;
                    } else {
                        break self.skip_to_terminator(ch);
                    }
                }
            }
        };

        let end = self.classify(terminator);
        tracing::trace!(len = text.len(), ?end, "tokenized field");
        (text, end)
    }

    /// Discard characters after a closing quote until a real terminator
    fn skip_to_terminator(&mut self, mut ch: char) -> Option<char> {
        loop {
            if ch == self.field_delim || ch == '\n' {
                return Some(ch);
            }
            ch = self.next_char()?;
        }
    }

    fn classify(&mut self, terminator: Option<char>) -> FieldEnd {
        match terminator {
            Some(ch) if ch == self.field_delim => FieldEnd::SameRow,
            // A newline right before end of input only terminates the last line
            Some(_) => match self.next_char() {
                Some(next) => {
                    self.unread(next);
                    FieldEnd::NewRow
                }
                None => FieldEnd::EndOfInput,
            },
            None => FieldEnd::EndOfInput,
        }
    }
}

/// Tokenize a whole string into `(text, end)` pairs
pub fn tokenize(content: &str, delimiters: Delimiters) -> Vec<(String, FieldEnd)> {
    let mut tokenizer = Tokenizer::new(content.chars(), delimiters);
    let mut fields = Vec::new();
    if tokenizer.is_at_end() {
        return fields;
    }
    loop {
        let (text, end) = tokenizer.read_field();
        fields.push((text, end));
        if end == FieldEnd::EndOfInput {
            return fields;
        }
    }
}
