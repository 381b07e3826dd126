//! Text buffer abstraction over the host's document widget

use std::borrow::Cow;
use std::ops::Range;

/// Zero-based caret location; `column` counts characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaretPosition {
    pub line: usize,
    pub column: usize,
}

/// The focused document as seen by the intellisense controller.
///
/// Offsets are byte offsets into [`text`](TextBuffer::text) and always sit on
/// a character boundary.
pub trait TextBuffer {
    fn text(&self) -> Cow<'_, str>;

    fn caret(&self) -> usize;

    fn set_caret(&mut self, offset: usize);

    /// Replace `range` with `text`. The caret is left for the caller to place.
    fn replace(&mut self, range: Range<usize>, text: &str);

    /// Maximal run of non-whitespace characters ending at the caret.
    fn current_word(&self) -> String {
        word_before(&self.text(), self.caret()).to_string()
    }

    fn caret_position(&self) -> CaretPosition {
        let text = self.text();
        let before = &text[..floor_boundary(&text, self.caret())];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        CaretPosition {
            line,
            column: before[line_start..].chars().count(),
        }
    }

    /// Insert at the caret and move the caret past the insertion.
    fn insert(&mut self, text: &str) {
        let caret = floor_boundary(&self.text(), self.caret());
        self.replace(caret..caret, text);
        self.set_caret(caret + text.len());
    }

    /// Delete the character before the caret, returning it.
    fn delete_before(&mut self) -> Option<char> {
        let (caret, deleted) = {
            let text = self.text();
            let caret = floor_boundary(&text, self.caret());
            (caret, text[..caret].chars().next_back()?)
        };
        let start = caret - deleted.len_utf8();
        self.replace(start..caret, "");
        self.set_caret(start);
        Some(deleted)
    }
}

/// The word that ends at `caret`.
pub fn word_before(text: &str, caret: usize) -> &str {
    let caret = floor_boundary(text, caret);
    let before = &text[..caret];
    let start = before
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    &before[start..]
}

/// Clamp `offset` into `text` and back it off to a character boundary.
pub(crate) fn floor_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// A plain in-memory document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryBuffer {
    text: String,
    caret: usize,
}

impl MemoryBuffer {
    /// A buffer holding `text` with the caret at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.len();
        MemoryBuffer { text, caret }
    }

    pub fn with_caret(mut self, offset: usize) -> Self {
        self.set_caret(offset);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl TextBuffer for MemoryBuffer {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn set_caret(&mut self, offset: usize) {
        self.caret = floor_boundary(&self.text, offset);
    }

    fn replace(&mut self, range: Range<usize>, text: &str) {
        let end = floor_boundary(&self.text, range.end);
        let start = floor_boundary(&self.text, range.start.min(end));
        self.text.replace_range(start..end, text);
        self.caret = floor_boundary(&self.text, self.caret);
    }
}
