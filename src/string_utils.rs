//! UTF-8 safe offsets and line lookup
//!
//! Every offset the engine receives from a host is a byte offset into the
//! buffer. Hosts are not trusted to hand us character boundaries, so all
//! entry points clamp with [`floor_char_boundary`] before slicing.

// ─────────────────────────────────────────────────────────────────────────────
// Character Boundary Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Largest index `<= index` that lies on a character boundary.
///
/// Indices past the end clamp to `s.len()`.
#[inline]
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let bytes = s.as_bytes();
    let mut i = index;
    while i > 0 && !is_utf8_char_start(bytes[i]) {
        i -= 1;
    }
    i
}

/// Smallest index `>= index` that lies on a character boundary.
#[inline]
pub fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let bytes = s.as_bytes();
    let mut i = index;
    while i < bytes.len() && !is_utf8_char_start(bytes[i]) {
        i += 1;
    }
    i
}

/// A byte is a char start unless it is a continuation byte (10xxxxxx).
#[inline]
fn is_utf8_char_start(byte: u8) -> bool {
    (byte & 0b1100_0000) != 0b1000_0000
}

// ─────────────────────────────────────────────────────────────────────────────
// Line Lookup
// ─────────────────────────────────────────────────────────────────────────────

/// Byte range of one line, excluding its trailing `\n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    /// The line's text.
    pub fn text<'a>(&self, buffer: &'a str) -> &'a str {
        &buffer[self.start..self.end]
    }

    /// Offset relative to the line start, clamped to the line.
    pub fn column_of(&self, offset: usize) -> usize {
        offset.clamp(self.start, self.end) - self.start
    }
}

/// The line containing `offset`.
///
/// An offset sitting right after a `\n` belongs to the following line,
/// which is where a caret there is drawn.
pub fn line_span_at(text: &str, offset: usize) -> LineSpan {
    let offset = floor_char_boundary(text, offset);
    let start = text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = text[offset..]
        .find('\n')
        .map(|i| offset + i)
        .unwrap_or(text.len());
    LineSpan { start, end }
}

/// All lines of `text` with their start offsets.
///
/// Unlike `str::lines`, a trailing `\n` yields a final empty line, so the
/// number of spans always equals the number of `\n` plus one.
pub fn line_spans(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut start = 0;
    text.split('\n').map(move |line| {
        let at = start;
        start += line.len() + 1;
        (at, line)
    })
}

/// Number of leading whitespace characters (not bytes).
pub fn leading_whitespace_chars(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
