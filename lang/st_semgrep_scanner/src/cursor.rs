//! Cursor over a sentinel-terminated buffer, implementing [`Lexer`].
//!
//! The cursor walks the buffer one UTF-8 code point at a time and keeps the
//! two extra positions tree-sitter tracks for an external scanner: where the
//! current token starts (moved by skipped whitespace) and where it was last
//! marked to end. EOF is the sentinel byte at `pos == source_len`; a `0x00`
//! before that is an interior NUL and reads as ordinary `'\0'` text.

use crate::lexer::Lexer;

/// Cursor over a [`SourceBuffer`](crate::SourceBuffer).
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor) or
/// [`SourceBuffer::cursor_at()`](crate::SourceBuffer::cursor_at). The cursor
/// is [`Copy`], so a host can snapshot it before offering it to the scanner
/// and retry other rules from the snapshot on "no match".
///
/// # Invariant
///
/// `buf[source_len] == 0x00` and `pos`, `token_start`, `marked_end` are all
/// `<= source_len`.
#[derive(Clone, Copy, Debug)]
pub struct SourceCursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel).
    source_len: u32,
    /// Start of the token being built.
    token_start: u32,
    /// Last position recorded by `mark_end`.
    marked_end: u32,
}

impl<'a> SourceCursor<'a> {
    pub(crate) fn new(buf: &'a [u8], source_len: u32, pos: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos,
            source_len,
            token_start: pos,
            marked_end: pos,
        }
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Byte offset where the current token starts.
    #[inline]
    pub fn token_start(&self) -> u32 {
        self.token_start
    }

    /// Byte offset recorded by the last [`mark_end`](Lexer::mark_end).
    ///
    /// Equals [`token_start()`](Self::token_start) until the first mark.
    #[inline]
    pub fn marked_end(&self) -> u32 {
        self.marked_end
    }

    /// Extract a source substring as `&str`.
    ///
    /// Returns `""` if `start..end` is out of range or does not fall on
    /// character boundaries.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        let end = end.min(self.source_len) as usize;
        let start = (start as usize).min(end);
        std::str::from_utf8(&self.buf[start..end]).unwrap_or_default()
    }

    /// Text of the token from its start to the last marked end.
    pub fn token_text(&self) -> &'a str {
        self.slice(self.token_start, self.marked_end)
    }

    /// Returns the byte at the current position (`0x00` at EOF).
    #[inline]
    fn current_byte(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    ///
    /// Continuation and invalid leading bytes count as one byte, so a cursor
    /// that lands mid-character still makes progress.
    #[inline]
    fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }
}

impl Lexer for SourceCursor<'_> {
    #[inline]
    fn lookahead(&self) -> char {
        let start = self.pos as usize;
        let width = Self::utf8_char_width(self.current_byte()) as usize;
        self.buf
            .get(start..start + width)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .and_then(|s| s.chars().next())
            .unwrap_or('\0')
    }

    #[inline]
    fn advance(&mut self, skip: bool) {
        if self.is_eof() {
            return;
        }
        let width = Self::utf8_char_width(self.current_byte());
        self.pos = (self.pos + width).min(self.source_len);
        if skip {
            self.token_start = self.pos;
        }
    }

    #[inline]
    fn mark_end(&mut self) {
        self.marked_end = self.pos;
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Bulk variant: one `memchr3` search for the next `<`, `.` or `$`.
    ///
    /// All three marker bytes are ASCII, so a match is always a character
    /// boundary.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    fn eat_text(&mut self) {
        self.advance(false);
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(offset) = memchr::memchr3(b'<', b'.', b'$', remaining) {
            self.pos += offset as u32;
        } else {
            self.pos = self.source_len;
        }
    }

    fn position(&self) -> Option<u32> {
        Some(self.pos)
    }
}
