//! Sentinel-terminated source buffer backing [`SourceCursor`].
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content, so
//! the cursor reads `'\0'` at end of input without special-casing EOF.

use crate::SourceCursor;

/// Owned copy of a pattern source with a trailing sentinel.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00]
///  ^                ^
///  0           source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// `[source_bytes..., 0x00 sentinel]`.
    buf: Vec<u8>,
    /// Length of the source content (excludes sentinel).
    source_len: u32,
}

impl SourceBuffer {
    /// Copy `source` into a buffer with a `0x00` sentinel.
    ///
    /// Sources longer than `u32::MAX` bytes are truncated to the first
    /// `u32::MAX` bytes of content; positions are `u32` throughout.
    pub fn new(source: &str) -> Self {
        let source_bytes = source.as_bytes();
        let source_len_u32 = u32::try_from(source_bytes.len()).unwrap_or(u32::MAX);
        let source_len = source_len_u32 as usize;

        let mut buf = Vec::with_capacity(source_len + 1);
        buf.extend_from_slice(&source_bytes[..source_len]);
        buf.push(0);

        Self {
            buf,
            source_len: source_len_u32,
        }
    }

    /// Returns the source bytes (without sentinel).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Create a [`SourceCursor`] positioned at byte 0.
    pub fn cursor(&self) -> SourceCursor<'_> {
        SourceCursor::new(&self.buf, self.source_len, 0)
    }

    /// Create a [`SourceCursor`] positioned at byte `pos`.
    ///
    /// `pos` is clamped to the source length. It should fall on a character
    /// boundary; a cursor started mid-character reads `'\0'` until it
    /// resynchronizes.
    pub fn cursor_at(&self, pos: u32) -> SourceCursor<'_> {
        SourceCursor::new(&self.buf, self.source_len, pos.min(self.source_len))
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}
