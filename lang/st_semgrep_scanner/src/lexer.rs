//! Host lexer abstraction.
//!
//! Mirrors the operations tree-sitter hands to an external scanner: read the
//! lookahead code point, advance, mark the end of the current token, and test
//! for end of input. Positions are owned by the host; the scanner never sees
//! them except through [`Lexer::position`] for diagnostics.

/// Returns `true` if `c` may begin one of the three markers the free-text
/// scanner stops in front of (`<...`, `...`, `$X`).
#[inline]
pub fn is_marker_start(c: char) -> bool {
    matches!(c, '<' | '.' | '$')
}

/// Character stream supplied by the host for a single scan call.
///
/// # Contract
///
/// - [`lookahead()`](Self::lookahead) returns `'\0'` at end of input. A `'\0'`
///   before end of input is an interior NUL and is ordinary text; use
///   [`is_eof()`](Self::is_eof) to tell them apart.
/// - [`advance()`](Self::advance) at end of input is a no-op.
/// - The token reported to the host ends at the last
///   [`mark_end()`](Self::mark_end), not at the current position.
pub trait Lexer {
    /// The current lookahead code point, or `'\0'` at end of input.
    fn lookahead(&self) -> char;

    /// Consume the lookahead. `skip = true` marks it as insignificant
    /// whitespace, which moves the token start past it.
    fn advance(&mut self, skip: bool);

    /// Record the current position as the end of the token being built.
    fn mark_end(&mut self);

    /// Returns `true` once the whole input has been consumed.
    fn is_eof(&self) -> bool;

    /// Consume the lookahead and every following code point that cannot
    /// start a marker.
    ///
    /// The default walks one code point at a time. Hosts with random access
    /// to their input should override it with a bulk search.
    fn eat_text(&mut self) {
        self.advance(false);
        while !self.is_eof() && !is_marker_start(self.lookahead()) {
            self.advance(false);
        }
    }

    /// Current byte offset, if the host exposes one. Only used for tracing.
    fn position(&self) -> Option<u32> {
        None
    }
}
