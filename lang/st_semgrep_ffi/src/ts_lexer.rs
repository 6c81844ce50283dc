//! Mirror of tree-sitter's `TSLexer` and its [`Lexer`] adapter.

use std::ffi::c_char;
use std::ptr::NonNull;

use st_semgrep_scanner::Lexer;

/// tree-sitter symbol id (`TSSymbol`).
pub type TSSymbol = u16;

/// `#[repr(C)]` mirror of `struct TSLexer` from `tree_sitter/parser.h`.
///
/// The runtime owns the struct and its callbacks; the scanner only reads
/// `lookahead`, calls `advance`, `mark_end` and `eof`, and writes
/// `result_symbol` on a match.
#[repr(C)]
pub struct TSLexer {
    /// Current code point, `0` at end of input.
    pub lookahead: i32,
    /// Symbol reported by a successful scan.
    pub result_symbol: TSSymbol,
    pub advance: unsafe extern "C" fn(*mut TSLexer, bool),
    pub mark_end: unsafe extern "C" fn(*mut TSLexer),
    pub get_column: unsafe extern "C" fn(*mut TSLexer) -> u32,
    pub is_at_included_range_start: unsafe extern "C" fn(*const TSLexer) -> bool,
    pub eof: unsafe extern "C" fn(*const TSLexer) -> bool,
    /// Debug logging hook. Only present in newer runtimes; never read.
    pub log: Option<unsafe extern "C" fn(*const TSLexer, *const c_char, ...)>,
}

/// Borrowed runtime lexer for the duration of one `scan` call.
pub(crate) struct HostLexer {
    raw: NonNull<TSLexer>,
}

impl HostLexer {
    /// # Safety
    ///
    /// `raw` must point to a live `TSLexer` whose callbacks stay valid until
    /// the adapter is dropped.
    pub(crate) unsafe fn new(raw: NonNull<TSLexer>) -> Self {
        Self { raw }
    }

    pub(crate) fn set_result_symbol(&mut self, symbol: TSSymbol) {
        // SAFETY: `raw` is live for the adapter's lifetime (see `new`).
        unsafe { self.raw.as_mut().result_symbol = symbol };
    }
}

impl Lexer for HostLexer {
    fn lookahead(&self) -> char {
        // SAFETY: `raw` is live for the adapter's lifetime (see `new`).
        let lookahead = unsafe { self.raw.as_ref().lookahead };
        u32::try_from(lookahead)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or('\0')
    }

    fn advance(&mut self, skip: bool) {
        let raw = self.raw.as_ptr();
        // SAFETY: `raw` is live and `advance` is the runtime's own callback.
        unsafe { ((*raw).advance)(raw, skip) }
    }

    fn mark_end(&mut self) {
        let raw = self.raw.as_ptr();
        // SAFETY: `raw` is live and `mark_end` is the runtime's own callback.
        unsafe { ((*raw).mark_end)(raw) }
    }

    fn is_eof(&self) -> bool {
        let raw = self.raw.as_ptr();
        // SAFETY: `raw` is live and `eof` is the runtime's own callback.
        unsafe { ((*raw).eof)(raw) }
    }
}
