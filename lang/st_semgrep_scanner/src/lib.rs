//! Free-text external scanner for the `semgrep` pattern grammar.
//!
//! The grammar recognizes ellipses (`...`) and metavariables (`$X`) with
//! ordinary declarative rules, but everything in between is one opaque
//! `text` token whose end depends on irregular lookahead. This crate decides
//! where that token ends.
//!
//! The scanner is host-agnostic: it talks to the host through the [`Lexer`]
//! trait. [`SourceCursor`] is a Rust-native host over a sentinel-terminated
//! [`SourceBuffer`]; the tree-sitter C ABI adapter lives in `st_semgrep_ffi`.
//!
//! ```
//! use st_semgrep_scanner::{scan, ExternalToken, SourceBuffer, ValidSymbols};
//!
//! let buf = SourceBuffer::new("foo(..., $X)");
//! let mut cursor = buf.cursor();
//! assert_eq!(scan(&mut cursor, ValidSymbols::all()), Some(ExternalToken::Text));
//! assert_eq!(cursor.token_text(), "foo(");
//! ```

mod cursor;
mod lexer;
mod scanner;
mod source_buffer;
mod symbol;

pub use cursor::SourceCursor;
pub use lexer::{is_marker_start, Lexer};
pub use scanner::{is_hole_name, scan, FreeTextScanner};
pub use source_buffer::SourceBuffer;
pub use symbol::{ExternalToken, ValidSymbols};
