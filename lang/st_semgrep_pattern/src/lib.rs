//! Tokenizer and structural matcher for semgrep-style search patterns.
//!
//! A pattern is a sequence of three kinds of token:
//!
//! ```text
//! pattern  := (ellipsis | metavar | text)+
//! ellipsis := '...'
//! metavar  := '$' [A-Z0-9_]+
//! text     := <free-text scanner>
//! ```
//!
//! [`tokenize`] drives the free-text scanner from `st_semgrep_scanner` the way
//! the tree-sitter runtime does: the scanner is offered every position first,
//! and the declarative `ellipsis`/`metavar` rules only run where it reports no
//! match.
//!
//! [`Pattern::to_match_pattern`] turns the tokens into a [`MatchPattern`] and
//! [`match_at`] searches for it in a syntax tree through a [`Traverse`]
//! cursor.
//!
//! ```
//! use st_semgrep_pattern::{tokenize, PatternKind};
//!
//! let pattern = tokenize("foo(..., $X)").unwrap();
//! let kinds: Vec<_> = pattern.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [PatternKind::Text, PatternKind::Ellipsis, PatternKind::Text, PatternKind::Metavar, PatternKind::Text],
//! );
//! ```

mod matcher;
mod pattern;
mod pattern_error;
mod span;
mod token;
mod tokenize;

pub use matcher::{match_at, Traverse};
pub use pattern::{MatchPattern, MatchToken, Pattern};
pub use pattern_error::PatternError;
pub use span::Span;
pub use token::{PatternKind, PatternToken};
pub use tokenize::tokenize;
