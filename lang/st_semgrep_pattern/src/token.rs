//! Pattern token types.

use crate::Span;

/// Kind of a pattern token, in the grammar's rule vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Free text between markers, recognized by the external scanner.
    Text,
    /// `...`: matches any sequence of siblings.
    Ellipsis,
    /// `$NAME`: matches any single subtree.
    Metavar,
}

impl PatternKind {
    /// Grammar rule name.
    pub const fn name(self) -> &'static str {
        match self {
            PatternKind::Text => "text",
            PatternKind::Ellipsis => "ellipsis",
            PatternKind::Metavar => "metavar",
        }
    }
}

/// A token with its location in the pattern source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PatternToken {
    pub kind: PatternKind,
    pub span: Span,
}

impl PatternToken {
    #[inline]
    pub const fn new(kind: PatternKind, span: Span) -> Self {
        PatternToken { kind, span }
    }
}
