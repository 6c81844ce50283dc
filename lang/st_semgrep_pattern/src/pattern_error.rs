//! Pattern tokenizer errors.

/// Why a pattern could not be tokenized.
///
/// Positions are byte offsets into the pattern source.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// The pattern contains no tokens; the grammar requires at least one.
    #[error("empty pattern")]
    Empty,
    /// A `<...` deep-expression marker. The grammar does not enable the
    /// deep rule, so nothing can consume it.
    #[error("deep expression `<...` at byte {pos} is not supported")]
    UnsupportedDeep { pos: u32 },
}
