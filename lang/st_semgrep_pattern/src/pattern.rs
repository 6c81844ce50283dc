//! Tokenized patterns and their structural-matcher form.

use crate::{PatternKind, PatternToken};

/// A tokenized pattern, borrowing its source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern<'src> {
    source: &'src str,
    tokens: Vec<PatternToken>,
}

impl<'src> Pattern<'src> {
    pub(crate) fn new(source: &'src str, tokens: Vec<PatternToken>) -> Self {
        Self { source, tokens }
    }

    /// The pattern source the token spans point into.
    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn tokens(&self) -> &[PatternToken] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatternToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Source text of `token`. Returns `""` for a token from another pattern
    /// whose span does not fit this source.
    pub fn text(&self, token: &PatternToken) -> &'src str {
        self.source.get(token.span.to_range()).unwrap_or_default()
    }

    /// Convert to the structural matcher's vocabulary.
    ///
    /// Text becomes a [`MatchToken::Leaf`] with surrounding whitespace
    /// trimmed; whitespace-only text is dropped. Metavariables match one
    /// subtree and ellipses match any run of siblings.
    pub fn to_match_pattern(&self) -> MatchPattern<'src> {
        self.iter()
            .filter_map(|token| match token.kind {
                PatternKind::Text => {
                    let text = self.text(token).trim();
                    (!text.is_empty()).then_some(MatchToken::Leaf(text))
                }
                PatternKind::Metavar => Some(MatchToken::Subtree),
                PatternKind::Ellipsis => Some(MatchToken::Siblings),
            })
            .collect()
    }
}

impl<'a, 'src> IntoIterator for &'a Pattern<'src> {
    type Item = &'a PatternToken;
    type IntoIter = std::slice::Iter<'a, PatternToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One step of a structural match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchToken<'src> {
    /// Any single subtree.
    Subtree,
    /// Any run of siblings, including none.
    Siblings,
    /// A leaf with exactly this text.
    Leaf(&'src str),
}

/// Sequence of [`MatchToken`]s, matched against a tree by
/// [`match_at`](crate::match_at).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchPattern<'src> {
    sequence: Vec<MatchToken<'src>>,
}

impl<'src> MatchPattern<'src> {
    pub fn as_slice(&self) -> &[MatchToken<'src>] {
        &self.sequence
    }
}

impl<'src> FromIterator<MatchToken<'src>> for MatchPattern<'src> {
    fn from_iter<I: IntoIterator<Item = MatchToken<'src>>>(iter: I) -> Self {
        Self {
            sequence: iter.into_iter().collect(),
        }
    }
}
