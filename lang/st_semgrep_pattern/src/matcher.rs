//! Structural matching of a [`MatchPattern`] against a syntax tree.
//!
//! The tree is walked through a [`Traverse`] cursor in pre-order. Each
//! pattern token consumes one position of the walk:
//!
//! - [`MatchToken::Leaf`] descends to the leftmost leaf of the current subtree
//!   and compares its text.
//! - [`MatchToken::Subtree`] consumes the whole current subtree.
//! - [`MatchToken::Siblings`] consumes the current subtree's siblings, none
//!   first, then one more on each retry.
//!
//! # Backtracking
//!
//! Every wildcard records a checkpoint of the pattern position and the cursor.
//! On a mismatch the newest checkpoint is retried: a `Siblings` run grows by
//! one sibling, and any wildcard is retried one level down, at the first child
//! of the subtree it had consumed. Matching fails once no checkpoint is left.

use tracing::trace;

use crate::{MatchPattern, MatchToken};

/// Cursor over a syntax tree, in the style of `tree_sitter::TreeCursor`.
///
/// The cursor is confined to the subtree it was created on: `goto_parent`
/// returns `false` at that root. Cloning snapshots the cursor for
/// backtracking.
pub trait Traverse: Clone {
    /// What a leaf compares against [`MatchToken::Leaf`] text.
    type Leaf;

    /// Leaf value of the node under the cursor.
    fn leaf(&self) -> Self::Leaf;

    #[must_use]
    fn goto_first_child(&mut self) -> bool;
    #[must_use]
    fn goto_next_sibling(&mut self) -> bool;
    #[must_use]
    fn goto_parent(&mut self) -> bool;

    /// Descend to the leftmost leaf and return it.
    fn move_first_leaf(&mut self) -> Self::Leaf {
        while self.goto_first_child() {}
        self.leaf()
    }

    #[must_use]
    fn move_first_child(&mut self) -> bool {
        self.goto_first_child()
    }

    /// Move to the next subtree in pre-order after the current one, climbing
    /// out of exhausted parents.
    #[must_use]
    fn move_next_subtree(&mut self) -> bool {
        while !self.goto_next_sibling() {
            if !self.goto_parent() {
                return false;
            }
        }
        true
    }

    #[must_use]
    fn move_next_sibling(&mut self) -> bool {
        self.goto_next_sibling()
    }
}

/// How a checkpoint is retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Retry {
    /// Retry the wildcard at the first child of the subtree it consumed.
    Descend,
    /// Let the `Siblings` run take one more sibling.
    Extend,
}

struct Checkpoint<'p, 'src, C> {
    tokens: std::slice::Iter<'p, MatchToken<'src>>,
    cursor: C,
    /// The cursor's subtree has not been consumed yet.
    fresh: bool,
    retry: Retry,
}

/// Match `pattern` starting at the subtree under `cursor`.
///
/// Returns the cursor at the last consumed subtree on success. The pattern
/// only has to match a prefix of the walk; subtrees after the returned cursor
/// are not inspected.
pub fn match_at<'src, C>(pattern: &MatchPattern<'src>, mut cursor: C) -> Option<C>
where
    C: Traverse,
    &'src str: PartialEq<C::Leaf>,
{
    let mut tokens = pattern.as_slice().iter();
    let mut fresh = true;
    let mut checkpoints: Vec<Checkpoint<'_, 'src, C>> = Vec::new();

    loop {
        // Consume tokens until the pattern ends or a token fails.
        loop {
            let before = tokens.clone();
            let Some(token) = tokens.next() else {
                trace!(checkpoints = checkpoints.len(), "structural match");
                return Some(cursor);
            };
            if !(std::mem::take(&mut fresh) || cursor.move_next_subtree()) {
                break;
            }

            match *token {
                MatchToken::Siblings => {
                    checkpoints.push(Checkpoint {
                        tokens: before,
                        cursor: cursor.clone(),
                        fresh,
                        retry: Retry::Descend,
                    });
                    fresh = true;
                    checkpoints.push(Checkpoint {
                        tokens: tokens.clone(),
                        cursor: cursor.clone(),
                        fresh,
                        retry: Retry::Extend,
                    });
                }
                MatchToken::Subtree => {
                    checkpoints.push(Checkpoint {
                        tokens: before,
                        cursor: cursor.clone(),
                        fresh,
                        retry: Retry::Descend,
                    });
                }
                MatchToken::Leaf(text) => {
                    if text != cursor.move_first_leaf() {
                        break;
                    }
                }
            }
        }

        // Resume from the newest checkpoint that still has an alternative.
        loop {
            let checkpoint = checkpoints.pop()?;
            tokens = checkpoint.tokens;
            cursor = checkpoint.cursor;
            fresh = checkpoint.fresh;

            match checkpoint.retry {
                Retry::Extend => {
                    if std::mem::take(&mut fresh) || cursor.move_next_sibling() {
                        checkpoints.push(Checkpoint {
                            tokens: tokens.clone(),
                            cursor: cursor.clone(),
                            fresh,
                            retry: Retry::Extend,
                        });
                        break;
                    }
                }
                Retry::Descend => {
                    debug_assert!(!fresh, "descend retry on an unconsumed subtree");
                    if cursor.move_first_child() {
                        fresh = true;
                        break;
                    }
                }
            }
        }
    }
}
