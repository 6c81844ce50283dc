//! Free-text scanner.
//!
//! Consumes the longest run of pattern text that does not run into a marker
//! and reports it as a single [`ExternalToken::Text`]. Markers are left for the
//! grammar's declarative rules:
//!
//! | Marker | Starts with | Stops when |
//! |---|---|---|
//! | ellipsis | `.` | three dots in a row |
//! | deep ellipsis | `<` | `<` followed by three dots |
//! | metavariable | `$` | `$` followed by `A-Z`, `0-9` or `_` |
//!
//! # Design
//!
//! Lookahead is a small state machine over [`State`]. Every transition looks
//! at exactly one code point and either shifts it into a tentative marker,
//! commits what was consumed as text, or recognizes a complete marker. A
//! failed tentative marker is never rewound: the consumed characters simply
//! become part of the text token. The boundary reported to the host is always
//! the last [`Lexer::mark_end`] call, which is never past a marker's first
//! character.

use tracing::trace;

use crate::lexer::Lexer;
use crate::symbol::{ExternalToken, ValidSymbols};

/// Returns `true` for characters that may follow `$` in a metavariable name.
#[inline]
pub fn is_hole_name(c: char) -> bool {
    matches!(c, 'A'..='Z' | '0'..='9' | '_')
}

/// Lookahead state between two host calls to `advance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Nothing tentative consumed; the last boundary is at the cursor.
    Ordinary,
    /// Consumed `<`.
    SawAngle,
    /// Consumed `.` or `<.`.
    SawDot1,
    /// Consumed `..` or `<..`.
    SawDot2,
    /// Consumed `$`.
    SawDollar,
}

/// Marker recognized in front of the lookahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    Ellipsis,
    DeepEllipsis,
    Metavar,
}

impl Marker {
    fn as_str(self) -> &'static str {
        match self {
            Marker::Ellipsis => "...",
            Marker::DeepEllipsis => "<...",
            Marker::Metavar => "$",
        }
    }
}

/// Outcome of one transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    /// Consume the lookahead and keep looking.
    Shift(State),
    /// Lookahead is plain text: consume it and its plain successors, then commit.
    Text,
    /// Lookahead ends a failed tentative marker: commit without consuming it.
    Commit,
    /// A marker starts at the last boundary.
    Stop(Marker),
}

/// Transition function of the lookahead state machine.
///
/// In `SawDot1` the deep and plain ellipsis share a state; which marker
/// is reported is decided by the caller remembering whether `<` came first.
fn step(state: State, c: char) -> Step {
    match (state, c) {
        (State::Ordinary, '<') => Step::Shift(State::SawAngle),
        (State::Ordinary | State::SawAngle, '.') => Step::Shift(State::SawDot1),
        (State::Ordinary, '$') => Step::Shift(State::SawDollar),
        (State::Ordinary, _) => Step::Text,
        (State::SawDot1, '.') => Step::Shift(State::SawDot2),
        (State::SawDot2, '.') => Step::Stop(Marker::Ellipsis),
        (State::SawDollar, c) if is_hole_name(c) => Step::Stop(Marker::Metavar),
        (State::SawAngle | State::SawDot1 | State::SawDot2 | State::SawDollar, _) => {
            Step::Commit
        }
    }
}

/// Scan one free-text token.
///
/// Returns `Some(ExternalToken::Text)` when at least one character was
/// committed as text; the token ends at the host's last marked boundary.
/// Returns `None` without touching the lexer when the host does not accept
/// text here, and `None` after partial consumption when the very first
/// character begins a marker or the input is empty. The host is expected to
/// reset its lexer on `None`, as tree-sitter does.
pub fn scan<L: Lexer + ?Sized>(lexer: &mut L, valid: ValidSymbols<'_>) -> Option<ExternalToken> {
    if !valid.contains(ExternalToken::Text) {
        return None;
    }

    let mut state = State::Ordinary;
    let mut deep = false;
    let mut found = false;

    loop {
        if state == State::Ordinary && lexer.is_eof() {
            break;
        }
        match step(state, lexer.lookahead()) {
            Step::Shift(next) => {
                deep |= next == State::SawAngle;
                lexer.advance(false);
                state = next;
            }
            Step::Text => {
                lexer.eat_text();
                lexer.mark_end();
                found = true;
            }
            Step::Commit => {
                lexer.mark_end();
                found = true;
                deep = false;
                state = State::Ordinary;
            }
            Step::Stop(marker) => {
                let marker = if deep && marker == Marker::Ellipsis {
                    Marker::DeepEllipsis
                } else {
                    marker
                };
                trace!(
                    marker = marker.as_str(),
                    pos = ?lexer.position(),
                    found,
                    "free text stops before marker"
                );
                break;
            }
        }
    }

    if found {
        Some(ExternalToken::Text)
    } else {
        trace!(pos = ?lexer.position(), "no free text here");
        None
    }
}

/// Stateless external scanner.
///
/// The host's plugin protocol creates, serializes, restores and destroys a
/// scanner per parser. This one carries no state, so every hook is trivial
/// and the serialized form is always empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FreeTextScanner;

impl FreeTextScanner {
    /// Bytes written by [`serialize`](Self::serialize).
    pub const SERIALIZED_LEN: usize = 0;

    pub fn new() -> Self {
        Self
    }

    /// See [`scan`].
    #[inline]
    pub fn scan<L: Lexer + ?Sized>(
        &mut self,
        lexer: &mut L,
        valid: ValidSymbols<'_>,
    ) -> Option<ExternalToken> {
        scan(lexer, valid)
    }

    /// Write the scanner state into `buffer`, returning the bytes written.
    pub fn serialize(&self, _buffer: &mut [u8]) -> usize {
        Self::SERIALIZED_LEN
    }

    /// Restore state written by [`serialize`](Self::serialize). An empty
    /// buffer resets to the initial state, which is the only state.
    pub fn deserialize(&mut self, _buffer: &[u8]) {}
}

#[cfg(test)]
#[allow(clippy::expect_used, reason = "test sources are known to fit in u32")]
mod tests;
