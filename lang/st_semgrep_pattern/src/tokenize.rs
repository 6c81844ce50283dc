//! Pattern tokenizer.
//!
//! At every position the free-text scanner runs first with `text` accepted.
//! Where it reports no match, the token must be one of the grammar's
//! declarative rules, tried on a fresh cursor since the scanner's tentative
//! lookahead is discarded on no match.

use st_semgrep_scanner::{is_hole_name, FreeTextScanner, SourceBuffer, ValidSymbols};
use tracing::{debug, trace};

use crate::{Pattern, PatternError, PatternKind, PatternToken, Span};

const ELLIPSIS: &[u8] = b"...";
const DEEP_ELLIPSIS: &[u8] = b"<...";

/// Split `source` into text, ellipsis and metavariable tokens.
///
/// Token spans cover the source exactly, without gaps or overlaps.
pub fn tokenize(source: &str) -> Result<Pattern<'_>, PatternError> {
    let buf = SourceBuffer::new(source);
    let mut scanner = FreeTextScanner::new();
    let mut tokens = Vec::new();

    let mut pos = 0;
    while pos < buf.len() {
        let token = next_token(&buf, &mut scanner, pos)?;
        trace!(
            kind = token.kind.name(),
            start = token.span.start,
            end = token.span.end,
            "pattern token"
        );
        pos = token.span.end;
        tokens.push(token);
    }

    if tokens.is_empty() {
        return Err(PatternError::Empty);
    }
    debug!(count = tokens.len(), len = buf.len(), "tokenized pattern");
    Ok(Pattern::new(source, tokens))
}

/// Produce the token starting at `pos`. Always advances past `pos`.
fn next_token(
    buf: &SourceBuffer,
    scanner: &mut FreeTextScanner,
    pos: u32,
) -> Result<PatternToken, PatternError> {
    let mut cursor = buf.cursor_at(pos);
    if scanner.scan(&mut cursor, ValidSymbols::all()).is_some() {
        return Ok(PatternToken::new(
            PatternKind::Text,
            Span::new(pos, cursor.marked_end()),
        ));
    }

    let rest = &buf.as_bytes()[pos as usize..];
    if rest.starts_with(ELLIPSIS) {
        return Ok(token_at(PatternKind::Ellipsis, pos, ELLIPSIS.len()));
    }
    if let Some(name) = rest.strip_prefix(b"$") {
        let name_len = name
            .iter()
            .take_while(|&&b| is_hole_name(char::from(b)))
            .count();
        if name_len > 0 {
            return Ok(token_at(PatternKind::Metavar, pos, 1 + name_len));
        }
    }

    // The scanner only declines at `...`, `$NAME` and `<...`; the first two
    // are handled above.
    debug_assert!(
        rest.starts_with(DEEP_ELLIPSIS),
        "scanner declined at byte {pos} without a marker"
    );
    Err(PatternError::UnsupportedDeep { pos })
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "len is bounded by the source length which fits in u32"
)]
fn token_at(kind: PatternKind, pos: u32, len: usize) -> PatternToken {
    PatternToken::new(kind, Span::new(pos, pos + len as u32))
}
