use super::*;
use crate::SourceBuffer;
use pretty_assertions::assert_eq;

/// Helper: scan `source` with a [`SourceCursor`](crate::SourceCursor) and
/// return the marked end on a match.
fn scan_end(source: &str) -> Option<u32> {
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    scan(&mut cursor, ValidSymbols::all()).map(|token| {
        assert_eq!(token, ExternalToken::Text);
        cursor.marked_end()
    })
}

/// Helper: scan and return the matched text.
fn scan_text(source: &str) -> Option<String> {
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    scan(&mut cursor, ValidSymbols::all()).map(|_| cursor.token_text().to_owned())
}

/// Host lexer that only implements the required methods, so the scanner runs
/// on the default one-code-point-at-a-time `eat_text`.
struct CharLexer {
    chars: Vec<char>,
    pos: usize,
    marked: usize,
}

impl CharLexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            marked: 0,
        }
    }

    fn marked_byte_offset(&self) -> u32 {
        let bytes: usize = self.chars[..self.marked].iter().map(|c| c.len_utf8()).sum();
        u32::try_from(bytes).expect("test source fits in u32")
    }
}

impl Lexer for CharLexer {
    fn lookahead(&self) -> char {
        self.chars.get(self.pos).copied().unwrap_or('\0')
    }

    fn advance(&mut self, _skip: bool) {
        if self.pos < self.chars.len() {
            self.pos += 1;
        }
    }

    fn mark_end(&mut self) {
        self.marked = self.pos;
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }
}

fn char_scan_end(source: &str) -> Option<u32> {
    let mut lexer = CharLexer::new(source);
    scan(&mut lexer, ValidSymbols::all()).map(|_| lexer.marked_byte_offset())
}

/// Returns `true` if a marker the scanner stops in front of starts `rest`.
fn starts_with_marker(rest: &str) -> bool {
    rest.starts_with("...")
        || rest.starts_with("<...")
        || rest
            .strip_prefix('$')
            .and_then(|after| after.chars().next())
            .is_some_and(is_hole_name)
}

// === Documented examples ===

#[test]
fn lone_angle_is_text() {
    assert_eq!(scan_end("foo<bar"), Some(7));
}

#[test]
fn stops_before_deep_ellipsis() {
    assert_eq!(scan_text("foo<...bar").as_deref(), Some("foo"));
}

#[test]
fn stops_before_ellipsis() {
    assert_eq!(scan_text("abc...def").as_deref(), Some("abc"));
}

#[test]
fn stops_before_metavar() {
    assert_eq!(scan_text("x$FOO").as_deref(), Some("x"));
}

#[test]
fn lowercase_after_dollar_is_text() {
    assert_eq!(scan_end("x$foo"), Some(5));
}

#[test]
fn empty_input_is_no_match() {
    assert_eq!(scan_end(""), None);
}

// === Leading markers ===

#[test]
fn leading_marker_is_no_match() {
    for source in ["...", "....", "...x", "<...", "<...>", "$A", "$_", "$0", "$X..."] {
        assert_eq!(scan_end(source), None, "scan of {source:?}");
    }
}

// === Incomplete markers become text ===

#[test]
fn incomplete_markers_are_text() {
    let cases = [
        ("<", 1),
        ("<.", 2),
        ("<..", 3),
        ("<..x", 4),
        ("<.x", 3),
        (".", 1),
        ("..", 2),
        ("..x", 3),
        ("a.b.c", 5),
        ("$", 1),
        ("$a", 2),
        ("$ X", 3),
        ("x$", 2),
    ];
    for (source, end) in cases {
        assert_eq!(scan_end(source), Some(end), "scan of {source:?}");
    }
}

#[test]
fn failed_tentative_marker_then_real_marker() {
    // `..` followed by `$B`: the dots are committed, then `$B` stops.
    assert_eq!(scan_text("a..$B").as_deref(), Some("a.."));
    // `$` followed by `$A`: the first `$` is text.
    assert_eq!(scan_text("$$A").as_deref(), Some("$"));
    // `<` followed by `<...`: the first `<` is text.
    assert_eq!(scan_text("<<...").as_deref(), Some("<"));
    // Two dots then `<...`.
    assert_eq!(scan_text("..<...").as_deref(), Some(".."));
}

#[test]
fn ellipsis_inside_dot_run_stops_at_first_three() {
    assert_eq!(scan_text("a....").as_deref(), Some("a"));
    assert_eq!(scan_text("a.b...").as_deref(), Some("a.b"));
}

#[test]
fn boundary_stays_before_tentative_lookahead() {
    let buf = SourceBuffer::new("ab<...");
    let mut cursor = buf.cursor();
    assert_eq!(scan(&mut cursor, ValidSymbols::all()), Some(ExternalToken::Text));
    assert_eq!(cursor.marked_end(), 2);
    // `<..` was consumed while looking ahead and is not rolled back.
    assert_eq!(cursor.pos(), 5);
}

#[test]
fn multibyte_and_nul_are_text() {
    assert_eq!(scan_text("é€$X").as_deref(), Some("é€"));
    assert_eq!(scan_end("x\0y"), Some(3));
    assert_eq!(scan_end("\0"), Some(1));
}

#[test]
fn whitespace_is_text() {
    assert_eq!(scan_text("  foo(\n\t...").as_deref(), Some("  foo(\n\t"));
}

// === Acceptance set ===

#[test]
fn not_accepted_consumes_nothing() {
    let buf = SourceBuffer::new("foo");
    let mut cursor = buf.cursor();
    assert_eq!(scan(&mut cursor, ValidSymbols::none()), None);
    assert_eq!(cursor.pos(), 0);
    assert_eq!(cursor.marked_end(), 0);
}

#[test]
fn short_acceptance_array_is_not_accepted() {
    let buf = SourceBuffer::new("foo");
    let mut cursor = buf.cursor();
    assert_eq!(scan(&mut cursor, ValidSymbols::new(&[])), None);
    assert_eq!(cursor.pos(), 0);
}

// === State machine ===

#[test]
fn transitions() {
    assert_eq!(step(State::Ordinary, '<'), Step::Shift(State::SawAngle));
    assert_eq!(step(State::Ordinary, '.'), Step::Shift(State::SawDot1));
    assert_eq!(step(State::Ordinary, '$'), Step::Shift(State::SawDollar));
    assert_eq!(step(State::Ordinary, 'a'), Step::Text);
    assert_eq!(step(State::SawAngle, '.'), Step::Shift(State::SawDot1));
    assert_eq!(step(State::SawAngle, '<'), Step::Commit);
    assert_eq!(step(State::SawDot1, '.'), Step::Shift(State::SawDot2));
    assert_eq!(step(State::SawDot1, '\0'), Step::Commit);
    assert_eq!(step(State::SawDot2, '.'), Step::Stop(Marker::Ellipsis));
    assert_eq!(step(State::SawDot2, '$'), Step::Commit);
    assert_eq!(step(State::SawDollar, 'Z'), Step::Stop(Marker::Metavar));
    assert_eq!(step(State::SawDollar, '9'), Step::Stop(Marker::Metavar));
    assert_eq!(step(State::SawDollar, '_'), Step::Stop(Marker::Metavar));
    assert_eq!(step(State::SawDollar, 'z'), Step::Commit);
}

#[test]
fn hole_name_alphabet() {
    for c in ('A'..='Z').chain('0'..='9').chain(['_']) {
        assert!(is_hole_name(c), "{c:?} should be a hole-name character");
    }
    for c in ['a', 'z', '-', '$', '.', ' ', '\0', 'É'] {
        assert!(!is_hole_name(c), "{c:?} should not be a hole-name character");
    }
}

// === Lifecycle ===

#[test]
fn lifecycle_hooks_are_stateless() {
    let mut scanner = FreeTextScanner::new();
    let mut buffer = [0xAAu8; 16];
    assert_eq!(scanner.serialize(&mut buffer), 0);
    assert_eq!(buffer, [0xAAu8; 16]);
    scanner.deserialize(&buffer[..0]);
    scanner.deserialize(&buffer);
    assert_eq!(scanner, FreeTextScanner::default());

    let buf = SourceBuffer::new("ab...");
    let mut cursor = buf.cursor();
    assert_eq!(
        scanner.scan(&mut cursor, ValidSymbols::all()),
        Some(ExternalToken::Text)
    );
    assert_eq!(cursor.marked_end(), 2);
}

// === Default `eat_text` ===

#[test]
fn char_lexer_agrees_on_examples() {
    for source in ["foo<bar", "foo<...bar", "abc...def", "x$FOO", "x$foo", "", "é<..x$_"] {
        assert_eq!(char_scan_end(source), scan_end(source), "scan of {source:?}");
    }
}

// === Property tests ===

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_scan {
    use super::*;
    use proptest::prelude::*;

    fn leading_marker() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("...".to_owned()),
            Just("<...".to_owned()),
            "\\$[A-Z0-9_]",
        ]
    }

    proptest! {
        #[test]
        fn marker_free_input_is_consumed_whole(source in "[a-zA-Z0-9_ <(){}é€\n]{1,64}") {
            let len = u32::try_from(source.len()).expect("test source fits in u32");
            prop_assert_eq!(scan_end(&source), Some(len));
        }

        #[test]
        fn dots_and_dollars_without_markers_are_consumed_whole(source in "[a-z<.$ ]{1,64}") {
            prop_assume!(!source.contains("..."));
            let len = u32::try_from(source.len()).expect("test source fits in u32");
            prop_assert_eq!(scan_end(&source), Some(len));
        }

        #[test]
        fn leading_marker_never_matches(prefix in leading_marker(), suffix in "\\PC{0,32}") {
            let source = format!("{prefix}{suffix}");
            prop_assert_eq!(scan_end(&source), None);
        }

        #[test]
        fn rescanning_up_to_boundary_is_idempotent(source in "[ab<.$A_ é]{0,48}") {
            if let Some(end) = scan_end(&source) {
                prop_assert!(end > 0);
                let prefix = &source[..end as usize];
                prop_assert_eq!(scan_end(prefix), Some(end));
            }
        }

        #[test]
        fn boundary_is_end_of_input_or_marker(source in "[ab<.$A_ é]{0,48}") {
            match scan_end(&source) {
                Some(end) => {
                    let rest = &source[end as usize..];
                    prop_assert!(rest.is_empty() || starts_with_marker(rest), "rest {:?}", rest);
                }
                None => prop_assert!(source.is_empty() || starts_with_marker(&source)),
            }
        }

        #[test]
        fn default_eat_text_agrees_with_memchr(source in "[ab<.$A_ é\\x00]{0,48}") {
            prop_assert_eq!(char_scan_end(&source), scan_end(&source));
        }
    }
}
