//! External token kinds and the host's acceptance set.

/// Token kinds produced by the external scanner.
///
/// Discriminants follow the order of the grammar's `externals` list; the
/// host identifies each kind by this index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ExternalToken {
    /// Opaque run of pattern text between markers.
    Text = 0,
}

impl ExternalToken {
    /// Number of external tokens declared by the grammar.
    pub const COUNT: usize = 1;

    /// Symbol id written back to the host lexer on a match.
    #[inline]
    pub const fn symbol(self) -> u16 {
        self as u16
    }

    /// Index of this token in the host's `valid_symbols` array.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Grammar name of the token.
    pub const fn name(self) -> &'static str {
        match self {
            ExternalToken::Text => "text",
        }
    }
}

const ALL_VALID: &[bool] = &[true; ExternalToken::COUNT];
const NONE_VALID: &[bool] = &[false; ExternalToken::COUNT];

/// Token kinds the host is willing to accept at the current position.
///
/// Wraps the host's `valid_symbols` flags. Indices beyond the slice are
/// treated as not accepted.
#[derive(Clone, Copy, Debug)]
pub struct ValidSymbols<'a> {
    flags: &'a [bool],
}

impl<'a> ValidSymbols<'a> {
    /// Wrap a host-provided flag array indexed by [`ExternalToken::index`].
    pub fn new(flags: &'a [bool]) -> Self {
        Self { flags }
    }

    /// Every external token is acceptable.
    pub fn all() -> ValidSymbols<'static> {
        ValidSymbols { flags: ALL_VALID }
    }

    /// No external token is acceptable.
    pub fn none() -> ValidSymbols<'static> {
        ValidSymbols { flags: NONE_VALID }
    }

    /// Returns `true` if the host accepts `token` here.
    #[inline]
    pub fn contains(self, token: ExternalToken) -> bool {
        self.flags.get(token.index()).copied().unwrap_or(false)
    }
}
