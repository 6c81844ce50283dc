//! tree-sitter external scanner for the `semgrep` pattern grammar.
//!
//! Exports the five C-ABI hooks tree-sitter looks up for a grammar named
//! `semgrep` with one external token (`text`). Link the `staticlib` next to
//! the grammar's generated `parser.c`.
//!
//! # Hooks
//!
//! - `tree_sitter_semgrep_external_scanner_create`: returns a null payload
//! - `tree_sitter_semgrep_external_scanner_destroy`: no-op
//! - `tree_sitter_semgrep_external_scanner_serialize`: writes 0 bytes
//! - `tree_sitter_semgrep_external_scanner_deserialize`: no-op
//! - `tree_sitter_semgrep_external_scanner_scan`: runs [`FreeTextScanner`]
//!
//! # Safety
//!
//! All hooks use `#[no_mangle]` and `extern "C"`. Pointers come from the
//! tree-sitter runtime, which guarantees a live `TSLexer` and one
//! `valid_symbols` flag per external token. They're not marked `unsafe`
//! because they're FFI entry points, not Rust API functions. Null pointers
//! are tolerated and treated as "no match".

#![warn(clippy::allow_attributes_without_reason)]
#![allow(
    unsafe_code,
    reason = "C-ABI scanner hooks require unsafe for raw pointer operations"
)]
#![allow(
    clippy::not_unsafe_ptr_arg_deref,
    reason = "FFI entry points receive pointers from the tree-sitter runtime which guarantees validity"
)]

mod ts_lexer;

use std::ffi::{c_char, c_uint, c_void};
use std::ptr::NonNull;
use std::sync::Once;

use st_semgrep_scanner::{ExternalToken, FreeTextScanner, ValidSymbols};
use tracing::debug;

use crate::ts_lexer::HostLexer;
pub use crate::ts_lexer::{TSLexer, TSSymbol};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with
/// `RUST_LOG=st_semgrep_scanner=trace`. A subscriber already installed by the
/// host process is left in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

/// Create the scanner payload.
///
/// The scanner is stateless, so the payload is null.
#[no_mangle]
pub extern "C" fn tree_sitter_semgrep_external_scanner_create() -> *mut c_void {
    init_tracing();
    debug!(
        externals = ExternalToken::COUNT,
        "semgrep external scanner created"
    );
    std::ptr::null_mut()
}

/// Destroy a payload returned by `create`. Nothing to free.
#[no_mangle]
pub extern "C" fn tree_sitter_semgrep_external_scanner_destroy(_payload: *mut c_void) {}

/// Serialize the scanner state into `buffer`, returning the bytes written.
#[no_mangle]
pub extern "C" fn tree_sitter_semgrep_external_scanner_serialize(
    _payload: *mut c_void,
    _buffer: *mut c_char,
) -> c_uint {
    let written = FreeTextScanner::new().serialize(&mut []);
    c_uint::try_from(written).unwrap_or(0)
}

/// Restore scanner state from `length` bytes at `buffer`.
#[no_mangle]
pub extern "C" fn tree_sitter_semgrep_external_scanner_deserialize(
    _payload: *mut c_void,
    buffer: *const c_char,
    length: c_uint,
) {
    let state: &[u8] = if buffer.is_null() || length == 0 {
        &[]
    } else {
        // SAFETY: the runtime passes a buffer of `length` bytes written by
        // `serialize`.
        unsafe { std::slice::from_raw_parts(buffer.cast::<u8>(), length as usize) }
    };
    FreeTextScanner::new().deserialize(state);
}

/// Scan for an external token at the lexer's position.
///
/// On a match, writes the token's symbol to `result_symbol` and returns
/// `true`; the token ends at the lexer's last `mark_end`.
#[no_mangle]
pub extern "C" fn tree_sitter_semgrep_external_scanner_scan(
    _payload: *mut c_void,
    lexer: *mut TSLexer,
    valid_symbols: *const bool,
) -> bool {
    let Some(raw) = NonNull::new(lexer) else {
        return false;
    };
    if valid_symbols.is_null() {
        return false;
    }

    // SAFETY: the runtime passes one flag per external token.
    let flags = unsafe { std::slice::from_raw_parts(valid_symbols, ExternalToken::COUNT) };
    // SAFETY: the runtime keeps the lexer alive for the duration of the call.
    let mut host = unsafe { HostLexer::new(raw) };

    match FreeTextScanner::new().scan(&mut host, ValidSymbols::new(flags)) {
        Some(token) => {
            host.set_result_symbol(token.symbol());
            true
        }
        None => false,
    }
}
