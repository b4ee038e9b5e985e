//! C ABI for the Isograph external scanner (`libisograph_scanner_ffi`).
//!
//! tree-sitter's generated `parser.c` declares five functions named after the
//! grammar and calls them during lexing. This crate defines them and forwards
//! each one to [`NewlineScanner`].
//!
//! # Entry Points
//!
//! - `tree_sitter_isograph_external_scanner_create`
//! - `tree_sitter_isograph_external_scanner_destroy`
//! - `tree_sitter_isograph_external_scanner_scan`
//! - `tree_sitter_isograph_external_scanner_serialize`
//! - `tree_sitter_isograph_external_scanner_deserialize`
//! - `isograph_scanner_init_tracing` (opt-in log output)
//!
//! # Safety
//!
//! All functions use `#[no_mangle]` and `extern "C"`. Pointers come from the
//! tree-sitter runtime, which only passes a payload returned by `create`, a
//! live `TSLexer`, a valid-symbols array with one entry per external token,
//! and a serialization buffer of `SERIALIZATION_BUFFER_SIZE` bytes. They are
//! not marked `unsafe` because they're FFI entry points, not Rust API
//! functions. Null pointers are tolerated and treated as "nothing to do".

#![warn(clippy::allow_attributes_without_reason)]
#![allow(
    unsafe_code,
    reason = "C-ABI scanner callbacks require unsafe for raw pointer operations"
)]
#![allow(
    clippy::not_unsafe_ptr_arg_deref,
    reason = "FFI entry points receive pointers from the tree-sitter runtime which guarantees validity"
)]

mod host_lexer;

use std::ffi::{c_char, c_void};
use std::ptr::NonNull;
use std::sync::Once;

use isograph_scanner::{
    ExternalScanner, ExternalToken, NewlineScanner, ValidSymbols, SERIALIZATION_BUFFER_SIZE,
};
use tracing::{debug, warn};

use crate::host_lexer::HostLexer;
pub use crate::host_lexer::TSLexer;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Opt-in: the scanner entry points never call this, so a host process keeps
/// control of its global subscriber. Safe to call multiple times. Enable with
/// `RUST_LOG=isograph_scanner=trace`. Does nothing when `RUST_LOG` is unset,
/// or when the host process has already installed a subscriber.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .try_init();
        }
    });
}

/// [`init_tracing`] for C hosts.
#[no_mangle]
pub extern "C" fn isograph_scanner_init_tracing() {
    init_tracing();
}

/// Allocate a scanner for a new parse session.
///
/// [`NewlineScanner`] is zero-sized, so the returned pointer is a dangling,
/// well-aligned box pointer and nothing is allocated.
#[no_mangle]
pub extern "C" fn tree_sitter_isograph_external_scanner_create() -> *mut c_void {
    debug!("creating isograph external scanner");
    Box::into_raw(Box::new(NewlineScanner::new())).cast()
}

/// Release a scanner returned by `create`.
#[no_mangle]
pub extern "C" fn tree_sitter_isograph_external_scanner_destroy(payload: *mut c_void) {
    if payload.is_null() {
        return;
    }
    debug!("destroying isograph external scanner");
    // SAFETY: payload was returned by `create` and is destroyed exactly once.
    drop(unsafe { Box::from_raw(payload.cast::<NewlineScanner>()) });
}

/// Try to recognize an external token at the lexer's position.
#[no_mangle]
pub extern "C" fn tree_sitter_isograph_external_scanner_scan(
    payload: *mut c_void,
    lexer: *mut TSLexer,
    valid_symbols: *const bool,
) -> bool {
    let Some(lexer) = NonNull::new(lexer) else {
        return false;
    };
    if payload.is_null() || valid_symbols.is_null() {
        return false;
    }

    // SAFETY: payload was returned by `create`; the runtime does not call
    // into one scanner instance concurrently.
    let scanner = unsafe { &mut *payload.cast::<NewlineScanner>() };
    // SAFETY: the runtime passes one flag per entry of the grammar's
    // `externals` array.
    let flags = unsafe { std::slice::from_raw_parts(valid_symbols, ExternalToken::COUNT) };
    // SAFETY: the runtime owns the TSLexer and keeps it alive for this call.
    let mut host = unsafe { HostLexer::new(lexer) };

    scanner.scan(&mut host, ValidSymbols::from_flags(flags))
}

/// Snapshot the scanner into the runtime's buffer. Returns the byte count.
#[no_mangle]
pub extern "C" fn tree_sitter_isograph_external_scanner_serialize(
    payload: *mut c_void,
    buffer: *mut c_char,
) -> u32 {
    if payload.is_null() || buffer.is_null() {
        return 0;
    }

    // SAFETY: payload was returned by `create`.
    let scanner = unsafe { &*payload.cast::<NewlineScanner>() };
    // SAFETY: the runtime's serialization buffer is
    // SERIALIZATION_BUFFER_SIZE bytes.
    let buffer =
        unsafe { std::slice::from_raw_parts_mut(buffer.cast::<u8>(), SERIALIZATION_BUFFER_SIZE) };

    let len = scanner.serialize(buffer).min(SERIALIZATION_BUFFER_SIZE);
    u32::try_from(len).unwrap_or(0)
}

/// Restore a snapshot written by `serialize`. Length 0 resets the scanner.
#[no_mangle]
pub extern "C" fn tree_sitter_isograph_external_scanner_deserialize(
    payload: *mut c_void,
    buffer: *const c_char,
    length: u32,
) {
    if payload.is_null() {
        return;
    }

    // SAFETY: payload was returned by `create`.
    let scanner = unsafe { &mut *payload.cast::<NewlineScanner>() };
    let bytes: &[u8] = if length == 0 {
        &[]
    } else if buffer.is_null() {
        warn!(length, "scanner snapshot has a length but no buffer, ignoring");
        return;
    } else {
        // SAFETY: the runtime passes `length` bytes previously produced by
        // `serialize`.
        unsafe { std::slice::from_raw_parts(buffer.cast::<u8>(), length as usize) }
    };

    if let Err(err) = scanner.deserialize(bytes) {
        warn!(%err, "ignoring scanner snapshot");
    }
}

#[cfg(test)]
mod tests;
