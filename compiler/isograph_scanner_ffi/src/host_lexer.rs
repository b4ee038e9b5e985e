//! `TSLexer` mirror and its [`Lexer`] adapter.

use std::ptr::NonNull;

use isograph_scanner::{Advance, ExternalToken, Lexer};

/// Mirror of tree-sitter's `TSLexer`.
///
/// Field order and types follow `tree_sitter/parser.h`. Newer runtimes append
/// a variadic `log` callback after `eof`; the scanner never reads it, and the
/// struct is only ever accessed through a runtime-owned pointer, so it is
/// left out of the mirror.
#[repr(C)]
#[derive(Debug)]
pub struct TSLexer {
    /// Current code point; `0` at end of input.
    pub lookahead: i32,
    /// External token ordinal the scanner matched.
    pub result_symbol: u16,
    pub advance: extern "C" fn(*mut TSLexer, bool),
    pub mark_end: extern "C" fn(*mut TSLexer),
    pub get_column: extern "C" fn(*mut TSLexer) -> u32,
    pub is_at_included_range_start: extern "C" fn(*const TSLexer) -> bool,
    pub eof: extern "C" fn(*const TSLexer) -> bool,
}

/// [`Lexer`] over a runtime-owned `TSLexer`.
///
/// Holds the raw pointer rather than a reference: the runtime's callbacks
/// receive the same pointer and may treat it as the start of a larger struct.
pub(crate) struct HostLexer {
    raw: NonNull<TSLexer>,
}

impl HostLexer {
    /// # Safety
    ///
    /// `raw` must point to a live `TSLexer` whose callbacks accept it, and
    /// stay valid for as long as the adapter is used.
    pub(crate) unsafe fn new(raw: NonNull<TSLexer>) -> Self {
        Self { raw }
    }

    fn get(&self) -> &TSLexer {
        // SAFETY: `new` requires `raw` to point to a live TSLexer. The runtime
        // does not touch it while the scanner is running.
        unsafe { self.raw.as_ref() }
    }
}

impl Lexer for HostLexer {
    fn lookahead(&self) -> Option<char> {
        if self.is_eof() {
            return None;
        }
        let code_point = u32::try_from(self.get().lookahead).ok();
        Some(
            code_point
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER),
        )
    }

    fn advance(&mut self, kind: Advance) {
        let advance = self.get().advance;
        advance(self.raw.as_ptr(), kind.is_skip());
    }

    fn mark_end(&mut self) {
        let mark_end = self.get().mark_end;
        mark_end(self.raw.as_ptr());
    }

    fn set_result_symbol(&mut self, token: ExternalToken) {
        // SAFETY: see `get`; no other reference to the TSLexer is live here.
        unsafe {
            (*self.raw.as_ptr()).result_symbol = token.ordinal();
        }
    }

    fn column(&mut self) -> u32 {
        let get_column = self.get().get_column;
        get_column(self.raw.as_ptr())
    }

    fn is_eof(&self) -> bool {
        let eof = self.get().eof;
        eof(self.raw.as_ptr())
    }
}
