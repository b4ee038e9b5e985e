//! The lexer handle a host passes into the external scanner.
//!
//! In tree-sitter this is `TSLexer`: a cursor owned by the runtime, with a
//! lookahead code point, an advance callback, and a slot for the matched
//! token. Scanners are generic over [`Lexer`] so the same scanning code runs
//! against the C runtime (through `isograph_scanner_ffi`) and against
//! [`SourceLexer`](crate::SourceLexer) in tests.

use crate::symbol::ExternalToken;

/// How an advanced code point relates to the token being scanned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// The code point is part of the token's text.
    Token,
    /// The code point is insignificant filler; the token starts after it.
    Skip,
}

impl Advance {
    /// The `skip` flag tree-sitter's `advance` callback expects.
    #[inline]
    pub const fn is_skip(self) -> bool {
        matches!(self, Advance::Skip)
    }
}

/// Host-owned cursor over the input, as seen by an external scanner.
///
/// # Contract
///
/// A scanner that calls [`advance`](Self::advance) must go on to call
/// [`set_result_symbol`](Self::set_result_symbol) and report a match.
/// Consuming input and then declining leaves the host's tokenizer in an
/// inconsistent state.
pub trait Lexer {
    /// The next unconsumed code point, or `None` at end of input.
    fn lookahead(&self) -> Option<char>;

    /// Consume the lookahead code point.
    fn advance(&mut self, kind: Advance);

    /// Fix the end of the token at the current position.
    ///
    /// Without a call, the token ends wherever the cursor stops.
    fn mark_end(&mut self);

    /// Record which external token was matched.
    fn set_result_symbol(&mut self, token: ExternalToken);

    /// Code-point column of the cursor on its current line.
    fn column(&mut self) -> u32;

    /// Whether the cursor has reached end of input.
    fn is_eof(&self) -> bool;
}
