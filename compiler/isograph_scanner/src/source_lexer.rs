//! Reference host lexer over a [`SourceBuffer`].
//!
//! [`SourceLexer`] implements [`Lexer`] the way tree-sitter's runtime does:
//! skipped code points move the token start, `mark_end` pins the token end,
//! and a scanner that declines has its position rolled back. It lets the
//! scanner be driven from plain strings, without linking the C runtime.

use tracing::{error, trace};

use crate::cursor::Cursor;
use crate::lexer::{Advance, Lexer};
use crate::scanner::ExternalScanner;
use crate::source_buffer::SourceBuffer;
use crate::symbol::{ExternalToken, ValidSymbols};

/// A token an external scanner reported, with its byte range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScannedToken {
    pub token: ExternalToken,
    /// Byte offset of the first significant code point.
    pub start: u32,
    /// Byte offset one past the token's last code point.
    pub end: u32,
}

impl ScannedToken {
    /// Length of the token in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` for a zero-width token.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The token's text in `source`.
    pub fn text<'a>(&self, source: &'a SourceBuffer) -> Option<&'a str> {
        source.cursor().slice(self.start, self.end)
    }
}

/// Host-side lexer state for one pass over a source buffer.
#[derive(Clone, Debug)]
pub struct SourceLexer<'a> {
    cursor: Cursor<'a>,
    token_start: u32,
    token_end: Option<u32>,
    result_symbol: Option<ExternalToken>,
    /// Set by a token advance; skips do not count.
    consumed_token_text: bool,
}

impl<'a> SourceLexer<'a> {
    pub fn new(source: &'a SourceBuffer) -> Self {
        Self {
            cursor: source.cursor(),
            token_start: 0,
            token_end: None,
            result_symbol: None,
            consumed_token_text: false,
        }
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Byte offset where the token being scanned starts.
    pub fn token_start(&self) -> u32 {
        self.token_start
    }

    /// The end recorded by [`Lexer::mark_end`], if any.
    pub fn token_end(&self) -> Option<u32> {
        self.token_end
    }

    /// The token recorded by [`Lexer::set_result_symbol`], if any.
    pub fn result_symbol(&self) -> Option<ExternalToken> {
        self.result_symbol
    }

    /// Start a new token at the cursor, forgetting any previous result.
    pub fn begin_token(&mut self) {
        self.token_start = self.cursor.pos();
        self.token_end = None;
        self.result_symbol = None;
        self.consumed_token_text = false;
    }

    /// Give `scanner` a chance to recognize a token here.
    ///
    /// On a match, returns the token and leaves the cursor at its end. When the
    /// scanner declines, the cursor is rolled back to where it was. Skipping
    /// before declining is allowed; consuming token text is not.
    pub fn scan_external<S>(
        &mut self,
        scanner: &mut S,
        valid_symbols: ValidSymbols,
    ) -> Option<ScannedToken>
    where
        S: ExternalScanner,
    {
        let saved = self.cursor;
        self.begin_token();

        if !scanner.scan(self, valid_symbols) {
            debug_assert!(
                !self.consumed_token_text,
                "scanner consumed input and then declined"
            );
            self.rewind(saved);
            return None;
        }

        let Some(token) = self.result_symbol else {
            error!("scanner matched without recording a token");
            self.rewind(saved);
            return None;
        };
        // Code points looked at past the marked end are not part of the token.
        let end = self.token_end.unwrap_or_else(|| self.cursor.pos());
        // Skips after `mark_end` would otherwise put the start past the end.
        if end < self.token_start {
            self.token_start = end;
        }
        self.cursor.set_pos(end);
        trace!(?token, start = self.token_start, end, "external token");
        Some(ScannedToken {
            token,
            start: self.token_start,
            end,
        })
    }

    fn rewind(&mut self, saved: Cursor<'a>) {
        self.cursor = saved;
        self.begin_token();
    }
}

impl Lexer for SourceLexer<'_> {
    fn lookahead(&self) -> Option<char> {
        self.cursor.current_char()
    }

    fn advance(&mut self, kind: Advance) {
        self.cursor.advance_char();
        if kind.is_skip() {
            self.token_start = self.cursor.pos();
        } else {
            self.consumed_token_text = true;
        }
    }

    fn mark_end(&mut self) {
        self.token_end = Some(self.cursor.pos());
    }

    fn set_result_symbol(&mut self, token: ExternalToken) {
        self.result_symbol = Some(token);
    }

    fn column(&mut self) -> u32 {
        self.cursor.column()
    }

    fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }
}
