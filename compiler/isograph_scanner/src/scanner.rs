//! The external scanner contract and the Isograph `NEWLINE` scanner.
//!
//! The host calls [`ExternalScanner::scan`] whenever an external token is a
//! legal lookahead. A scanner either consumes input and reports a token, or
//! declines without consuming anything and lets the generated lexer take over.
//!
//! Between calls the host may snapshot the scanner with
//! [`serialize`](ExternalScanner::serialize) and later restore it with
//! [`deserialize`](ExternalScanner::deserialize), for incremental re-lexing.
//! [`NewlineScanner`] carries no state, so its snapshot is always empty.

use tracing::trace;

use crate::lexer::{Advance, Lexer};
use crate::symbol::{ExternalToken, ValidSymbols};

/// Size of the buffer tree-sitter passes to `serialize`.
///
/// Matches `TREE_SITTER_SERIALIZATION_BUFFER_SIZE` in the runtime headers.
pub const SERIALIZATION_BUFFER_SIZE: usize = 1024;

/// A snapshot could not be restored into a scanner.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// The scanner is stateless but was handed a non-empty snapshot.
    #[error("scanner has no state, but snapshot holds {len} byte(s)")]
    UnexpectedState { len: usize },
    /// The snapshot is longer than any buffer the host can hand out.
    #[error("snapshot of {len} bytes exceeds the {max}-byte serialization buffer")]
    TooLarge { len: usize, max: usize },
}

/// A hand-written recognizer plugged into the host's generated lexer.
pub trait ExternalScanner {
    /// Try to recognize an external token at the lexer's position.
    ///
    /// Returns `true` after recording the token via
    /// [`Lexer::set_result_symbol`]. Returns `false` without consuming input
    /// when nothing matches.
    fn scan<L: Lexer + ?Sized>(&mut self, lexer: &mut L, valid_symbols: ValidSymbols) -> bool;

    /// Write the scanner's state into `buffer`, returning the byte count.
    ///
    /// The count never exceeds `buffer.len()` or [`SERIALIZATION_BUFFER_SIZE`].
    fn serialize(&self, buffer: &mut [u8]) -> usize;

    /// Restore state previously written by [`serialize`](Self::serialize).
    ///
    /// An empty `buffer` resets the scanner to its initial state. On error
    /// the scanner is left unchanged.
    fn deserialize(&mut self, buffer: &[u8]) -> Result<(), SnapshotError>;
}

/// Recognizes `\n` as a `NEWLINE` token where the grammar asks for one.
///
/// Everywhere else the generated lexer sees the same `\n` and skips it as
/// whitespace. Zero-sized: creating and dropping one allocates nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NewlineScanner;

impl NewlineScanner {
    /// Create a scanner for a new parse session.
    pub const fn new() -> Self {
        NewlineScanner
    }
}

impl ExternalScanner for NewlineScanner {
    fn scan<L: Lexer + ?Sized>(&mut self, lexer: &mut L, valid_symbols: ValidSymbols) -> bool {
        if !valid_symbols.contains_token(ExternalToken::Newline) {
            trace!("newline not valid here, declining");
            return false;
        }

        match lexer.lookahead() {
            Some('\n') => {
                lexer.advance(Advance::Token);
                lexer.set_result_symbol(ExternalToken::Newline);
                trace!("matched newline");
                true
            }
            Some(other) => {
                trace!(lookahead = ?other, "not a newline, declining");
                false
            }
            None => {
                trace!("end of input, declining");
                false
            }
        }
    }

    fn serialize(&self, _buffer: &mut [u8]) -> usize {
        0
    }

    fn deserialize(&mut self, buffer: &[u8]) -> Result<(), SnapshotError> {
        if buffer.len() > SERIALIZATION_BUFFER_SIZE {
            return Err(SnapshotError::TooLarge {
                len: buffer.len(),
                max: SERIALIZATION_BUFFER_SIZE,
            });
        }
        if !buffer.is_empty() {
            return Err(SnapshotError::UnexpectedState { len: buffer.len() });
        }
        Ok(())
    }
}
