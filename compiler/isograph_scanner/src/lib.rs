//! External scanner for the Isograph tree-sitter grammar.
//!
//! The grammar-generated lexer treats `\n` as ordinary whitespace. Where the
//! grammar needs a line break to be meaningful it asks the external scanner
//! for a `NEWLINE` token instead, and [`NewlineScanner`] claims the `\n`
//! only in those positions.
//!
//! # Crate Layout
//!
//! - [`symbol`]: external token kinds and the per-call [`ValidSymbols`] set
//! - [`lexer`]: the [`Lexer`] trait the host hands to the scanner
//! - [`scanner`]: the [`ExternalScanner`] contract and [`NewlineScanner`]
//! - [`source_buffer`] / [`cursor`]: sentinel-terminated input for [`SourceLexer`]
//! - [`source_lexer`]: a reference host that drives a scanner over a string
//! - [`language`]: the static symbol and field table for the grammar
//!
//! The C ABI that tree-sitter links against lives in `isograph_scanner_ffi`.

pub mod cursor;
pub mod language;
pub mod lexer;
pub mod scanner;
pub mod source_buffer;
pub mod source_lexer;
pub mod symbol;

pub use cursor::Cursor;
pub use language::{language, FieldId, Language, SymbolId, SymbolKind};
pub use lexer::{Advance, Lexer};
pub use scanner::{ExternalScanner, NewlineScanner, SnapshotError, SERIALIZATION_BUFFER_SIZE};
pub use source_buffer::SourceBuffer;
pub use source_lexer::{ScannedToken, SourceLexer};
pub use symbol::{ExternalToken, ValidSymbols};
