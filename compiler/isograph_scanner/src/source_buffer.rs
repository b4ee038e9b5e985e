//! Sentinel-terminated source buffer.
//!
//! The buffer stores a `0x00` sentinel after the source content so a
//! [`Cursor`] can detect end of input by looking at the current byte, with
//! cache-line padding behind it so decoding a code point near the end never
//! reads past the allocation.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Owned copy of a source string, followed by a zero sentinel.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the source content (excludes sentinel and padding).
    source_len: u32,
}

impl SourceBuffer {
    /// Copy `source` into a padded, sentinel-terminated buffer.
    ///
    /// Sources longer than `u32::MAX` bytes are truncated to that length,
    /// matching the 32-bit byte offsets tree-sitter uses.
    pub fn new(source: &str) -> Self {
        let source_len = u32::try_from(source.len()).unwrap_or(u32::MAX);
        let content = &source.as_bytes()[..source_len as usize];

        // Minimum: source + 1 sentinel byte, rounded to the next cache line.
        let padded_len = (content.len() + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);
        let mut buf = vec![0u8; padded_len];
        buf[..content.len()].copy_from_slice(content);

        Self { buf, source_len }
    }

    /// The source bytes, without sentinel or padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// A [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}
