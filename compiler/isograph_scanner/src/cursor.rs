//! Code-point cursor over a sentinel-terminated buffer.
//!
//! The cursor moves through the buffer one UTF-8 code point at a time, which
//! is the unit tree-sitter's `advance` works in. End of input is the sentinel
//! byte (`0x00`) at a position at or past the source length.
//!
//! # Interior Null Bytes
//!
//! A `0x00` inside the source is an ordinary code point (`'\0'`). The cursor
//! tells it apart from the sentinel by comparing `pos` against `source_len`.

/// Cursor over a [`SourceBuffer`](crate::SourceBuffer).
///
/// [`Copy`], so the host can snapshot a position before calling a scanner
/// and rewind to it if the scanner declines.
///
/// # Invariant
///
/// `buf[source_len] == 0x00` and every byte after it is `0x00`.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`), always on a code
    /// point boundary.
    pos: u32,
    /// Length of the source content (excludes sentinel and padding).
    source_len: u32,
}

impl<'a> Cursor<'a> {
    /// # Contract
    ///
    /// `buf[source_len]` must be the sentinel. Guaranteed by
    /// `SourceBuffer::new()`.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// The byte at the current position; `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// The code point at the current position, or `None` at EOF.
    ///
    /// A sequence cut short by the end of the source decodes as
    /// [`char::REPLACEMENT_CHARACTER`].
    pub fn current_char(&self) -> Option<char> {
        if self.is_eof() {
            return None;
        }
        let start = self.pos as usize;
        let end = (self.pos + self.current_width()) as usize;
        let decoded = std::str::from_utf8(&self.buf[start..end])
            .ok()
            .and_then(|s| s.chars().next());
        Some(decoded.unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    /// Move past the current code point. Does nothing at EOF.
    #[inline]
    pub fn advance_char(&mut self) {
        if !self.is_eof() {
            self.pos += self.current_width();
        }
    }

    /// Returns `true` if the cursor has reached the sentinel.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Move back to an earlier position.
    ///
    /// `pos` must be a position this cursor (or a copy of it) has visited.
    pub fn set_pos(&mut self, pos: u32) {
        debug_assert!(
            pos <= self.source_len,
            "position {pos} past source length {}",
            self.source_len
        );
        self.pos = pos.min(self.source_len);
    }

    /// Length of the source content.
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// The source text in `start..end`, or `None` if the range is out of
    /// bounds or not on code point boundaries.
    pub fn slice(&self, start: u32, end: u32) -> Option<&'a str> {
        if start > end || end > self.source_len {
            return None;
        }
        std::str::from_utf8(&self.buf[start as usize..end as usize]).ok()
    }

    /// Code points between the start of the current line and the cursor.
    ///
    /// The line starts after the nearest preceding `\n`.
    pub fn column(&self) -> u32 {
        let before = &self.buf[..self.pos as usize];
        let line_start = memchr::memrchr(b'\n', before).map_or(0, |i| i + 1);
        let count = before[line_start..]
            .iter()
            .filter(|&&b| !is_continuation_byte(b))
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    ///
    /// - `0xC0..=0xDF`: 2 bytes
    /// - `0xE0..=0xEF`: 3 bytes
    /// - `0xF0..=0xF7`: 4 bytes
    /// - Everything else (ASCII, continuation, invalid): 1 byte
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Width of the current code point, clamped to the source content.
    fn current_width(&self) -> u32 {
        Self::utf8_char_width(self.current()).min(self.source_len - self.pos)
    }
}

#[inline]
fn is_continuation_byte(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}
