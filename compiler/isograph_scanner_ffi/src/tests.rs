//! Tests for the C entry points, driven through a fake `TSLexer`.

use std::ffi::c_char;

use pretty_assertions::assert_eq;

use super::*;

/// Stand-in for the runtime's lexer. `base` comes first so the callbacks can
/// recover the whole struct from the `TSLexer` pointer, as the C runtime does.
#[repr(C)]
struct FakeLexer {
    base: TSLexer,
    input: Vec<char>,
    pos: usize,
    advances: Vec<bool>,
    marked_end: Option<usize>,
}

const NO_RESULT: u16 = u16::MAX;

impl FakeLexer {
    fn new(input: &str) -> Box<Self> {
        let mut lexer = Box::new(Self {
            base: TSLexer {
                lookahead: 0,
                result_symbol: NO_RESULT,
                advance: fake_advance,
                mark_end: fake_mark_end,
                get_column: fake_get_column,
                is_at_included_range_start: fake_is_at_included_range_start,
                eof: fake_eof,
            },
            input: input.chars().collect(),
            pos: 0,
            advances: Vec::new(),
            marked_end: None,
        });
        lexer.sync_lookahead();
        lexer
    }

    fn sync_lookahead(&mut self) {
        self.base.lookahead = self
            .input
            .get(self.pos)
            .map_or(0, |&c| i32::try_from(u32::from(c)).unwrap_or(0));
    }

    fn as_raw(&mut self) -> *mut TSLexer {
        std::ptr::from_mut(self).cast::<TSLexer>()
    }

    /// # Safety
    ///
    /// `raw` must come from [`FakeLexer::as_raw`].
    unsafe fn from_raw<'a>(raw: *const TSLexer) -> &'a mut FakeLexer {
        &mut *raw.cast::<FakeLexer>().cast_mut()
    }
}

extern "C" fn fake_advance(raw: *mut TSLexer, skip: bool) {
    // SAFETY: only installed on FakeLexer instances.
    let lexer = unsafe { FakeLexer::from_raw(raw) };
    if lexer.pos < lexer.input.len() {
        lexer.pos += 1;
    }
    lexer.advances.push(skip);
    lexer.sync_lookahead();
}

extern "C" fn fake_mark_end(raw: *mut TSLexer) {
    // SAFETY: only installed on FakeLexer instances.
    let lexer = unsafe { FakeLexer::from_raw(raw) };
    lexer.marked_end = Some(lexer.pos);
}

extern "C" fn fake_get_column(raw: *mut TSLexer) -> u32 {
    // SAFETY: only installed on FakeLexer instances.
    let lexer = unsafe { FakeLexer::from_raw(raw) };
    let line_start = lexer.input[..lexer.pos]
        .iter()
        .rposition(|&c| c == '\n')
        .map_or(0, |i| i + 1);
    u32::try_from(lexer.pos - line_start).unwrap_or(u32::MAX)
}

extern "C" fn fake_is_at_included_range_start(_raw: *const TSLexer) -> bool {
    false
}

extern "C" fn fake_eof(raw: *const TSLexer) -> bool {
    // SAFETY: only installed on FakeLexer instances.
    let lexer = unsafe { FakeLexer::from_raw(raw) };
    lexer.pos >= lexer.input.len()
}

/// Run one scan call with a fresh scanner.
fn scan(lexer: &mut FakeLexer, valid: &[bool]) -> bool {
    let payload = tree_sitter_isograph_external_scanner_create();
    let matched =
        tree_sitter_isograph_external_scanner_scan(payload, lexer.as_raw(), valid.as_ptr());
    tree_sitter_isograph_external_scanner_destroy(payload);
    matched
}

// ── scan ────────────────────────────────────────────────────────────────

#[test]
fn scan_matches_newline_when_valid() {
    let mut lexer = FakeLexer::new("\n");
    assert!(scan(&mut lexer, &[true]));
    assert_eq!(lexer.pos, 1);
    assert_eq!(lexer.advances, vec![false]);
    assert_eq!(lexer.base.result_symbol, ExternalToken::Newline.ordinal());
}

#[test]
fn scan_declines_when_not_valid() {
    let mut lexer = FakeLexer::new("\n");
    assert!(!scan(&mut lexer, &[false]));
    assert_eq!(lexer.pos, 0);
    assert!(lexer.advances.is_empty());
    assert_eq!(lexer.base.result_symbol, NO_RESULT);
}

#[test]
fn scan_declines_other_characters() {
    let mut lexer = FakeLexer::new("a");
    assert!(!scan(&mut lexer, &[true]));
    assert_eq!(lexer.pos, 0);
    assert_eq!(lexer.base.result_symbol, NO_RESULT);
}

#[test]
fn scan_declines_at_end_of_input() {
    let mut lexer = FakeLexer::new("");
    assert!(!scan(&mut lexer, &[true]));
    assert!(lexer.advances.is_empty());
}

#[test]
fn scan_uses_eof_callback_not_zero_lookahead() {
    // An interior NUL has lookahead 0 but is not end of input.
    let mut lexer = FakeLexer::new("\0\n");
    assert!(!scan(&mut lexer, &[true]));
    assert_eq!(lexer.pos, 0);
}

#[test]
fn scan_one_instance_many_calls() {
    let mut lexer = FakeLexer::new("\n\nx");
    let payload = tree_sitter_isograph_external_scanner_create();
    let valid = [true];
    let raw = lexer.as_raw();
    assert!(tree_sitter_isograph_external_scanner_scan(payload, raw, valid.as_ptr()));
    assert!(tree_sitter_isograph_external_scanner_scan(payload, raw, valid.as_ptr()));
    assert!(!tree_sitter_isograph_external_scanner_scan(payload, raw, valid.as_ptr()));
    tree_sitter_isograph_external_scanner_destroy(payload);
    assert_eq!(lexer.pos, 2);
}

#[test]
fn scan_null_pointers_decline() {
    let mut lexer = FakeLexer::new("\n");
    let payload = tree_sitter_isograph_external_scanner_create();
    let valid = [true];
    assert!(!tree_sitter_isograph_external_scanner_scan(
        std::ptr::null_mut(),
        lexer.as_raw(),
        valid.as_ptr()
    ));
    assert!(!tree_sitter_isograph_external_scanner_scan(
        payload,
        std::ptr::null_mut(),
        valid.as_ptr()
    ));
    assert!(!tree_sitter_isograph_external_scanner_scan(
        payload,
        lexer.as_raw(),
        std::ptr::null()
    ));
    tree_sitter_isograph_external_scanner_destroy(payload);
    assert_eq!(lexer.pos, 0);
}

// ── Host lexer adapter ──────────────────────────────────────────────────

#[test]
fn host_lexer_forwards_callbacks() {
    use isograph_scanner::{Advance, Lexer};

    let mut fake = FakeLexer::new("ab\nc");
    let raw = NonNull::new(fake.as_raw()).unwrap_or_else(NonNull::dangling);
    // SAFETY: `fake` outlives `host`.
    let mut host = unsafe { HostLexer::new(raw) };
    assert_eq!(host.lookahead(), Some('a'));
    host.advance(Advance::Skip);
    host.advance(Advance::Token);
    assert_eq!(host.column(), 2);
    host.mark_end();
    host.set_result_symbol(ExternalToken::Newline);
    host.advance(Advance::Token);
    assert_eq!(host.lookahead(), Some('c'));
    assert_eq!(host.column(), 0);
    host.advance(Advance::Token);
    assert!(host.is_eof());
    assert_eq!(host.lookahead(), None);

    assert_eq!(fake.advances, vec![true, false, false, false]);
    assert_eq!(fake.marked_end, Some(2));
    assert_eq!(fake.base.result_symbol, 0);
}

// ── Lifecycle and snapshots ─────────────────────────────────────────────

#[test]
fn create_returns_non_null() {
    let payload = tree_sitter_isograph_external_scanner_create();
    assert!(!payload.is_null());
    tree_sitter_isograph_external_scanner_destroy(payload);
}

#[test]
fn destroy_null_is_noop() {
    tree_sitter_isograph_external_scanner_destroy(std::ptr::null_mut());
}

#[test]
fn serialize_returns_zero() {
    let payload = tree_sitter_isograph_external_scanner_create();
    let mut buffer = [0 as c_char; SERIALIZATION_BUFFER_SIZE];
    let len = tree_sitter_isograph_external_scanner_serialize(payload, buffer.as_mut_ptr());
    assert_eq!(len, 0);
    assert!(buffer.iter().all(|&b| b == 0));
    tree_sitter_isograph_external_scanner_destroy(payload);
}

#[test]
fn serialize_null_returns_zero() {
    let mut buffer = [0 as c_char; SERIALIZATION_BUFFER_SIZE];
    assert_eq!(
        tree_sitter_isograph_external_scanner_serialize(std::ptr::null_mut(), buffer.as_mut_ptr()),
        0
    );
}

#[test]
fn deserialize_empty_then_scan() {
    let payload = tree_sitter_isograph_external_scanner_create();
    tree_sitter_isograph_external_scanner_deserialize(payload, std::ptr::null(), 0);
    let buffer = [0 as c_char; 4];
    tree_sitter_isograph_external_scanner_deserialize(payload, buffer.as_ptr(), 0);

    let mut lexer = FakeLexer::new("\n");
    let valid = [true];
    assert!(tree_sitter_isograph_external_scanner_scan(
        payload,
        lexer.as_raw(),
        valid.as_ptr()
    ));
    tree_sitter_isograph_external_scanner_destroy(payload);
}

#[test]
fn deserialize_unexpected_state_is_ignored() {
    let payload = tree_sitter_isograph_external_scanner_create();
    let buffer = [1 as c_char; 4];
    tree_sitter_isograph_external_scanner_deserialize(payload, buffer.as_ptr(), 4);
    tree_sitter_isograph_external_scanner_deserialize(payload, std::ptr::null(), 4);
    tree_sitter_isograph_external_scanner_deserialize(std::ptr::null_mut(), buffer.as_ptr(), 4);

    let mut out = [0 as c_char; SERIALIZATION_BUFFER_SIZE];
    assert_eq!(
        tree_sitter_isograph_external_scanner_serialize(payload, out.as_mut_ptr()),
        0
    );
    tree_sitter_isograph_external_scanner_destroy(payload);
}

#[test]
fn init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}
