//! External token kinds and the valid-symbols set.
//!
//! tree-sitter identifies external tokens by their position in the grammar's
//! `externals` array. [`ExternalToken`] pins those ordinals, and
//! [`ValidSymbols`] is the host's "which of them may appear here" vector,
//! keyed by the same ordinals.

use bitflags::bitflags;

/// A token recognized by the external scanner rather than the generated lexer.
///
/// The discriminant is the ordinal tree-sitter uses for the `externals`
/// array and for `TSLexer::result_symbol`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ExternalToken {
    /// A `\n` that the grammar treats as a separator.
    Newline = 0,
}

impl ExternalToken {
    /// Number of external tokens the grammar declares.
    pub const COUNT: usize = 1;

    /// Every external token, in ordinal order.
    pub const ALL: [ExternalToken; Self::COUNT] = [ExternalToken::Newline];

    /// Index of this token in the host's `externals` array.
    #[inline]
    pub const fn ordinal(self) -> u16 {
        self as u16
    }

    /// Look up a token by its ordinal.
    pub const fn from_ordinal(ordinal: u16) -> Option<Self> {
        match ordinal {
            0 => Some(ExternalToken::Newline),
            _ => None,
        }
    }

    /// Node kind name used for this token in the language's symbol table.
    pub const fn name(self) -> &'static str {
        match self {
            ExternalToken::Newline => "_newline",
        }
    }

    const fn flag(self) -> ValidSymbols {
        ValidSymbols::from_bits_retain(1 << self.ordinal())
    }
}

bitflags! {
    /// The external tokens the grammar accepts at the current position.
    ///
    /// Bit `n` corresponds to [`ExternalToken`] ordinal `n`. The host
    /// supplies a fresh set on every `scan` call; the scanner only reads it.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ValidSymbols: u32 {
        const NEWLINE = 1 << ExternalToken::Newline as u32;
    }
}

const _: () = assert!(ExternalToken::COUNT <= u32::BITS as usize);

impl ValidSymbols {
    /// Build the set from tree-sitter's boolean vector.
    ///
    /// Index `n` of `flags` is the validity of ordinal `n`. Entries past
    /// [`ExternalToken::COUNT`] are ignored; missing entries count as invalid.
    pub fn from_flags(flags: &[bool]) -> Self {
        ExternalToken::ALL
            .iter()
            .filter(|token| flags.get(usize::from(token.ordinal())) == Some(&true))
            .fold(Self::empty(), |set, token| set | token.flag())
    }

    /// A set containing exactly `token`.
    pub const fn only(token: ExternalToken) -> Self {
        token.flag()
    }

    /// Whether `token` may appear at the current position.
    #[inline]
    pub const fn contains_token(self, token: ExternalToken) -> bool {
        self.contains(token.flag())
    }
}
