//! Static description of the Isograph grammar's symbols and fields.
//!
//! This is the registration side of the grammar package: the names and
//! visibility of every node kind, the field names, and where the external
//! scanner's tokens sit in the symbol table. The parse tables that give the
//! symbols meaning are generated by tree-sitter and are not described here.
//!
//! Symbol numbering follows tree-sitter's layout: `end` is 0, then terminals,
//! then the external tokens, then the grammar's rules.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::symbol::ExternalToken;

/// Index into the language's symbol table.
pub type SymbolId = u16;

/// Index into the language's field table. Field ids start at 1.
pub type FieldId = u16;

/// tree-sitter ABI version the grammar is generated against.
const ABI_VERSION: u32 = 14;

/// How a symbol appears in a syntax tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A rule or token with a name (`identifier`, `selection_set`).
    Named,
    /// A literal token from the grammar (`"{"`, `"entrypoint"`).
    Anonymous,
    /// Never a visible node: `_`-prefixed rules, supertypes.
    Hidden,
    /// A token tree-sitter synthesizes from part of a rule. Hidden and
    /// unnamed.
    Auxiliary,
}

/// One entry of the symbol table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolInfo {
    pub name: &'static str,
    pub kind: SymbolKind,
    /// Abstract node kind grouping other kinds (`declaration`, `value`).
    pub supertype: bool,
}

impl SymbolInfo {
    const fn named(name: &'static str) -> Self {
        Self {
            name,
            kind: SymbolKind::Named,
            supertype: false,
        }
    }

    const fn anonymous(name: &'static str) -> Self {
        Self {
            name,
            kind: SymbolKind::Anonymous,
            supertype: false,
        }
    }

    const fn hidden(name: &'static str) -> Self {
        Self {
            name,
            kind: SymbolKind::Hidden,
            supertype: false,
        }
    }

    const fn auxiliary(name: &'static str) -> Self {
        Self {
            name,
            kind: SymbolKind::Auxiliary,
            supertype: false,
        }
    }

    const fn supertype(name: &'static str) -> Self {
        Self {
            name,
            kind: SymbolKind::Hidden,
            supertype: true,
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self.kind, SymbolKind::Named | SymbolKind::Hidden)
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.kind, SymbolKind::Named | SymbolKind::Anonymous)
    }
}

/// Symbol id of the first external token.
const EXTERNAL_TOKEN_BASE: SymbolId = 30;

const SYMBOLS: &[SymbolInfo] = &[
    SymbolInfo::hidden("end"),
    // Terminals
    SymbolInfo::anonymous("entrypoint"),
    SymbolInfo::anonymous("field"),
    SymbolInfo::anonymous("pointer"),
    SymbolInfo::anonymous("to"),
    SymbolInfo::anonymous("."),
    SymbolInfo::anonymous("="),
    SymbolInfo::anonymous("("),
    SymbolInfo::anonymous(","),
    SymbolInfo::anonymous(")"),
    SymbolInfo::anonymous(":"),
    SymbolInfo::anonymous("{"),
    SymbolInfo::anonymous("}"),
    SymbolInfo::anonymous("$"),
    SymbolInfo::anonymous("\""),
    SymbolInfo::anonymous("\"\"\""),
    SymbolInfo::anonymous("\\\"\"\""),
    SymbolInfo::auxiliary("block_string_token1"),
    SymbolInfo::named("integer"),
    SymbolInfo::anonymous("true"),
    SymbolInfo::anonymous("false"),
    SymbolInfo::named("null"),
    SymbolInfo::hidden("_escaped_character"),
    SymbolInfo::hidden("_escaped_unicode"),
    SymbolInfo::hidden("_string_characters"),
    SymbolInfo::anonymous("@"),
    SymbolInfo::anonymous("!"),
    SymbolInfo::anonymous("["),
    SymbolInfo::anonymous("]"),
    SymbolInfo::named("identifier"),
    // External tokens, in `ExternalToken` ordinal order
    SymbolInfo::hidden("_newline"),
    // Rules
    SymbolInfo::named("source_file"),
    SymbolInfo::supertype("declaration"),
    SymbolInfo::named("entrypoint_declaration"),
    SymbolInfo::named("client_field_declaration"),
    SymbolInfo::named("client_pointer_declaration"),
    SymbolInfo::named("parent_object_entity_name_and_selectable_name"),
    SymbolInfo::named("default_value"),
    SymbolInfo::named("variable_definitions"),
    SymbolInfo::named("variable_definition"),
    SymbolInfo::named("selection_set"),
    SymbolInfo::named("field"),
    SymbolInfo::named("alias"),
    SymbolInfo::named("arguments"),
    SymbolInfo::named("argument"),
    SymbolInfo::supertype("value"),
    SymbolInfo::named("variable"),
    SymbolInfo::named("string"),
    SymbolInfo::named("block_string"),
    SymbolInfo::named("boolean"),
    SymbolInfo::named("object"),
    SymbolInfo::named("object_field"),
    SymbolInfo::named("directives"),
    SymbolInfo::named("directive"),
    SymbolInfo::named("type_annotation"),
    SymbolInfo::named("description"),
];

/// Field names; the name for field id `n` is at index `n - 1`.
const FIELDS: &[&str] = &["parent_object_entity_name", "selectable_name"];

const _: () = assert!(SYMBOLS.len() <= SymbolId::MAX as usize);
const _: () =
    assert!(EXTERNAL_TOKEN_BASE as usize + ExternalToken::COUNT <= SYMBOLS.len());

/// The compiled grammar's static description.
///
/// Obtained through [`language()`]. Lives for the whole process and is never
/// mutated.
#[derive(Debug)]
pub struct Language {
    name: &'static str,
    abi_version: u32,
    symbols: &'static [SymbolInfo],
    external_token_base: SymbolId,
    fields: &'static [&'static str],
    kind_index: OnceLock<FxHashMap<&'static str, KindIds>>,
}

/// Symbols sharing one kind name, split by namedness.
#[derive(Clone, Copy, Debug, Default)]
struct KindIds {
    named: Option<SymbolId>,
    anonymous: Option<SymbolId>,
}

static LANGUAGE: Language = Language {
    name: "isograph",
    abi_version: ABI_VERSION,
    symbols: SYMBOLS,
    external_token_base: EXTERNAL_TOKEN_BASE,
    fields: FIELDS,
    kind_index: OnceLock::new(),
};

/// The Isograph language description.
pub fn language() -> &'static Language {
    &LANGUAGE
}

impl Language {
    /// Grammar name, as used in `tree_sitter_<name>` symbols.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn abi_version(&self) -> u32 {
        self.abi_version
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "table length is checked against SymbolId::MAX at compile time"
    )]
    pub fn symbol_count(&self) -> SymbolId {
        self.symbols.len() as SymbolId
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&'static SymbolInfo> {
        self.symbols.get(usize::from(id))
    }

    pub fn node_kind_for_id(&self, id: SymbolId) -> Option<&'static str> {
        self.symbol(id).map(|symbol| symbol.name)
    }

    /// Look up a symbol by kind name and namedness.
    ///
    /// `named` distinguishes the `field` rule from the `"field"` keyword.
    /// Hidden symbols count as named; auxiliary tokens do not.
    pub fn id_for_node_kind(&self, kind: &str, named: bool) -> Option<SymbolId> {
        let ids = self.kind_index().get(kind)?;
        if named {
            ids.named
        } else {
            ids.anonymous
        }
    }

    pub fn node_kind_is_named(&self, id: SymbolId) -> bool {
        self.symbol(id).is_some_and(SymbolInfo::is_named)
    }

    pub fn node_kind_is_visible(&self, id: SymbolId) -> bool {
        self.symbol(id).is_some_and(SymbolInfo::is_visible)
    }

    pub fn node_kind_is_supertype(&self, id: SymbolId) -> bool {
        self.symbol(id).is_some_and(|symbol| symbol.supertype)
    }

    /// Ids of the supertype symbols, in table order.
    pub fn supertypes(&self) -> impl Iterator<Item = SymbolId> + '_ {
        (0..self.symbol_count()).filter(|&id| self.node_kind_is_supertype(id))
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "the field table is a handful of entries"
    )]
    pub fn field_count(&self) -> FieldId {
        self.fields.len() as FieldId
    }

    /// Name of field `id`; id 0 means "no field" and has no name.
    pub fn field_name_for_id(&self, id: FieldId) -> Option<&'static str> {
        let index = usize::from(id).checked_sub(1)?;
        self.fields.get(index).copied()
    }

    pub fn field_id_for_name(&self, name: &str) -> Option<FieldId> {
        (1..=self.field_count()).find(|&id| self.field_name_for_id(id) == Some(name))
    }

    /// Symbol id that an external token occupies in the symbol table.
    pub fn external_token_symbol(&self, token: ExternalToken) -> SymbolId {
        self.external_token_base + token.ordinal()
    }

    fn kind_index(&self) -> &FxHashMap<&'static str, KindIds> {
        self.kind_index.get_or_init(|| {
            let mut index: FxHashMap<&'static str, KindIds> = FxHashMap::default();
            for id in 0..self.symbol_count() {
                let Some(symbol) = self.symbol(id) else {
                    continue;
                };
                let ids = index.entry(symbol.name).or_default();
                let slot = if symbol.is_named() {
                    &mut ids.named
                } else {
                    &mut ids.anonymous
                };
                // First entry wins.
                slot.get_or_insert(id);
            }
            index
        })
    }
}
