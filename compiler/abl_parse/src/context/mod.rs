//! Mutable state threaded through one parse pass.
//!
//! `ParseContext` owns the items emitted so far, the scope tracker, and the
//! regions of closed blocks. Recognizers receive it explicitly; nothing is
//! global, so two passes over two files never share state.

use abl_ir::{ItemId, ItemKind, ParseFlags, ParsedItem, ScopeRef, StatementId};
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::cursor::Lexeme;
use crate::scope::{ScopeRegion, ScopeTracker};

#[derive(Debug, Default)]
pub struct ParseContext {
    items: Vec<ParsedItem>,
    scopes: ScopeTracker,
    regions: Vec<ScopeRegion>,
    statement: StatementId,
    statement_start: u32,
    statements: u32,
    block_required: bool,
    /// Lowercased names of temp-tables defined so far.
    temp_tables: FxHashSet<String>,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    // === Statements ===

    /// Start recognizing the statement whose first token is `first`.
    pub fn begin_statement(&mut self, first: &Lexeme<'_>, statement: StatementId, start: u32) {
        self.statement = statement;
        self.statement_start = start;
        self.statements += 1;
        self.block_required = false;
        trace!(statement = statement.raw(), text = first.text, "begin statement");
    }

    /// Force the current statement to open a block whatever its terminator.
    pub fn require_block(&mut self) {
        self.block_required = true;
    }

    /// Finish the current statement.
    pub fn end_statement(&mut self, opens_block: bool) {
        let opens = opens_block || self.block_required;
        self.scopes.close_statement(opens, self.statement_start);
    }

    /// Close the innermost block at `end`.
    pub fn close_block(&mut self, end: u32) {
        if let Some(region) = self.scopes.pop(end) {
            self.regions.push(region);
        }
    }

    /// Number of statements dispatched so far.
    pub fn statement_count(&self) -> u32 {
        self.statements
    }

    // === Scopes ===

    /// Scope the current statement's items are emitted in.
    #[inline]
    pub fn scope(&self) -> ScopeRef {
        self.scopes.current()
    }

    /// Make `item` the scope of the block this statement opens.
    #[inline]
    pub fn push_scope(&mut self, item: ItemId) {
        self.scopes.push(item);
    }

    // === Items ===

    /// Emit an item in the current scope.
    pub fn emit(
        &mut self,
        name: impl Into<String>,
        kind: ItemKind,
        at: &Lexeme<'_>,
        flags: ParseFlags,
    ) -> ItemId {
        let scope = self.scope();
        self.emit_in(scope, name, kind, at, flags)
    }

    /// Emit an item in an explicit scope.
    ///
    /// `FILE_SCOPE` or `LOCAL_SCOPE` is added from `scope`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "item count is bounded by token count, which fits in u32"
    )]
    pub fn emit_in(
        &mut self,
        scope: ScopeRef,
        name: impl Into<String>,
        kind: ItemKind,
        at: &Lexeme<'_>,
        flags: ParseFlags,
    ) -> ItemId {
        let scope_flag = if scope.is_file() {
            ParseFlags::FILE_SCOPE
        } else {
            ParseFlags::LOCAL_SCOPE
        };
        let item = ParsedItem::new(name, kind, at.idx, at.pos, self.statement, scope)
            .with_flags(flags | scope_flag);
        let id = ItemId::new(self.items.len() as u32);
        trace!(
            id = id.index(),
            name = item.name.as_str(),
            kind = item.kind.tag(),
            "emit"
        );
        self.items.push(item);
        id
    }

    pub fn items(&self) -> &[ParsedItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&ParsedItem> {
        self.items.get(id.index())
    }

    // === Temp-tables ===

    pub fn note_temp_table(&mut self, name: &str) {
        self.temp_tables.insert(name.to_ascii_lowercase());
    }

    pub fn is_temp_table(&self, name: &str) -> bool {
        self.temp_tables.contains(&name.to_ascii_lowercase())
    }

    /// Close open blocks at `end` and hand back items and regions.
    pub fn finish(mut self, end: u32) -> (Vec<ParsedItem>, Vec<ScopeRegion>, u32) {
        let open = self.scopes.finish(end);
        self.regions.extend(open);
        (self.items, self.regions, self.statements)
    }
}
