//! `FUNCTION name [RETURNS] type [(params)] [FORWARD | IN handle] [PRIVATE]`
//!
//! Prototypes (`FORWARD`, `IN`) end with a period and open nothing. A
//! function implemented `IN` a procedure handle lives in a persistent
//! procedure and is flagged PERSISTENT; `IN SUPER` is not. A
//! definition always opens a block, and its inline parameters are emitted
//! in the function's own scope.

use abl_ir::keyword::{self as kw, any_matches, Keyword};
use abl_ir::{ItemKind, ParseFlags, ScopeRef, TokenKind};

use super::data_type_after_as;
use crate::context::ParseContext;
use crate::cursor::{Lexeme, TokenCursor};

const PARAMETER_DIRECTIONS: &[Keyword] = &[kw::INPUT, kw::OUTPUT, kw::INPUT_OUTPUT];

const TABLE_PARAMETERS: &[Keyword] = &[
    Keyword::full("TABLE"),
    Keyword::full("TABLE-HANDLE"),
    kw::DATASET,
    Keyword::full("DATASET-HANDLE"),
];

#[derive(Default)]
struct Param {
    name: String,
    kind: Option<ItemKind>,
    flags: ParseFlags,
    /// `TABLE`/`DATASET` parameters define no symbol.
    skip: bool,
}

impl Param {
    fn into_item(self) -> Option<(String, ItemKind, ParseFlags)> {
        if self.skip || self.name.is_empty() {
            return None;
        }
        let kind = self.kind.unwrap_or(ItemKind::Variable {
            data_type: String::new(),
            primitive: true,
        });
        Some((self.name, kind, self.flags | ParseFlags::PARAMETER))
    }
}

pub(crate) fn recognize(cursor: &mut TokenCursor<'_>, ctx: &mut ParseContext, at: &Lexeme<'_>) {
    let Some(name) = cursor.bump() else {
        return;
    };

    if !cursor.eat_keyword(kw::RETURNS) {
        cursor.eat_keyword(kw::RETURN);
    }
    let return_type = if cursor.peek_significant(0).is_some_and(|l| l.is_symbol('(')) {
        String::new()
    } else {
        data_type_after_as(cursor).map(|t| t.name).unwrap_or_default()
    };

    let mut flags = ParseFlags::empty();
    let mut forward = false;
    let mut params = Vec::new();

    while let Some(tok) = cursor.bump() {
        if tok.is_symbol('(') {
            params = parameter_list(cursor);
        } else if tok.is_keyword(kw::FORWARD) {
            forward = true;
        } else if tok.is_keyword(kw::IN) {
            forward = true;
            if !cursor.peek_significant(0).is_some_and(|l| l.is_word("SUPER")) {
                flags |= ParseFlags::PERSISTENT;
            }
        } else if tok.is_keyword(kw::PRIVATE) {
            flags |= ParseFlags::PRIVATE;
        }
    }

    let id = ctx.emit(
        name.text,
        ItemKind::Function {
            return_type,
            forward,
        },
        at,
        flags,
    );
    if forward {
        return;
    }

    for (param, kind, param_flags) in params.into_iter().filter_map(Param::into_item) {
        ctx.emit_in(ScopeRef::Item(id), param, kind, at, param_flags);
    }
    ctx.push_scope(id);
    ctx.require_block();
}

/// Parameters up to the matching `)`, the opening one already consumed.
fn parameter_list(cursor: &mut TokenCursor<'_>) -> Vec<Param> {
    let mut params = Vec::new();
    let mut current = Param::default();
    let mut depth = 1usize;

    while let Some(tok) = cursor.bump() {
        if tok.is_symbol('(') {
            depth += 1;
            continue;
        }
        if tok.is_symbol(')') {
            depth -= 1;
            if depth == 0 {
                break;
            }
            continue;
        }
        // Nested parentheses carry nothing we record.
        if depth > 1 {
            continue;
        }

        let unnamed = current.name.is_empty();
        if tok.is_symbol(',') {
            params.push(std::mem::take(&mut current));
        } else if unnamed && any_matches(PARAMETER_DIRECTIONS, tok.text) {
            continue;
        } else if unnamed && any_matches(TABLE_PARAMETERS, tok.text) {
            current.skip = true;
        } else if unnamed && tok.is_keyword(kw::BUFFER) {
            current.kind = Some(ItemKind::Buffer {
                table: String::new(),
                temp_table: false,
            });
            current.flags |= ParseFlags::BUFFER;
        } else if tok.is_keyword(kw::FOR) {
            if let Some(ItemKind::Buffer { table, temp_table }) = current.kind.as_mut() {
                *temp_table = cursor.eat_keyword(kw::TEMP_TABLE);
                if let Some(t) = cursor.bump() {
                    *table = t.text.to_owned();
                }
            }
        } else if tok.is_keyword(kw::AS) {
            if let Some(ty) = data_type_after_as(cursor) {
                current.kind = Some(ItemKind::Variable {
                    data_type: ty.name,
                    primitive: ty.primitive,
                });
            }
        } else if tok.is_keyword(kw::LIKE) {
            if let Some(field) = cursor.bump() {
                current.kind = Some(ItemKind::Variable {
                    data_type: field.text.to_owned(),
                    primitive: false,
                });
            }
        } else if tok.is_keyword(kw::EXTENT) {
            current.flags |= ParseFlags::EXTENT;
        } else if unnamed && tok.kind == TokenKind::Word {
            current.name = tok.text.to_owned();
        }
    }
    params.push(current);
    params
}
