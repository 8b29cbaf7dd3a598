//! `DEFINE` statements.
//!
//! ```text
//! DEFINE [NEW [GLOBAL]] [SHARED] [PRIVATE|PROTECTED|PUBLIC] [STATIC]
//!        [INPUT|OUTPUT|INPUT-OUTPUT|RETURN] object name ...
//! ```

use abl_ir::keyword::{self as kw, any_matches, Keyword};
use abl_ir::{ItemKind, ParseFlags};
use rustc_hash::FxHashSet;

use super::data_type_after_as;
use crate::context::ParseContext;
use crate::cursor::{Lexeme, TokenCursor};

const ACCESS_MODIFIERS: &[Keyword] = &[kw::PROTECTED, kw::PUBLIC, kw::STATIC];

const DIRECTIONS: &[Keyword] = &[kw::INPUT, kw::OUTPUT, kw::INPUT_OUTPUT, kw::RETURN];

const WIDGETS: &[Keyword] = &[
    kw::BUTTON,
    kw::FRAME,
    kw::BROWSE,
    kw::MENU,
    kw::SUB_MENU,
    kw::IMAGE,
    kw::RECTANGLE,
];

/// Objects that are handles to runtime structures rather than values.
const COMPLEX_OBJECTS: &[Keyword] = &[
    kw::QUERY,
    kw::STREAM,
    kw::DATASET,
    kw::DATA_SOURCE,
    kw::EVENT,
];

/// `PARAMETER TABLE FOR tt` and friends: no symbol of their own.
const TABLE_PARAMETERS: &[Keyword] = &[
    Keyword::full("TABLE"),
    Keyword::full("TABLE-HANDLE"),
    kw::DATASET,
    Keyword::full("DATASET-HANDLE"),
];

const INDEX_OPTIONS: &[Keyword] = &[
    kw::IS,
    Keyword::full("UNIQUE"),
    Keyword::full("WORD-INDEX"),
    Keyword::new("ASCENDING", 3),
    Keyword::new("DESCENDING", 4),
];

/// Recognize a DEFINE statement. The cursor sits after `DEFINE`.
pub(crate) fn recognize(cursor: &mut TokenCursor<'_>, ctx: &mut ParseContext, at: &Lexeme<'_>) {
    let mut flags = ParseFlags::empty();

    while let Some(word) = cursor.peek_significant(0) {
        if word.is_keyword(kw::NEW) {
            flags |= ParseFlags::NEW;
        } else if word.is_keyword(kw::GLOBAL) {
            flags |= ParseFlags::GLOBAL;
        } else if word.is_keyword(kw::SHARED) {
            flags |= ParseFlags::SHARED;
        } else if word.is_keyword(kw::PRIVATE) {
            flags |= ParseFlags::PRIVATE;
        } else if !(any_matches(ACCESS_MODIFIERS, word.text) || any_matches(DIRECTIONS, word.text))
        {
            break;
        }
        cursor.bump();
    }

    let Some(object) = cursor.bump() else {
        return;
    };

    if object.is_keyword(kw::VARIABLE) {
        variable(cursor, ctx, at, flags);
    } else if object.is_keyword(kw::PARAMETER) {
        flags |= ParseFlags::PARAMETER;
        if cursor.eat_keyword(kw::BUFFER) {
            buffer(cursor, ctx, at, flags);
        } else if !cursor
            .peek_significant(0)
            .is_some_and(|l| any_matches(TABLE_PARAMETERS, l.text))
        {
            variable(cursor, ctx, at, flags);
        }
    } else if object.is_keyword(kw::BUFFER) {
        buffer(cursor, ctx, at, flags);
    } else if object.is_keyword(kw::TEMP_TABLE) || object.is_keyword(kw::WORK_TABLE) {
        temp_table(cursor, ctx, at, flags);
    } else if let Some(widget) = WIDGETS.iter().find(|w| object.is_keyword(**w)) {
        if let Some(name) = cursor.bump() {
            ctx.emit(
                name.text,
                ItemKind::Widget {
                    widget_type: widget.name().to_owned(),
                },
                at,
                flags,
            );
        }
    } else if let Some(obj) = COMPLEX_OBJECTS.iter().find(|o| object.is_keyword(**o)) {
        if let Some(name) = cursor.bump() {
            ctx.emit(
                name.text,
                ItemKind::Variable {
                    data_type: obj.name().to_owned(),
                    primitive: false,
                },
                at,
                flags,
            );
        }
    }
}

/// `VARIABLE name {AS type | LIKE field} [EXTENT n] ...`
fn variable(
    cursor: &mut TokenCursor<'_>,
    ctx: &mut ParseContext,
    at: &Lexeme<'_>,
    mut flags: ParseFlags,
) {
    let Some(name) = cursor.bump() else {
        return;
    };
    let mut data_type = String::new();
    let mut primitive = true;

    while let Some(tok) = cursor.bump() {
        if tok.is_keyword(kw::AS) {
            if let Some(ty) = data_type_after_as(cursor) {
                data_type = ty.name;
                primitive = ty.primitive;
            }
        } else if tok.is_keyword(kw::LIKE) {
            if let Some(field) = cursor.bump() {
                data_type = field.text.to_owned();
                primitive = false;
            }
        } else if tok.is_keyword(kw::EXTENT) {
            flags |= ParseFlags::EXTENT;
        }
    }

    ctx.emit(
        name.text,
        ItemKind::Variable {
            data_type,
            primitive,
        },
        at,
        flags,
    );
}

/// `BUFFER name FOR [TEMP-TABLE] table`
fn buffer(cursor: &mut TokenCursor<'_>, ctx: &mut ParseContext, at: &Lexeme<'_>, flags: ParseFlags) {
    let Some(name) = cursor.bump() else {
        return;
    };
    let mut table = String::new();
    let mut explicit_temp = false;

    while let Some(tok) = cursor.bump() {
        if tok.is_keyword(kw::FOR) {
            explicit_temp = cursor.eat_keyword(kw::TEMP_TABLE);
            if let Some(t) = cursor.bump() {
                table = t.text.to_owned();
            }
            break;
        }
    }

    let temp_table = explicit_temp || ctx.is_temp_table(&table);
    ctx.emit(
        name.text,
        ItemKind::Buffer { table, temp_table },
        at,
        flags | ParseFlags::BUFFER,
    );
}

struct FieldDef<'a> {
    name: &'a str,
    data_type: String,
    extent: bool,
}

fn is_field_keyword(lex: &Lexeme<'_>) -> bool {
    lex.is_keyword(kw::FIELD) || lex.is_word("fields")
}

fn starts_clause(lex: &Lexeme<'_>) -> bool {
    is_field_keyword(lex) || lex.is_keyword(kw::INDEX)
}

/// `TEMP-TABLE name [LIKE table] {FIELD ...}* {INDEX ...}*`
fn temp_table(
    cursor: &mut TokenCursor<'_>,
    ctx: &mut ParseContext,
    at: &Lexeme<'_>,
    flags: ParseFlags,
) {
    let Some(name) = cursor.bump() else {
        return;
    };
    let mut like = None;
    let mut fields: Vec<FieldDef<'_>> = Vec::new();
    let mut indexed: FxHashSet<String> = FxHashSet::default();
    let mut primary: FxHashSet<String> = FxHashSet::default();

    while let Some(tok) = cursor.bump() {
        if tok.is_keyword(kw::LIKE) && fields.is_empty() {
            like = cursor.bump().map(|l| l.text.to_owned());
        } else if is_field_keyword(&tok) {
            if let Some(field) = field_def(cursor) {
                fields.push(field);
            }
        } else if tok.is_keyword(kw::INDEX) {
            index_def(cursor, &mut indexed, &mut primary);
        }
    }

    ctx.note_temp_table(name.text);
    ctx.emit(name.text, ItemKind::TempTable { like }, at, flags);

    for field in fields {
        let key = field.name.to_ascii_lowercase();
        let mut field_flags = ParseFlags::empty();
        if field.extent {
            field_flags |= ParseFlags::EXTENT;
        }
        if indexed.contains(&key) {
            field_flags |= ParseFlags::INDEX;
        }
        ctx.emit(
            field.name,
            ItemKind::Field {
                table: name.text.to_owned(),
                data_type: field.data_type,
                primary_key: primary.contains(&key),
            },
            at,
            field_flags,
        );
    }
}

/// `name {AS type | LIKE field} [EXTENT n] ...` up to the next clause.
fn field_def<'a>(cursor: &mut TokenCursor<'a>) -> Option<FieldDef<'a>> {
    let name = cursor.bump()?;
    let mut field = FieldDef {
        name: name.text,
        data_type: String::new(),
        extent: false,
    };

    while let Some(tok) = cursor.peek_significant(0) {
        if starts_clause(&tok) {
            break;
        }
        cursor.bump();
        if tok.is_keyword(kw::AS) {
            if let Some(ty) = data_type_after_as(cursor) {
                field.data_type = ty.name;
            }
        } else if tok.is_keyword(kw::LIKE) {
            if let Some(src) = cursor.bump() {
                field.data_type = src.text.to_owned();
            }
        } else if tok.is_keyword(kw::EXTENT) {
            field.extent = true;
        }
    }
    Some(field)
}

/// `name [IS [PRIMARY] [UNIQUE]] field [ASC|DESC] ...` up to the next clause.
fn index_def(
    cursor: &mut TokenCursor<'_>,
    indexed: &mut FxHashSet<String>,
    primary: &mut FxHashSet<String>,
) {
    if cursor.bump().is_none() {
        return;
    }
    let mut is_primary = false;
    let mut components = Vec::new();

    while let Some(tok) = cursor.peek_significant(0) {
        if starts_clause(&tok) {
            break;
        }
        cursor.bump();
        if tok.is_keyword(kw::PRIMARY) {
            is_primary = true;
        } else if !any_matches(INDEX_OPTIONS, tok.text) && tok.kind == abl_ir::TokenKind::Word {
            components.push(tok.text.to_ascii_lowercase());
        }
    }

    if is_primary {
        primary.extend(components.iter().cloned());
    }
    indexed.extend(components);
}
