//! `&GLOBAL-DEFINE name value` and `&SCOPED-DEFINE name value`.
//!
//! The value is the raw rest of the directive; line continuations (`~`)
//! are kept as written.

use abl_ir::{ItemKind, ParseFlags};

use crate::context::ParseContext;
use crate::cursor::{Lexeme, TokenCursor};

pub(crate) fn recognize(
    cursor: &mut TokenCursor<'_>,
    ctx: &mut ParseContext,
    at: &Lexeme<'_>,
    global: bool,
) {
    let Some(name) = cursor.bump() else {
        return;
    };
    cursor.skip_trivia();
    let value = cursor.rest_of_statement_text().to_owned();
    let flags = if global {
        ParseFlags::GLOBAL
    } else {
        ParseFlags::empty()
    };
    ctx.emit(name.text, ItemKind::Preprocessor { value }, at, flags);
}
