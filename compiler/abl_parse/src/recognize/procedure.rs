//! `PROCEDURE name [EXTERNAL "library" [PERSISTENT]] [PRIVATE]:`

use abl_ir::keyword as kw;
use abl_ir::{ItemKind, ParseFlags};

use super::unquote;
use crate::context::ParseContext;
use crate::cursor::{Lexeme, TokenCursor};

pub(crate) fn recognize(cursor: &mut TokenCursor<'_>, ctx: &mut ParseContext, at: &Lexeme<'_>) {
    let Some(name) = cursor.bump() else {
        return;
    };
    let mut flags = ParseFlags::empty();
    let mut external = None;

    while let Some(tok) = cursor.bump() {
        if tok.is_keyword(kw::EXTERNAL) {
            flags |= ParseFlags::EXTERNAL_PROC;
            external = cursor.bump().map(|lib| unquote(lib.text).to_owned());
        } else if tok.is_keyword(kw::PERSISTENT) {
            flags |= ParseFlags::PERSISTENT;
        } else if tok.is_keyword(kw::PRIVATE) {
            flags |= ParseFlags::PRIVATE;
        }
    }

    let id = ctx.emit(
        unquote(name.text),
        ItemKind::Procedure { external },
        at,
        flags,
    );
    ctx.push_scope(id);
    ctx.require_block();
}
