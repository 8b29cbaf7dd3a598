//! `RUN target [PERSISTENT [SET h]] [IN h] [(args)] ...`

use abl_ir::keyword as kw;
use abl_ir::{ItemKind, ParseFlags, TokenKind};

use super::unquote;
use crate::context::ParseContext;
use crate::cursor::{Lexeme, TokenCursor};

pub(crate) fn recognize(cursor: &mut TokenCursor<'_>, ctx: &mut ParseContext, at: &Lexeme<'_>) {
    let Some(first) = cursor.bump() else {
        return;
    };
    let mut flags = ParseFlags::empty();

    let target = if first.is_keyword(kw::VALUE) && cursor.eat_symbol('(') {
        flags |= ParseFlags::UNCERTAIN;
        value_expression(cursor)
    } else {
        path_target(cursor, &first)
    };

    while let Some(tok) = cursor.bump() {
        if tok.is_keyword(kw::PERSISTENT) {
            flags |= ParseFlags::LOAD_PERSISTENT;
        }
    }

    ctx.emit(target.clone(), ItemKind::Run { target }, at, flags);
}

/// A target written without quotes may span several tokens
/// (`lib/util.p`, `src\x.w`): glue everything up to trivia or `(`.
fn path_target(cursor: &mut TokenCursor<'_>, first: &Lexeme<'_>) -> String {
    let mut target = unquote(first.text).to_owned();
    if first.kind == TokenKind::String {
        return target;
    }
    loop {
        let next = cursor.peek_raw(0);
        let text = cursor.tokens().text(next);
        if !matches!(next.kind, TokenKind::Word | TokenKind::Symbol) || text == "(" {
            break;
        }
        target.push_str(text);
        cursor.advance();
    }
    target
}

/// Text of a `VALUE( ... )` expression, the opening parenthesis already
/// consumed. Tokens are joined with single spaces.
fn value_expression(cursor: &mut TokenCursor<'_>) -> String {
    let mut depth = 1usize;
    let mut parts = Vec::new();
    while let Some(tok) = cursor.bump() {
        if tok.is_symbol('(') {
            depth += 1;
        } else if tok.is_symbol(')') {
            depth -= 1;
            if depth == 0 {
                break;
            }
        }
        parts.push(tok.text);
    }
    parts.join(" ")
}
