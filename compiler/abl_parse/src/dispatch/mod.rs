//! Statement dispatch.
//!
//! The dispatcher owns statement boundaries. For each statement it skips
//! leading trivia, classifies the leading keyword, hands the cursor to the
//! matching recognizer, then moves past the terminator itself and tells the
//! context whether the statement opened or closed a block.

use abl_ir::keyword::{self as kw, Keyword};
use abl_ir::{ItemKind, ParseFlags, TokenKind};
use tracing::debug;

use crate::context::ParseContext;
use crate::cursor::{Lexeme, TokenCursor};
use crate::recognize::{create, define, function, on_event, preprocessor, procedure, run};

/// Statement family chosen from the leading keyword.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StatementKind {
    OnEvent,
    Define,
    Create,
    Procedure,
    Function,
    Run,
    GlobalDefine,
    ScopedDefine,
    End,
    Label,
    /// Anything without a recognizer.
    Other,
}

const KEYWORDS: &[(Keyword, StatementKind)] = &[
    (kw::ON, StatementKind::OnEvent),
    (kw::DEFINE, StatementKind::Define),
    (kw::CREATE, StatementKind::Create),
    (kw::PROCEDURE, StatementKind::Procedure),
    (kw::FUNCTION, StatementKind::Function),
    (kw::RUN, StatementKind::Run),
    (kw::GLOBAL_DEFINE, StatementKind::GlobalDefine),
    (kw::SCOPED_DEFINE, StatementKind::ScopedDefine),
    (kw::END, StatementKind::End),
];

/// Block headers that end in `:` but are not labels.
const BLOCK_WORDS: &[Keyword] = &[
    Keyword::full("DO"),
    Keyword::full("REPEAT"),
    Keyword::full("ELSE"),
    Keyword::full("OTHERWISE"),
    Keyword::full("FINALLY"),
    Keyword::full("TRIGGERS"),
    Keyword::full("EDITING"),
    Keyword::full("THEN"),
];

/// Classify the statement under the cursor without consuming anything.
pub fn classify(cursor: &TokenCursor<'_>) -> StatementKind {
    let Some(first) = cursor.peek_significant(0) else {
        return StatementKind::Other;
    };
    if first.kind != TokenKind::Word {
        return StatementKind::Other;
    }
    if let Some((_, kind)) = KEYWORDS.iter().find(|(k, _)| k.matches(first.text)) {
        return *kind;
    }
    if is_label(cursor, &first) {
        return StatementKind::Label;
    }
    StatementKind::Other
}

/// A lone word terminated by `:`.
fn is_label(cursor: &TokenCursor<'_>, first: &Lexeme<'_>) -> bool {
    if cursor.peek_significant(1).is_some() || kw::any_matches(BLOCK_WORDS, first.text) {
        return false;
    }
    let tokens = cursor.tokens();
    tokens
        .as_slice()
        .get(cursor.position()..)
        .unwrap_or_default()
        .iter()
        .find(|t| t.kind.ends_statement())
        .is_some_and(|t| t.kind == TokenKind::EndOfStatement && tokens.text(t) == ":")
}

/// Dispatch one statement. Returns `false` once the cursor is at end of
/// file with nothing left to dispatch.
pub fn statement(cursor: &mut TokenCursor<'_>, ctx: &mut ParseContext) -> bool {
    cursor.skip_trivia();
    if cursor.is_at_end() {
        return false;
    }

    let first = cursor.current_lexeme();
    let start = cursor.current().span.start;
    ctx.begin_statement(&first, cursor.current().statement, start);

    let kind = classify(cursor);
    debug!(
        statement = cursor.current().statement.raw(),
        ?kind,
        text = first.text,
        "dispatch"
    );

    if kind != StatementKind::Other {
        cursor.bump();
    }
    match kind {
        StatementKind::OnEvent => on_event::recognize(cursor, ctx, &first),
        StatementKind::Define => define::recognize(cursor, ctx, &first),
        StatementKind::Create => create::recognize(cursor, ctx, &first),
        StatementKind::Procedure => procedure::recognize(cursor, ctx, &first),
        StatementKind::Function => function::recognize(cursor, ctx, &first),
        StatementKind::Run => run::recognize(cursor, ctx, &first),
        StatementKind::GlobalDefine => preprocessor::recognize(cursor, ctx, &first, true),
        StatementKind::ScopedDefine => preprocessor::recognize(cursor, ctx, &first, false),
        StatementKind::Label => {
            ctx.emit(first.text, ItemKind::Label, &first, ParseFlags::empty());
        }
        StatementKind::End | StatementKind::Other => {}
    }

    cursor.skip_to_statement_end();
    let terminator = cursor.finish_statement();

    match kind {
        StatementKind::End => {
            ctx.end_statement(false);
            let end = terminator.map_or(cursor.current().span.start, |t| t.end());
            ctx.close_block(end);
        }
        StatementKind::Label => ctx.end_statement(false),
        _ => ctx.end_statement(terminator.is_some_and(|t| t.text == ":")),
    }
    true
}
