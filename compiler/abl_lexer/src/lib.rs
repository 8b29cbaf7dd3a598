//! Tokenizer for ABL source files.
//!
//! Turns raw text into a flat [`TokenList`]: every byte of the input lands
//! in exactly one token, trivia included, and the last token is always
//! `EndOfFile`. Each token carries its line/column position and the id of
//! the statement it belongs to; a terminator belongs to the statement it
//! closes.
//!
//! # Architecture
//!
//! - [`SourceBuffer`]: sentinel-terminated copy of the source
//! - [`Cursor`]: byte cursor with memchr-accelerated skips
//! - [`Scanner`]: byte dispatch producing `(kind, len)` pairs
//! - [`lex`]: drives the scanner and assigns positions and statement ids
//!
//! Tokenizing never fails. Malformed input is split best-effort and the
//! recovery is logged at debug level.

mod cursor;
mod position;
mod scanner;
mod source_buffer;

pub use cursor::Cursor;
pub use scanner::{RawToken, Scanner};
pub use source_buffer::{strip_bom, SourceBuffer};

use abl_ir::{Span, StatementId, Token, TokenKind, TokenList};
use tracing::{debug, trace};

use position::PositionTracker;

/// Tokenize `source`.
///
/// A leading byte order mark is dropped; token offsets index the text
/// after it, which is what [`TokenList::source`] returns.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> TokenList {
    let (text, had_bom) = strip_bom(source);
    if had_bom {
        trace!("skipped byte order mark");
    }

    let buffer = SourceBuffer::new(text);
    let mut scanner = Scanner::new(buffer.cursor());
    let mut positions = PositionTracker::new(buffer.as_bytes());
    let mut tokens = TokenList::with_capacity(text, text.len() / 4 + 1);
    let mut statement = StatementId::FIRST;

    loop {
        let start = scanner.pos();
        let raw = scanner.next_token();
        let span = Span::new(start, start + raw.len);
        let pos = positions.advance_to(start);
        tokens.push(Token::new(raw.kind, span, pos, statement));

        match raw.kind {
            TokenKind::EndOfFile => break,
            TokenKind::EndOfStatement => statement = statement.next(),
            _ => {}
        }
    }

    debug!(
        tokens = tokens.len(),
        statements = statement.raw() + 1,
        "lexed"
    );
    tokens
}
