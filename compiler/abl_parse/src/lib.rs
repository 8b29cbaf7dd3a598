//! ABL statement parser.
//!
//! Turns a token stream into [`ParsedItem`](abl_ir::ParsedItem)s without
//! building a syntax tree. Each statement is classified by its leading
//! keyword and handed to one small recognizer; the recognizer reads only
//! the tokens of its own statement and emits symbols into an explicit
//! [`ParseContext`](context::ParseContext).
//!
//! # Architecture
//!
//! - `cursor`: statement-bounded lookahead over the token list
//! - `dispatch`: statement boundaries and keyword to recognizer mapping
//! - `recognize`: one recognizer per statement family
//! - `scope`: block stack and the regions of named blocks
//! - `resolve`: post-pass flags that need the schema or the file system
//!
//! Parsing never fails. Statements nothing recognizes produce no item, and
//! a truncated statement yields whatever its recognizer managed to read.

pub mod context;
pub mod cursor;
pub mod dispatch;
mod output;
pub mod recognize;
pub mod resolve;
pub mod scope;

pub use cursor::{Lexeme, TokenCursor};
pub use output::ParseOutput;
pub use recognize::on_event::{Clause, OnEventMachine, OnState, Step};
pub use resolve::{resolve, FileResolver, ResolveEnv, DEFAULT_MAX_BLOCK_CHARS};
pub use scope::ScopeRegion;

use abl_ir::TokenList;
use tracing::debug;

use context::ParseContext;

/// Tokenize and parse one file.
#[tracing::instrument(level = "debug", skip_all, fields(file = file, len = source.len()))]
pub fn parse(file: &str, source: &str) -> ParseOutput {
    let tokens = abl_lexer::lex(source);
    parse_tokens(file, &tokens)
}

/// Parse an already tokenized file.
#[allow(
    clippy::cast_possible_truncation,
    reason = "source length is bounded by the tokenizer's u32 offsets"
)]
pub fn parse_tokens(file: &str, tokens: &TokenList) -> ParseOutput {
    let mut cursor = TokenCursor::new(tokens);
    let mut ctx = ParseContext::new();
    while dispatch::statement(&mut cursor, &mut ctx) {}

    let source_len = tokens.source().len() as u32;
    let (items, regions, statement_count) = ctx.finish(source_len);
    debug!(
        items = items.len(),
        regions = regions.len(),
        statements = statement_count,
        "parsed"
    );
    ParseOutput {
        file: file.to_owned(),
        items,
        regions,
        statement_count,
        source_len,
    }
}
