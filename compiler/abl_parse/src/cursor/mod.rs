//! Token cursor for navigating one file's token stream.
//!
//! Recognizers read exclusively through the cursor. Significant-token
//! helpers never cross the end of the current statement: at a terminator
//! they return `None` and leave the cursor in place, so the dispatcher is
//! always the one to consume the terminator.

use abl_ir::{Keyword, Position, Span, StatementId, Token, TokenIdx, TokenKind, TokenList};
use tracing::trace;

/// A token together with its index and text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub idx: TokenIdx,
    pub kind: TokenKind,
    pub text: &'a str,
    pub pos: Position,
}

impl Lexeme<'_> {
    /// Whether this is a word matching `kw`.
    #[inline]
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind == TokenKind::Word && kw.matches(self.text)
    }

    /// Whether this is the single symbol `sym`.
    #[inline]
    pub fn is_symbol(&self, sym: char) -> bool {
        self.kind == TokenKind::Symbol && self.text.len() == sym.len_utf8() && self.text.starts_with(sym)
    }

    /// Case-insensitive word comparison.
    #[inline]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Word && self.text.eq_ignore_ascii_case(word)
    }

    /// Byte offset just past the token.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "token text is a span of a source whose length fits in u32"
    )]
    #[inline]
    pub fn end(&self) -> u32 {
        self.pos.offset + self.text.len() as u32
    }
}

/// Stands in for the EOF token of a list that lacks one.
static MISSING_EOF: Token = Token {
    kind: TokenKind::EndOfFile,
    span: Span::DUMMY,
    pos: Position::START,
    statement: StatementId::FIRST,
};

/// Cursor over a [`TokenList`].
///
/// The position only moves forward and never passes the final EOF token.
/// A list built by hand without a trailing EOF reads as if it had one.
pub struct TokenCursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
    /// Index of the EOF token; `tokens.len()` when the list has none.
    end: usize,
    eof: &'a Token,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        let (end, eof) = match tokens.as_slice().last() {
            Some(last) if last.kind == TokenKind::EndOfFile => (tokens.len() - 1, last),
            _ => {
                trace!(len = tokens.len(), "token list without EOF");
                (tokens.len(), &MISSING_EOF)
            }
        };
        TokenCursor {
            tokens,
            pos: 0,
            end,
            eof,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn tokens(&self) -> &'a TokenList {
        self.tokens
    }

    /// The current token. Past the end this is the EOF token.
    #[inline]
    pub fn current(&self) -> &'a Token {
        self.raw_at(self.pos)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_lexeme(&self) -> Lexeme<'a> {
        self.lexeme_at(self.pos)
    }

    /// At end of file.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::EndOfFile
    }

    /// At a statement terminator or end of file.
    #[inline]
    pub fn at_statement_end(&self) -> bool {
        self.current_kind().ends_statement()
    }

    /// Raw token `n` positions ahead, clamped to EOF.
    #[inline]
    pub fn peek_raw(&self, n: usize) -> &'a Token {
        self.raw_at(self.pos + n)
    }

    fn raw_at(&self, idx: usize) -> &'a Token {
        if idx >= self.end {
            return self.eof;
        }
        self.tokens.as_slice().get(idx).unwrap_or(self.eof)
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "token count is bounded by source length, which fits in u32"
    )]
    fn lexeme_at(&self, idx: usize) -> Lexeme<'a> {
        let idx = idx.min(self.end);
        let token = self.raw_at(idx);
        Lexeme {
            idx: TokenIdx::new(idx as u32),
            kind: token.kind,
            text: self.tokens.text(token),
            pos: token.pos,
        }
    }

    /// Advance one raw token. Does nothing at EOF.
    #[inline]
    pub fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    /// Skip whitespace and comments.
    pub fn skip_trivia(&mut self) {
        while self.current_kind().is_trivia() {
            self.pos += 1;
        }
    }

    /// Advance up to `n` raw tokens, stopping at the statement end.
    pub fn skip_raw_in_statement(&mut self, n: usize) {
        for _ in 0..n {
            if self.at_statement_end() {
                break;
            }
            self.pos += 1;
        }
        trace!(pos = self.pos, skipped = n, "raw skip");
    }

    /// Index of the `n`-th significant token at or after the cursor, if it
    /// is still inside the current statement.
    fn significant_index(&self, n: usize) -> Option<usize> {
        let mut idx = self.pos;
        let mut seen = 0;
        loop {
            let tok = self.raw_at(idx);
            if tok.kind.ends_statement() {
                return None;
            }
            if !tok.kind.is_trivia() {
                if seen == n {
                    return Some(idx);
                }
                seen += 1;
            }
            idx += 1;
        }
    }

    /// The `n`-th significant token of the rest of the statement, without
    /// consuming anything. `peek_significant(0)` is the next one.
    pub fn peek_significant(&self, n: usize) -> Option<Lexeme<'a>> {
        self.significant_index(n).map(|idx| self.lexeme_at(idx))
    }

    /// Consume and return the next significant token of the statement.
    pub fn bump(&mut self) -> Option<Lexeme<'a>> {
        let idx = self.significant_index(0)?;
        self.pos = idx + 1;
        let lex = self.lexeme_at(idx);
        trace!(pos = idx, text = lex.text, "bump");
        Some(lex)
    }

    /// Consume the next significant token if it is the keyword `kw`.
    pub fn eat_keyword(&mut self, kw: Keyword) -> bool {
        if self.peek_significant(0).is_some_and(|l| l.is_keyword(kw)) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the next significant token if it is the symbol `sym`.
    pub fn eat_symbol(&mut self, sym: char) -> bool {
        if self.peek_significant(0).is_some_and(|l| l.is_symbol(sym)) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Move to the statement's terminator (or EOF) without consuming it.
    pub fn skip_to_statement_end(&mut self) {
        while !self.at_statement_end() {
            self.pos += 1;
        }
    }

    /// Consume the terminator under the cursor, returning it.
    ///
    /// Returns `None` at EOF.
    pub fn finish_statement(&mut self) -> Option<Lexeme<'a>> {
        if self.current_kind() == TokenKind::EndOfStatement {
            let lex = self.current_lexeme();
            self.pos += 1;
            Some(lex)
        } else {
            None
        }
    }

    /// Source text from the cursor to the statement end, trimmed.
    pub fn rest_of_statement_text(&self) -> &'a str {
        let start = self.current().span.start as usize;
        let mut idx = self.pos;
        while !self.raw_at(idx).kind.ends_statement() {
            idx += 1;
        }
        let end = self.raw_at(idx).span.start as usize;
        self.tokens
            .source()
            .get(start..end)
            .map_or("", str::trim)
    }
}
