//! Token types for the ABL tokenizer.
//!
//! Tokens are immutable once the tokenizer has produced them. A token does
//! not own its text: it carries a `Span` into the source owned by the
//! [`TokenList`], which hands the text back through [`TokenList::text`].

mod list;

pub use list::TokenList;

use std::fmt;

use super::{Position, Span};

/// Token discriminant.
///
/// Trivia (`Whitespace`, `Comment`) is kept in the stream so recognizers
/// can reproduce raw-token lookahead; the cursor skips it on request.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Identifier, keyword, number, or preprocessor reference (`{&name}`).
    Word,
    /// Quoted string, including any translation attribute suffix.
    String,
    /// Single punctuation character.
    Symbol,
    /// Block or line comment.
    Comment,
    /// Run of spaces, tabs, and line breaks.
    Whitespace,
    /// Statement terminator: `.`, `:`, or the newline ending a directive.
    EndOfStatement,
    /// End of input. Always the last token.
    EndOfFile,
}

impl TokenKind {
    /// Whitespace and comments.
    #[inline]
    pub const fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }

    /// Statement end or file end.
    #[inline]
    pub const fn ends_statement(self) -> bool {
        matches!(self, TokenKind::EndOfStatement | TokenKind::EndOfFile)
    }
}

/// Identifier of the statement a token belongs to.
///
/// Statements are numbered from zero in source order; the terminator token
/// belongs to the statement it closes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct StatementId(u32);

impl StatementId {
    pub const FIRST: StatementId = StatementId(0);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        StatementId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        StatementId(self.0 + 1)
    }
}

/// Index of a token inside its `TokenList`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct TokenIdx(u32);

impl TokenIdx {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        TokenIdx(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A token with its location and owning statement.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub pos: Position,
    pub statement: StatementId,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span, pos: Position, statement: StatementId) -> Self {
        Token {
            kind,
            span,
            pos,
            statement,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} @ {} ({}) #{}",
            self.kind,
            self.span,
            self.pos,
            self.statement.raw()
        )
    }
}
