//! Token list owning the source text it was cut from.

use std::ops::Index;

use super::{Token, TokenIdx};

/// The output of one tokenizer pass.
///
/// Owns the source so token text can be recovered from spans without a
/// second allocation per token. Random access is O(1).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenList {
    source: String,
    tokens: Vec<Token>,
}

impl TokenList {
    /// Create an empty list over `source`.
    pub fn new(source: impl Into<String>) -> Self {
        TokenList {
            source: source.into(),
            tokens: Vec::new(),
        }
    }

    /// Create an empty list with room for `capacity` tokens.
    pub fn with_capacity(source: impl Into<String>, capacity: usize) -> Self {
        TokenList {
            source: source.into(),
            tokens: Vec::with_capacity(capacity),
        }
    }

    /// Append a token, returning its index.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "token count is bounded by source length, which fits in u32"
    )]
    pub fn push(&mut self, token: Token) -> TokenIdx {
        let idx = TokenIdx::new(self.tokens.len() as u32);
        self.tokens.push(token);
        idx
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Token> {
        self.tokens.get(idx)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// The source the tokens were cut from.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Raw text of a token.
    ///
    /// Spans produced by the tokenizer always fall on character boundaries;
    /// a foreign span that does not yields the empty string.
    #[inline]
    pub fn text(&self, token: &Token) -> &str {
        self.source.get(token.span.to_range()).unwrap_or("")
    }

    /// Raw text of the token at `idx`, or `""` past the end.
    pub fn text_at(&self, idx: usize) -> &str {
        self.tokens.get(idx).map_or("", |t| self.text(t))
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, idx: usize) -> &Token {
        &self.tokens[idx]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl std::fmt::Debug for TokenList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tokens.iter().map(|t| (t.kind, self.text(t))))
            .finish()
    }
}
