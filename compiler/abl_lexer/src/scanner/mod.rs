//! Hand-written scanner producing `(TokenKind, len)` pairs.
//!
//! The scanner runs over a sentinel-terminated [`Cursor`] and never fails:
//! every byte of the input lands in exactly one token. Keywords are not
//! resolved here; a keyword is just a `Word` until a recognizer reads it.
//!
//! # Statement terminators
//!
//! `.` and `:` end a statement when followed by whitespace, end of input,
//! or a byte that cannot continue a word. Followed by a word byte they are
//! part of the word (`db.table`, `1.5`, `hdl:ATTR`).
//!
//! # Directives
//!
//! A statement whose first word starts with `&` is a preprocessor
//! directive. It ends at the next newline not escaped with `~`; that
//! newline is the `EndOfStatement` token, and `.` or `:` inside the
//! directive are plain symbols.
//!
//! # Recovery
//!
//! An unterminated string, block comment, or `{...}` reference ends at the
//! end of the line it started on, and scanning resumes there.

use abl_ir::TokenKind;
use tracing::debug;

use crate::cursor::{is_whitespace, Cursor};

/// One scanned token: its kind and byte length.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct RawToken {
    pub kind: TokenKind,
    pub len: u32,
}

/// Byte that can start a word.
#[inline]
fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'#' | b'$' | b'%' | b'&' | b'{') || b >= 0x80
}

/// Byte that can continue a word.
#[inline]
fn is_word_continue(b: u8) -> bool {
    is_word_start(b) || b == b'-'
}

pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    /// No significant token seen since the last terminator.
    statement_start: bool,
    /// Inside a `&` directive statement.
    directive: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        Scanner {
            cursor,
            statement_start: true,
            directive: false,
        }
    }

    /// Byte offset of the next token.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Produce the next token.
    ///
    /// Returns `EndOfFile` with `len == 0` once the input is exhausted, and
    /// keeps returning it.
    pub fn next_token(&mut self) -> RawToken {
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            return RawToken {
                kind: TokenKind::EndOfFile,
                len: 0,
            };
        }

        let kind = match self.cursor.current() {
            b'\n' if self.directive => self.directive_end(),
            b'~' if self.directive && self.at_escaped_newline() => self.line_continuation(),
            b if is_whitespace(b) => self.whitespace(),
            b'"' | b'\'' => self.string(start),
            b'/' => self.slash(start),
            b'.' | b':' => self.terminator(),
            b if is_word_start(b) => self.word(start),
            _ => {
                self.cursor.advance();
                TokenKind::Symbol
            }
        };

        match kind {
            TokenKind::EndOfStatement => {
                self.statement_start = true;
                self.directive = false;
            }
            k if !k.is_trivia() => self.statement_start = false,
            _ => {}
        }

        RawToken {
            kind,
            len: self.cursor.pos() - start,
        }
    }

    // === Whitespace ===

    fn whitespace(&mut self) -> TokenKind {
        if self.directive {
            self.cursor.eat_inline_whitespace();
        } else {
            self.cursor.eat_whitespace();
        }
        TokenKind::Whitespace
    }

    fn directive_end(&mut self) -> TokenKind {
        self.cursor.advance();
        TokenKind::EndOfStatement
    }

    /// `~` followed by `\n` or `\r\n`.
    fn at_escaped_newline(&self) -> bool {
        match self.cursor.peek() {
            b'\n' => true,
            b'\r' => self.cursor.peek2() == b'\n',
            _ => false,
        }
    }

    fn line_continuation(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.current() == b'\r' {
            self.cursor.advance();
        }
        self.cursor.advance();
        TokenKind::Whitespace
    }

    // === Terminators ===

    fn terminator(&mut self) -> TokenKind {
        let next = self.cursor.peek();
        self.cursor.advance();
        if self.directive || is_word_continue(next) {
            TokenKind::Symbol
        } else {
            TokenKind::EndOfStatement
        }
    }

    // === Words ===

    fn word(&mut self, start: u32) -> TokenKind {
        if self.statement_start && self.cursor.current() == b'&' {
            self.directive = true;
        }

        loop {
            match self.cursor.current() {
                b'{' => {
                    if !self.brace_reference(start) {
                        break;
                    }
                }
                b'.' | b':' if is_word_continue(self.cursor.peek()) => {
                    self.cursor.advance();
                }
                b if is_word_continue(b) => {
                    self.cursor.advance();
                }
                _ => break,
            }
        }
        TokenKind::Word
    }

    /// Consume a brace-balanced `{...}` reference.
    ///
    /// Returns false if the reference was unterminated and the word was cut
    /// at the end of the line.
    fn brace_reference(&mut self, word_start: u32) -> bool {
        let snapshot = self.cursor;
        self.cursor.advance();
        let mut depth = 1u32;
        loop {
            match self.cursor.skip_to_brace() {
                b'{' => {
                    depth += 1;
                    self.cursor.advance();
                }
                b'}' => {
                    depth -= 1;
                    self.cursor.advance();
                    if depth == 0 {
                        return true;
                    }
                }
                _ => {
                    debug!(
                        offset = word_start,
                        "unterminated preprocessor reference; resuming at end of line"
                    );
                    self.cursor = snapshot;
                    self.cursor.eat_until_newline_or_eof();
                    return false;
                }
            }
        }
    }

    // === Strings ===

    fn string(&mut self, start: u32) -> TokenKind {
        let quote = self.cursor.current();
        let snapshot = self.cursor;
        self.cursor.advance();

        loop {
            match self.cursor.skip_to_string_delim(quote) {
                b'~' => {
                    self.cursor.advance();
                    if !self.cursor.is_eof() {
                        self.cursor.advance();
                    }
                }
                0 => {
                    debug!(
                        offset = start,
                        "unterminated string; resuming at end of line"
                    );
                    self.cursor = snapshot;
                    self.cursor.eat_until_newline_or_eof();
                    return TokenKind::String;
                }
                _ => {
                    self.cursor.advance();
                    // Doubled quote is a literal quote.
                    if self.cursor.current() == quote {
                        self.cursor.advance();
                    } else {
                        break;
                    }
                }
            }
        }

        // Translation attribute: `"text":U`, `'text':L20`.
        if self.cursor.current() == b':' && self.cursor.peek().is_ascii_alphabetic() {
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_alphanumeric());
        }
        TokenKind::String
    }

    // === Comments ===

    fn slash(&mut self, start: u32) -> TokenKind {
        match self.cursor.peek() {
            b'*' => self.block_comment(start),
            b'/' => {
                self.cursor.advance_n(2);
                self.cursor.eat_until_newline_or_eof();
                TokenKind::Comment
            }
            _ => {
                self.cursor.advance();
                TokenKind::Symbol
            }
        }
    }

    fn block_comment(&mut self, start: u32) -> TokenKind {
        let snapshot = self.cursor;
        self.cursor.advance_n(2);
        let mut depth = 1u32;

        loop {
            match self.cursor.skip_to_comment_delim() {
                b'*' if self.cursor.peek() == b'/' => {
                    self.cursor.advance_n(2);
                    depth -= 1;
                    if depth == 0 {
                        return TokenKind::Comment;
                    }
                }
                b'/' if self.cursor.peek() == b'*' => {
                    self.cursor.advance_n(2);
                    depth += 1;
                }
                b'*' | b'/' => self.cursor.advance(),
                _ => {
                    debug!(
                        offset = start,
                        "unterminated comment; resuming at end of line"
                    );
                    self.cursor = snapshot;
                    self.cursor.eat_until_newline_or_eof();
                    return TokenKind::Comment;
                }
            }
        }
    }
}
