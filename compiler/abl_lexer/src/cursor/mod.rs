//! Byte cursor over a sentinel-terminated buffer.
//!
//! The cursor advances byte by byte. End of input is the sentinel (`0x00`)
//! at or past the source length; a NUL byte before that is interior data.

/// Returns the earliest of two optional offsets.
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
/// The cursor is [`Copy`], so the scanner snapshots it before a construct
/// that may turn out to be unterminated and restores it to recover.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Source + sentinel + padding.
    buf: &'a [u8],
    pos: u32,
    source_len: u32,
}

const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// `buf[source_len]` must be the `0x00` sentinel.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        Cursor {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Byte at the current position; `0x00` at end of input.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos as usize)
    }

    /// Byte one position ahead.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos as usize + 1)
    }

    /// Byte two positions ahead.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.byte_at(self.pos as usize + 2)
    }

    #[inline]
    fn byte_at(&self, idx: usize) -> u8 {
        self.buf.get(idx).copied().unwrap_or(0)
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Whether the cursor sits on the sentinel.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Advance while `pred` holds for the current byte.
    ///
    /// `pred(0)` must be false so the sentinel stops the loop.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Advance to the next `\n` (not consumed) or to end of input.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        let remaining = self.remaining();
        match memchr::memchr(b'\n', remaining) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.source_len,
        }
    }

    /// Advance to the next `quote` or `~` inside a string body.
    ///
    /// Returns the byte found, or 0 at end of input.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_string_delim(&mut self, quote: u8) -> u8 {
        match memchr::memchr2(quote, b'~', self.remaining()) {
            Some(offset) => {
                self.pos += offset as u32;
                self.current()
            }
            None => {
                self.pos = self.source_len;
                0
            }
        }
    }

    /// Advance to the next `*` or `/` inside a block comment body.
    ///
    /// Returns the byte found, or 0 at end of input.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_comment_delim(&mut self) -> u8 {
        let remaining = self.remaining();
        let offset = earliest_of(
            memchr::memchr(b'*', remaining),
            memchr::memchr(b'/', remaining),
        );
        match offset {
            Some(off) => {
                self.pos += off as u32;
                self.current()
            }
            None => {
                self.pos = self.source_len;
                0
            }
        }
    }

    /// Advance to the next `{` or `}` inside a preprocessor reference.
    ///
    /// Returns the byte found, or 0 at end of input.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_brace(&mut self) -> u8 {
        match memchr::memchr2(b'{', b'}', self.remaining()) {
            Some(offset) => {
                self.pos += offset as u32;
                self.current()
            }
            None => {
                self.pos = self.source_len;
                0
            }
        }
    }

    /// Advance past spaces, tabs, and carriage returns, stopping at `\n`.
    #[inline]
    pub fn eat_inline_whitespace(&mut self) {
        self.eat_while(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\x0C'));
    }

    /// Advance past any whitespace, line breaks included.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        self.eat_while(is_whitespace);
    }

    fn remaining(&self) -> &'a [u8] {
        let start = (self.pos.min(self.source_len)) as usize;
        &self.buf[start..self.source_len as usize]
    }
}

/// Whitespace byte, line breaks included.
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'\x0C')
}

#[cfg(test)]
mod tests;
