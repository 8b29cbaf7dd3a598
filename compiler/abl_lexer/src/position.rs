//! Incremental byte offset to line/column conversion.
//!
//! Token starts arrive in increasing order, so the tracker only ever scans
//! the bytes between the previous offset and the next one.

use abl_ir::Position;

pub struct PositionTracker<'a> {
    source: &'a [u8],
    offset: u32,
    line: u32,
    column: u32,
}

/// Characters in a UTF-8 byte run (continuation bytes are skipped).
#[allow(
    clippy::cast_possible_truncation,
    reason = "runs are bounded by source length, which fits in u32"
)]
fn char_count(bytes: &[u8]) -> u32 {
    bytes.iter().filter(|&&b| b & 0xC0 != 0x80).count() as u32
}

impl<'a> PositionTracker<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        PositionTracker {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Position of `offset`, which must not precede the last one asked for.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "newline count is bounded by source length"
    )]
    pub fn advance_to(&mut self, offset: u32) -> Position {
        debug_assert!(offset >= self.offset, "positions must be requested in order");
        let from = (self.offset as usize).min(self.source.len());
        let to = (offset as usize).min(self.source.len());
        let run = &self.source[from..to.max(from)];

        match memchr::memrchr(b'\n', run) {
            Some(last) => {
                self.line += memchr::memchr_iter(b'\n', run).count() as u32;
                self.column = 1 + char_count(&run[last + 1..]);
            }
            None => self.column += char_count(run),
        }

        self.offset = offset.max(self.offset);
        Position::new(self.line, self.column, offset)
    }
}
