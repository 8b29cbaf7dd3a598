//! Sentinel-terminated source buffer.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content so
//! the scanner can detect end of input without bounds checks on every
//! read. The total size is rounded up to the next 64-byte boundary, which
//! also leaves zero padding for `peek()` and `peek2()` near the end.
//!
//! A leading UTF-8 byte order mark is not part of the token stream. Callers
//! strip it with [`strip_bom`] before building the buffer, so that token
//! offsets index the same text the `TokenList` owns.

use crate::cursor::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

const UTF8_BOM: char = '\u{feff}';

/// Split a leading byte order mark off `source`.
///
/// Returns the remaining text and whether a mark was present.
pub fn strip_bom(source: &str) -> (&str, bool) {
    match source.strip_prefix(UTF8_BOM) {
        Some(rest) => (rest, true),
        None => (source, false),
    }
}

/// Sentinel-terminated copy of the source.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    buf: Vec<u8>,
    source_len: u32,
}

impl SourceBuffer {
    /// Copy `source` into a padded, sentinel-terminated buffer.
    ///
    /// Sources larger than `u32::MAX` bytes saturate the length; the
    /// scanner then stops at that offset.
    pub fn new(source: &str) -> Self {
        let bytes = source.as_bytes();
        let len = bytes.len();

        // Minimum: source + 1 sentinel byte, rounded up.
        let padded_len = (len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);
        let mut buf = vec![0u8; padded_len];
        buf[..len].copy_from_slice(bytes);

        SourceBuffer {
            buf,
            source_len: u32::try_from(len).unwrap_or(u32::MAX),
        }
    }

    /// Source bytes, without sentinel or padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    pub fn len(&self) -> u32 {
        self.source_len
    }

    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}
