//! Keyword spellings and abbreviation matching.
//!
//! ABL keywords are case-insensitive and many accept a truncated spelling
//! down to a minimum length (`DEF`, `DEFI`, `DEFIN` and `DEFINE` are the
//! same keyword). A [`Keyword`] pairs the full spelling with that minimum.
//!
//! The constants below are the keywords the statement recognizers test
//! against. The completion layer builds its static table from the same
//! `Keyword` values so both agree on abbreviations.

/// A keyword spelling with its shortest accepted abbreviation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Keyword {
    name: &'static str,
    min_len: u8,
}

impl Keyword {
    /// Keyword that accepts truncation down to `min_len` characters.
    pub const fn new(name: &'static str, min_len: u8) -> Self {
        Keyword { name, min_len }
    }

    /// Keyword that must be spelled out in full.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "keywords are far shorter than 256 bytes"
    )]
    pub const fn full(name: &'static str) -> Self {
        Keyword {
            name,
            min_len: name.len() as u8,
        }
    }

    /// Full spelling, upper case.
    #[inline]
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Whether a shorter spelling is accepted.
    #[inline]
    pub const fn has_abbreviation(self) -> bool {
        (self.min_len as usize) < self.name.len()
    }

    /// Shortest accepted spelling.
    pub fn abbreviation(self) -> &'static str {
        self.name.get(..self.min_len as usize).unwrap_or(self.name)
    }

    /// Case-insensitive match of `word` against any accepted spelling.
    pub fn matches(self, word: &str) -> bool {
        let len = word.len();
        len >= self.min_len as usize
            && len <= self.name.len()
            && self
                .name
                .get(..len)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(word))
    }
}

// === Statement keywords ===

pub const DEFINE: Keyword = Keyword::new("DEFINE", 3);
pub const PROCEDURE: Keyword = Keyword::new("PROCEDURE", 5);
pub const FUNCTION: Keyword = Keyword::full("FUNCTION");
pub const ON: Keyword = Keyword::full("ON");
pub const RUN: Keyword = Keyword::full("RUN");
pub const END: Keyword = Keyword::full("END");
pub const CREATE: Keyword = Keyword::full("CREATE");
pub const GLOBAL_DEFINE: Keyword = Keyword::new("&GLOBAL-DEFINE", 5);
pub const SCOPED_DEFINE: Keyword = Keyword::new("&SCOPED-DEFINE", 5);

// === DEFINE modifiers ===

pub const NEW: Keyword = Keyword::full("NEW");
pub const GLOBAL: Keyword = Keyword::full("GLOBAL");
pub const SHARED: Keyword = Keyword::full("SHARED");
pub const PRIVATE: Keyword = Keyword::full("PRIVATE");
pub const PROTECTED: Keyword = Keyword::full("PROTECTED");
pub const PUBLIC: Keyword = Keyword::full("PUBLIC");
pub const STATIC: Keyword = Keyword::full("STATIC");
pub const INPUT: Keyword = Keyword::full("INPUT");
pub const OUTPUT: Keyword = Keyword::full("OUTPUT");
pub const INPUT_OUTPUT: Keyword = Keyword::full("INPUT-OUTPUT");
pub const RETURN: Keyword = Keyword::full("RETURN");

// === DEFINE objects ===

pub const VARIABLE: Keyword = Keyword::new("VARIABLE", 3);
pub const PARAMETER: Keyword = Keyword::new("PARAMETER", 5);
pub const BUFFER: Keyword = Keyword::full("BUFFER");
pub const TEMP_TABLE: Keyword = Keyword::full("TEMP-TABLE");
pub const WORK_TABLE: Keyword = Keyword::new("WORK-TABLE", 8);
pub const BUTTON: Keyword = Keyword::new("BUTTON", 3);
pub const FRAME: Keyword = Keyword::full("FRAME");
pub const BROWSE: Keyword = Keyword::full("BROWSE");
pub const MENU: Keyword = Keyword::full("MENU");
pub const SUB_MENU: Keyword = Keyword::full("SUB-MENU");
pub const IMAGE: Keyword = Keyword::full("IMAGE");
pub const RECTANGLE: Keyword = Keyword::new("RECTANGLE", 4);
pub const QUERY: Keyword = Keyword::full("QUERY");
pub const STREAM: Keyword = Keyword::full("STREAM");
pub const DATASET: Keyword = Keyword::full("DATASET");
pub const DATA_SOURCE: Keyword = Keyword::full("DATA-SOURCE");
pub const EVENT: Keyword = Keyword::full("EVENT");

// === Clauses ===

pub const AS: Keyword = Keyword::full("AS");
pub const LIKE: Keyword = Keyword::full("LIKE");
pub const EXTENT: Keyword = Keyword::full("EXTENT");
pub const FOR: Keyword = Keyword::full("FOR");
pub const FIELD: Keyword = Keyword::full("FIELD");
pub const INDEX: Keyword = Keyword::full("INDEX");
pub const IS: Keyword = Keyword::full("IS");
pub const PRIMARY: Keyword = Keyword::full("PRIMARY");
pub const CLASS: Keyword = Keyword::full("CLASS");
pub const RETURNS: Keyword = Keyword::full("RETURNS");
pub const FORWARD: Keyword = Keyword::new("FORWARD", 7);
pub const IN: Keyword = Keyword::full("IN");
pub const EXTERNAL: Keyword = Keyword::full("EXTERNAL");
pub const PERSISTENT: Keyword = Keyword::new("PERSISTENT", 7);
pub const VALUE: Keyword = Keyword::full("VALUE");

// === Primitive data types ===

const PRIMITIVE_TYPES: &[Keyword] = &[
    Keyword::new("CHARACTER", 4),
    Keyword::new("INTEGER", 3),
    Keyword::new("DECIMAL", 3),
    Keyword::new("LOGICAL", 3),
    Keyword::full("DATE"),
    Keyword::full("DATETIME"),
    Keyword::full("DATETIME-TZ"),
    Keyword::full("INT64"),
    Keyword::full("LONGCHAR"),
    Keyword::full("MEMPTR"),
    Keyword::full("RAW"),
    Keyword::full("RECID"),
    Keyword::full("ROWID"),
    Keyword::new("HANDLE", 6),
    Keyword::new("WIDGET-HANDLE", 8),
    Keyword::full("COM-HANDLE"),
    Keyword::full("BLOB"),
    Keyword::full("CLOB"),
];

/// Canonical full spelling of a primitive data type, if `word` is one.
pub fn primitive_type(word: &str) -> Option<&'static str> {
    PRIMITIVE_TYPES
        .iter()
        .find(|kw| kw.matches(word))
        .map(|kw| kw.name())
}

/// Whether `word` is one of `keywords`.
pub fn any_matches(keywords: &[Keyword], word: &str) -> bool {
    keywords.iter().any(|kw| kw.matches(word))
}

#[cfg(test)]
mod tests;
