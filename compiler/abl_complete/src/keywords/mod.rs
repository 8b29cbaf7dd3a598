//! Static keyword table.
//!
//! Each entry is one language keyword with its minimum abbreviation, its
//! role, and whether it is reserved. Abbreviable keywords project to two
//! completion entries: the full spelling and the shortest accepted one.

use abl_ir::{CompletionType, Keyword, ParseFlags};

use KeywordType::{
    Function as Fun, Object as Obj, Phrase as Phr, Preprocessor as Pre, Statement as St, Type as Ty,
};

/// Role of a keyword in the language.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum KeywordType {
    Statement,
    /// Option or phrase inside a statement (`NO-UNDO`, `EACH`, ...).
    Phrase,
    /// Built-in function.
    Function,
    /// Data type.
    Type,
    /// Static or handle-based object (`BUTTON`, `BUFFER`, ...).
    Object,
    /// Preprocessor directive.
    Preprocessor,
}

impl KeywordType {
    pub const fn completion_type(self) -> CompletionType {
        match self {
            KeywordType::Object => CompletionType::KeywordObject,
            KeywordType::Statement
            | KeywordType::Phrase
            | KeywordType::Function
            | KeywordType::Type
            | KeywordType::Preprocessor => CompletionType::Keyword,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            KeywordType::Statement => "statement",
            KeywordType::Phrase => "phrase",
            KeywordType::Function => "function",
            KeywordType::Type => "type",
            KeywordType::Object => "object",
            KeywordType::Preprocessor => "preprocessor",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct KeywordEntry {
    pub keyword: Keyword,
    pub kind: KeywordType,
    pub reserved: bool,
}

/// `min_len == 0` means the keyword cannot be abbreviated.
const fn entry(name: &'static str, min_len: u8, kind: KeywordType, reserved: bool) -> KeywordEntry {
    let keyword = if min_len == 0 {
        Keyword::full(name)
    } else {
        Keyword::new(name, min_len)
    };
    KeywordEntry {
        keyword,
        kind,
        reserved,
    }
}

/// The keyword table, alphabetical.
pub static KEYWORDS: &[KeywordEntry] = &[
    entry("&ANALYZE-RESUME", 0, Pre, false),
    entry("&ANALYZE-SUSPEND", 0, Pre, false),
    entry("&ELSE", 0, Pre, false),
    entry("&ENDIF", 0, Pre, false),
    entry("&GLOBAL-DEFINE", 5, Pre, false),
    entry("&IF", 0, Pre, false),
    entry("&SCOPED-DEFINE", 5, Pre, false),
    entry("&THEN", 0, Pre, false),
    entry("&UNDEFINE", 0, Pre, false),
    entry("ANYWHERE", 0, Phr, false),
    entry("APPLY", 0, St, true),
    entry("AS", 0, Phr, true),
    entry("ASSIGN", 0, St, true),
    entry("AVAILABLE", 5, Fun, true),
    entry("BROWSE", 0, Obj, true),
    entry("BUFFER", 0, Obj, true),
    entry("BUFFER-COPY", 0, St, true),
    entry("BUTTON", 3, Obj, false),
    entry("BY", 0, Phr, true),
    entry("CAN-FIND", 0, Fun, true),
    entry("CASE", 0, St, true),
    entry("CATCH", 0, St, false),
    entry("CHARACTER", 4, Ty, false),
    entry("CHOOSE", 0, Phr, true),
    entry("CLOSE", 0, St, true),
    entry("CREATE", 0, St, true),
    entry("DATASET", 0, Obj, true),
    entry("DATE", 0, Ty, false),
    entry("DATETIME", 0, Ty, false),
    entry("DECIMAL", 3, Ty, false),
    entry("DEFINE", 3, St, true),
    entry("DELETE", 3, St, true),
    entry("DISPLAY", 4, St, true),
    entry("DO", 0, St, true),
    entry("EACH", 0, Phr, true),
    entry("ELSE", 0, Phr, true),
    entry("EMPTY", 0, St, true),
    entry("END", 0, St, true),
    entry("ENTRY", 0, Fun, true),
    entry("EXCLUSIVE-LOCK", 9, Phr, true),
    entry("EXTENT", 0, Phr, false),
    entry("FIELD", 0, Phr, true),
    entry("FINALLY", 0, St, false),
    entry("FIND", 0, St, true),
    entry("FIRST", 0, Phr, true),
    entry("FOR", 0, St, true),
    entry("FORMAT", 4, Phr, true),
    entry("FORWARD", 7, Phr, false),
    entry("FRAME", 0, Obj, true),
    entry("FUNCTION", 0, St, true),
    entry("HANDLE", 6, Ty, false),
    entry("IF", 0, St, true),
    entry("INDEX", 0, Fun, true),
    entry("INPUT", 0, Phr, true),
    entry("INPUT-OUTPUT", 0, Phr, true),
    entry("INT64", 0, Ty, false),
    entry("INTEGER", 3, Ty, false),
    entry("LABEL", 0, Phr, true),
    entry("LAST", 0, Phr, true),
    entry("LEAVE", 0, St, true),
    entry("LENGTH", 0, Fun, false),
    entry("LIKE", 0, Phr, true),
    entry("LOGICAL", 3, Ty, false),
    entry("LONGCHAR", 0, Ty, false),
    entry("LOOKUP", 0, Fun, true),
    entry("MEMPTR", 0, Ty, false),
    entry("MENU", 0, Obj, true),
    entry("MESSAGE", 0, St, true),
    entry("NEW", 0, Phr, true),
    entry("NEXT", 0, St, true),
    entry("NO-ERROR", 0, Phr, true),
    entry("NO-LOCK", 0, Phr, true),
    entry("NO-UNDO", 0, Phr, true),
    entry("NUM-ENTRIES", 0, Fun, true),
    entry("OF", 0, Phr, true),
    entry("ON", 0, St, true),
    entry("OPEN", 0, St, true),
    entry("OUTPUT", 0, Phr, true),
    entry("PARAMETER", 5, Obj, true),
    entry("PERSISTENT", 7, Phr, true),
    entry("PROCEDURE", 5, St, true),
    entry("PUT", 0, St, true),
    entry("QUERY", 0, Obj, true),
    entry("QUIT", 0, St, true),
    entry("RECID", 0, Ty, true),
    entry("RELEASE", 0, St, true),
    entry("REPEAT", 0, St, true),
    entry("RETURN", 0, St, true),
    entry("RETURNS", 0, Phr, false),
    entry("ROWID", 0, Ty, true),
    entry("RUN", 0, St, true),
    entry("SHARE-LOCK", 5, Phr, true),
    entry("SHARED", 0, Phr, true),
    entry("STREAM", 0, Obj, true),
    entry("STRING", 0, Fun, false),
    entry("SUBSTRING", 6, Fun, true),
    entry("TEMP-TABLE", 0, Obj, true),
    entry("THEN", 0, Phr, true),
    entry("THIS-PROCEDURE", 0, Obj, true),
    entry("TODAY", 0, Fun, true),
    entry("TRANSACTION", 5, Phr, true),
    entry("TRIM", 0, Fun, true),
    entry("UNDO", 0, St, true),
    entry("UPDATE", 0, St, true),
    entry("VALID-HANDLE", 0, Fun, true),
    entry("VALUE", 0, Fun, true),
    entry("VARIABLE", 3, Obj, true),
    entry("VIEW", 0, St, true),
    entry("VIEW-AS", 0, Phr, true),
    entry("WHEN", 0, Phr, true),
    entry("WHERE", 0, Phr, true),
    entry("WINDOW", 0, Obj, false),
    entry("WITH", 0, Phr, true),
];

impl KeywordEntry {
    fn base_flags(&self) -> ParseFlags {
        if self.reserved {
            ParseFlags::RESERVED
        } else {
            ParseFlags::empty()
        }
    }

    /// `(text, flags)` of every completion entry this keyword produces.
    pub fn spellings(&self) -> impl Iterator<Item = (&'static str, ParseFlags)> {
        let full = (self.keyword.name(), self.base_flags());
        let abbreviated = self
            .keyword
            .has_abbreviation()
            .then(|| {
                (
                    self.keyword.abbreviation(),
                    self.base_flags() | ParseFlags::ABBREVIATION,
                )
            });
        std::iter::once(full).chain(abbreviated)
    }
}

/// Look up a keyword by any accepted spelling.
pub fn lookup(word: &str) -> Option<&'static KeywordEntry> {
    KEYWORDS.iter().find(|e| e.keyword.matches(word))
}

#[cfg(test)]
mod tests;
