//! Completion entries.

use std::fmt;

use abl_ir::{CompletionType, ItemId, Locator, ParseFlags};

/// Where an entry came from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Provenance {
    /// A symbol parsed from source.
    Parser,
    /// A keyword or a schema object.
    Static,
}

impl Provenance {
    pub const fn name(self) -> &'static str {
        match self {
            Provenance::Parser => "parser",
            Provenance::Static => "static",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the completion list.
///
/// `text` is both what is shown and the only key filtering matches
/// against.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CompletionItem {
    pub text: String,
    pub kind: CompletionType,
    pub flags: ParseFlags,
    /// Higher sorts first.
    pub ranking: i32,
    pub sub_text: Option<String>,
    pub provenance: Provenance,
    /// Back-reference into the parse output the entry came from.
    pub item: Option<ItemId>,
    pub locator: Option<Locator>,
}

impl CompletionItem {
    /// A static entry with no ranking yet.
    pub fn fixed(text: impl Into<String>, kind: CompletionType, flags: ParseFlags) -> Self {
        CompletionItem {
            text: text.into(),
            kind,
            flags,
            ranking: 0,
            sub_text: None,
            provenance: Provenance::Static,
            item: None,
            locator: None,
        }
    }

    #[must_use]
    pub fn with_sub_text(mut self, sub_text: impl Into<String>) -> Self {
        self.sub_text = Some(sub_text.into());
        self
    }
}
