//! Parsed symbol records.
//!
//! A `ParsedItem` is created exactly once by the recognizer that matched its
//! statement. Its scope is a [`ScopeRef`] key into the owning item vector,
//! never a pointer, so a whole parse pass is discarded by dropping one `Vec`.

use crate::{CompletionType, ParseFlags, Position, StatementId, TokenIdx};

/// Index of an item inside its parse output.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct ItemId(u32);

impl ItemId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        ItemId(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The lexical scope a symbol was emitted in.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ScopeRef {
    /// File level.
    #[default]
    File,
    /// The body of a procedure, function, or trigger item.
    Item(ItemId),
}

impl ScopeRef {
    #[inline]
    pub const fn is_file(self) -> bool {
        matches!(self, ScopeRef::File)
    }

    #[inline]
    pub const fn item(self) -> Option<ItemId> {
        match self {
            ScopeRef::File => None,
            ScopeRef::Item(id) => Some(id),
        }
    }
}

/// Kind-specific payload of a parsed item.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ItemKind {
    /// `ON event-list OF widget` trigger.
    OnEvent {
        events: Vec<String>,
        widgets: Vec<String>,
    },
    /// Variable or parameter. `primitive` is false for class types, `LIKE`
    /// definitions, and handle-like objects (QUERY, STREAM, ...).
    Variable { data_type: String, primitive: bool },
    /// Named buffer over a database table or a temp-table.
    Buffer { table: String, temp_table: bool },
    /// Temp-table or work-table, optionally `LIKE` another table.
    TempTable { like: Option<String> },
    /// Field of a temp-table.
    Field {
        table: String,
        data_type: String,
        primary_key: bool,
    },
    /// Static widget (BUTTON, FRAME, BROWSE, ...).
    Widget { widget_type: String },
    /// Internal procedure, optionally implemented in an external library.
    Procedure { external: Option<String> },
    /// User-defined function or its forward declaration.
    Function { return_type: String, forward: bool },
    /// Target of a RUN statement.
    Run { target: String },
    /// Block label.
    Label,
    /// `&GLOBAL-DEFINE` / `&SCOPED-DEFINE` symbol.
    Preprocessor { value: String },
}

impl ItemKind {
    /// Presentation category of this kind.
    pub fn completion_type(&self) -> CompletionType {
        match self {
            ItemKind::OnEvent { .. } | ItemKind::Widget { .. } => CompletionType::Widget,
            ItemKind::Variable { primitive: true, .. } => CompletionType::VariablePrimitive,
            ItemKind::Variable { primitive: false, .. } => CompletionType::VariableComplex,
            ItemKind::Buffer {
                temp_table: true, ..
            }
            | ItemKind::TempTable { .. } => CompletionType::TempTable,
            ItemKind::Buffer {
                temp_table: false,
                ..
            } => CompletionType::Table,
            ItemKind::Field {
                primary_key: true, ..
            } => CompletionType::FieldPk,
            ItemKind::Field {
                primary_key: false,
                ..
            } => CompletionType::Field,
            ItemKind::Procedure { .. } | ItemKind::Run { .. } => CompletionType::Procedure,
            ItemKind::Function { .. } => CompletionType::Function,
            ItemKind::Label => CompletionType::Label,
            ItemKind::Preprocessor { .. } => CompletionType::Preprocessed,
        }
    }

    /// Short lowercase tag used in listings.
    pub const fn tag(&self) -> &'static str {
        match self {
            ItemKind::OnEvent { .. } => "on",
            ItemKind::Variable { .. } => "variable",
            ItemKind::Buffer { .. } => "buffer",
            ItemKind::TempTable { .. } => "temp-table",
            ItemKind::Field { .. } => "field",
            ItemKind::Widget { .. } => "widget",
            ItemKind::Procedure { .. } => "procedure",
            ItemKind::Function { .. } => "function",
            ItemKind::Run { .. } => "run",
            ItemKind::Label => "label",
            ItemKind::Preprocessor { .. } => "preprocessor",
        }
    }

    /// Role-dependent secondary text shown next to the name.
    pub fn sub_text(&self) -> Option<&str> {
        match self {
            ItemKind::Variable { data_type, .. } | ItemKind::Field { data_type, .. } => {
                Some(data_type)
            }
            ItemKind::Buffer { table, .. } => Some(table),
            ItemKind::TempTable { like } => like.as_deref(),
            ItemKind::Widget { widget_type } => Some(widget_type),
            ItemKind::Procedure { external } => external.as_deref(),
            ItemKind::Function { return_type, .. } => Some(return_type),
            ItemKind::Preprocessor { value } => Some(value),
            ItemKind::OnEvent { .. } | ItemKind::Run { .. } | ItemKind::Label => None,
        }
    }
}

/// A symbol extracted from one recognized statement.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParsedItem {
    /// Display name; the single key completion filtering matches against.
    pub name: String,
    pub kind: ItemKind,
    /// The token that introduced the statement.
    pub token: TokenIdx,
    /// Position of that token.
    pub pos: Position,
    pub statement: StatementId,
    /// Scope active when the item was emitted.
    pub scope: ScopeRef,
    pub flags: ParseFlags,
}

impl ParsedItem {
    pub fn new(
        name: impl Into<String>,
        kind: ItemKind,
        token: TokenIdx,
        pos: Position,
        statement: StatementId,
        scope: ScopeRef,
    ) -> Self {
        ParsedItem {
            name: name.into(),
            kind,
            token,
            pos,
            statement,
            scope,
            flags: ParseFlags::empty(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: ParseFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[inline]
    pub fn completion_type(&self) -> CompletionType {
        self.kind.completion_type()
    }

    /// OR post-pass facets into the item. Other facets are ignored: they
    /// are fixed when the recognizer returns.
    pub fn add_post_pass_flags(&mut self, flags: ParseFlags) {
        self.flags |= flags.post_pass_only();
    }

    /// Whether the item defines a symbol (as opposed to referencing one).
    pub const fn is_definition(&self) -> bool {
        !matches!(self.kind, ItemKind::Run { .. } | ItemKind::OnEvent { .. })
    }

    /// Case-insensitive name comparison.
    #[inline]
    pub fn name_matches(&self, word: &str) -> bool {
        self.name.eq_ignore_ascii_case(word)
    }

    pub fn locator(&self, file: &str) -> Locator {
        Locator {
            file: file.to_owned(),
            line: self.pos.line,
            column: self.pos.column,
        }
    }
}

/// Where a symbol is defined, for "go to definition".
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Locator {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
