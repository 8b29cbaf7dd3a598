//! Presentation categories of completion entries.

use std::fmt;

/// Closed set of completion categories.
///
/// Every parsed item kind and every static keyword maps to exactly one
/// category. The declaration order is the order of the category filter
/// buttons in the completion list.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompletionType {
    Snippet,
    VariablePrimitive,
    VariableComplex,
    Widget,
    Function,
    Procedure,
    Database,
    TempTable,
    Table,
    Sequence,
    Preprocessed,
    Label,
    Keyword,
    KeywordObject,
    FieldPk,
    Field,
}

impl CompletionType {
    /// Every category, in declaration order.
    pub const ALL: [CompletionType; 16] = [
        CompletionType::Snippet,
        CompletionType::VariablePrimitive,
        CompletionType::VariableComplex,
        CompletionType::Widget,
        CompletionType::Function,
        CompletionType::Procedure,
        CompletionType::Database,
        CompletionType::TempTable,
        CompletionType::Table,
        CompletionType::Sequence,
        CompletionType::Preprocessed,
        CompletionType::Label,
        CompletionType::Keyword,
        CompletionType::KeywordObject,
        CompletionType::FieldPk,
        CompletionType::Field,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            CompletionType::Snippet => "Snippet",
            CompletionType::VariablePrimitive => "VariablePrimitive",
            CompletionType::VariableComplex => "VariableComplex",
            CompletionType::Widget => "Widget",
            CompletionType::Function => "Function",
            CompletionType::Procedure => "Procedure",
            CompletionType::Database => "Database",
            CompletionType::TempTable => "TempTable",
            CompletionType::Table => "Table",
            CompletionType::Sequence => "Sequence",
            CompletionType::Preprocessed => "Preprocessed",
            CompletionType::Label => "Label",
            CompletionType::Keyword => "Keyword",
            CompletionType::KeywordObject => "KeywordObject",
            CompletionType::FieldPk => "FieldPk",
            CompletionType::Field => "Field",
        }
    }

    /// Static keyword categories.
    #[inline]
    pub const fn is_keyword(self) -> bool {
        matches!(self, CompletionType::Keyword | CompletionType::KeywordObject)
    }
}

impl fmt::Display for CompletionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
