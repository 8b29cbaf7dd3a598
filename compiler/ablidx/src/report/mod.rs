//! Rows printed by the commands, as text or JSON.

use std::fmt::Write as _;

use abl_complete::CompletionItem;
use abl_ir::{Locator, ParseFlags, ParsedItem, ScopeRef, TokenList};
use abl_parse::ParseOutput;
use serde::Serialize;

fn flag_names(flags: ParseFlags) -> Vec<&'static str> {
    flags.names().collect()
}

/// One parsed item.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct ItemRow<'a> {
    pub name: &'a str,
    pub kind: &'static str,
    pub category: &'static str,
    pub line: u32,
    pub column: u32,
    /// Name of the owning block, `None` at file level.
    pub scope: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<&'a str>,
    pub flags: Vec<&'static str>,
}

impl<'a> ItemRow<'a> {
    pub fn new(output: &'a ParseOutput, item: &'a ParsedItem) -> Self {
        let scope = match item.scope {
            ScopeRef::File => None,
            ScopeRef::Item(id) => output.item(id).map(|owner| owner.name.as_str()),
        };
        ItemRow {
            name: &item.name,
            kind: item.kind.tag(),
            category: item.completion_type().name(),
            line: item.pos.line,
            column: item.pos.column,
            scope,
            detail: item.kind.sub_text(),
            flags: flag_names(item.flags),
        }
    }

    pub fn render(&self, out: &mut String) {
        let _ = write!(
            out,
            "{}:{} {} {} ({})",
            self.line, self.column, self.kind, self.name, self.category
        );
        if let Some(detail) = self.detail.filter(|d| !d.is_empty()) {
            let _ = write!(out, " : {detail}");
        }
        if let Some(scope) = self.scope {
            let _ = write!(out, " in {scope}");
        }
        if !self.flags.is_empty() {
            let _ = write!(out, " [{}]", self.flags.join(" "));
        }
        out.push('\n');
    }
}

/// One completion entry.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct CompletionRow<'a> {
    pub text: &'a str,
    pub category: &'static str,
    pub ranking: i32,
    pub provenance: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<&'a str>,
    pub flags: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locator: Option<&'a Locator>,
}

impl<'a> CompletionRow<'a> {
    pub fn new(item: &'a CompletionItem) -> Self {
        CompletionRow {
            text: &item.text,
            category: item.kind.name(),
            ranking: item.ranking,
            provenance: item.provenance.name(),
            detail: item.sub_text.as_deref(),
            flags: flag_names(item.flags),
            locator: item.locator.as_ref(),
        }
    }

    pub fn render(&self, out: &mut String) {
        let _ = write!(out, "{:>6} {} ({})", self.ranking, self.text, self.category);
        if let Some(detail) = self.detail.filter(|d| !d.is_empty()) {
            let _ = write!(out, " : {detail}");
        }
        if !self.flags.is_empty() {
            let _ = write!(out, " [{}]", self.flags.join(" "));
        }
        out.push('\n');
    }
}

/// One token of the `lex` listing.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct TokenRow<'a> {
    pub kind: String,
    pub text: &'a str,
    pub line: u32,
    pub column: u32,
    pub statement: u32,
}

impl TokenRow<'_> {
    pub fn all(tokens: &TokenList) -> Vec<TokenRow<'_>> {
        tokens
            .iter()
            .map(|token| TokenRow {
                kind: format!("{:?}", token.kind),
                text: tokens.text(token),
                line: token.pos.line,
                column: token.pos.column,
                statement: token.statement.raw(),
            })
            .collect()
    }

    pub fn render(&self, out: &mut String) {
        let _ = writeln!(
            out,
            "{:<15} {:?} @ {}:{} #{}",
            self.kind, self.text, self.line, self.column, self.statement
        );
    }
}

/// Per-file line of the `index` command.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct FileSummary<'a> {
    pub file: &'a str,
    pub statements: u32,
    pub items: usize,
    /// Items carrying a warning facet.
    pub warnings: Vec<ItemRow<'a>>,
}

impl<'a> FileSummary<'a> {
    pub fn new(output: &'a ParseOutput) -> Self {
        FileSummary {
            file: &output.file,
            statements: output.statement_count,
            items: output.items.len(),
            warnings: output
                .items
                .iter()
                .filter(|item| item.flags.has_warning())
                .map(|item| ItemRow::new(output, item))
                .collect(),
        }
    }

    pub fn render(&self, out: &mut String) {
        let _ = writeln!(
            out,
            "{}: {} statements, {} items",
            self.file, self.statements, self.items
        );
        for warning in &self.warnings {
            out.push_str("  warning ");
            warning.render(out);
        }
    }
}

#[cfg(test)]
mod tests;
