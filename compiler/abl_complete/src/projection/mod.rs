//! Projection of parse outputs, keywords, and schema into completion items.
//!
//! The list is regenerated from scratch for every request; nothing is
//! patched in place. Entries are emitted in a fixed order (parser symbols
//! file by file, then keywords, then schema objects), ranked by the
//! [`Scorer`], deduplicated on `(text, category)` keeping the best ranking,
//! and finally sorted by ranking. Sorting is stable, so equal rankings keep
//! emission order.

use std::cmp::Reverse;

use abl_ir::{CompletionType, ItemId, ParseFlags, ParsedItem, Schema, ScopeRef};
use abl_parse::ParseOutput;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::item::{CompletionItem, Provenance};
use crate::keywords::KEYWORDS;
use crate::score::{Candidate, DefaultScorer, Scorer};

/// The caret a list is built for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Caret<'a> {
    pub file: &'a str,
    pub offset: u32,
}

/// Builder for one completion list.
pub struct Projection<'a> {
    outputs: Vec<&'a ParseOutput>,
    schema: Option<&'a Schema>,
    caret: Option<Caret<'a>>,
    keywords: bool,
    scorer: &'a dyn Scorer,
}

static DEFAULT_SCORER: DefaultScorer = DefaultScorer;

impl Default for Projection<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Projection<'a> {
    pub fn new() -> Self {
        Projection {
            outputs: Vec::new(),
            schema: None,
            caret: None,
            keywords: true,
            scorer: &DEFAULT_SCORER,
        }
    }

    /// Add the symbols of one parsed file.
    #[must_use]
    pub fn with_output(mut self, output: &'a ParseOutput) -> Self {
        self.outputs.push(output);
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: &'a Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: &'a dyn Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Build the list for a caret. Local symbols of the caret's file are
    /// visible only inside their scope; other files contribute their
    /// file-level symbols only.
    #[must_use]
    pub fn at(mut self, caret: Caret<'a>) -> Self {
        self.caret = Some(caret);
        self
    }

    #[must_use]
    pub fn without_keywords(mut self) -> Self {
        self.keywords = false;
        self
    }

    /// Build the ranked list.
    #[tracing::instrument(level = "debug", skip_all, fields(files = self.outputs.len()))]
    pub fn build(&self) -> Vec<CompletionItem> {
        let mut list = ItemList::default();

        for output in &self.outputs {
            self.project_output(output, &mut list);
        }
        if self.keywords {
            self.project_keywords(&mut list);
        }
        if let Some(schema) = self.schema {
            self.project_schema(schema, &mut list);
        }

        let mut items = list.items;
        items.sort_by_key(|item| Reverse(item.ranking));
        debug!(items = items.len(), "completion list built");
        items
    }

    fn rank(&self, item: &CompletionItem, scope_distance: Option<usize>) -> i32 {
        self.scorer.score(&Candidate {
            text: &item.text,
            kind: item.kind,
            flags: item.flags,
            provenance: item.provenance,
            scope_distance,
        })
    }

    fn project_output(&self, output: &ParseOutput, list: &mut ItemList) {
        let caret = self.caret.filter(|c| c.file == output.file);
        let foreign = self.caret.is_some() && caret.is_none();
        let chain = caret.map(|c| output.scope_chain(output.scope_at(c.offset)));

        for (id, parsed) in output.iter() {
            if !parsed.is_definition() {
                continue;
            }
            let scope_distance = match &chain {
                Some(chain) => match chain.iter().position(|s| *s == parsed.scope) {
                    Some(distance) => Some(distance),
                    None => continue,
                },
                None if foreign && parsed.scope != ScopeRef::File => continue,
                None => None,
            };

            let mut item = parser_item(output, id, parsed);
            if foreign {
                item.flags |= ParseFlags::EXTERNAL;
            }
            item.ranking = self.rank(&item, scope_distance);
            list.push(item);
        }
    }

    fn project_keywords(&self, list: &mut ItemList) {
        for entry in KEYWORDS {
            for (text, flags) in entry.spellings() {
                let mut item = CompletionItem::fixed(text, entry.kind.completion_type(), flags)
                    .with_sub_text(entry.kind.name());
                item.ranking = self.rank(&item, None);
                list.push(item);
            }
        }
    }

    fn project_schema(&self, schema: &Schema, list: &mut ItemList) {
        for database in &schema.databases {
            let mut item = CompletionItem::fixed(
                database.name.as_str(),
                CompletionType::Database,
                ParseFlags::empty(),
            );
            item.ranking = self.rank(&item, None);
            list.push(item);

            for table in &database.tables {
                let mut item = CompletionItem::fixed(
                    table.name.as_str(),
                    CompletionType::Table,
                    ParseFlags::empty(),
                )
                .with_sub_text(database.name.as_str());
                item.ranking = self.rank(&item, None);
                list.push(item);

                for field in &table.fields {
                    let kind = if field.primary_key {
                        CompletionType::FieldPk
                    } else {
                        CompletionType::Field
                    };
                    let mut flags = ParseFlags::empty();
                    if field.mandatory {
                        flags |= ParseFlags::MANDATORY;
                    }
                    if field.extent > 0 {
                        flags |= ParseFlags::EXTENT;
                    }
                    if field.indexed {
                        flags |= ParseFlags::INDEX;
                    }
                    let mut item = CompletionItem::fixed(field.name.as_str(), kind, flags)
                        .with_sub_text(field.data_type.as_str());
                    item.ranking = self.rank(&item, None);
                    list.push(item);
                }
            }

            for sequence in &database.sequences {
                let mut item = CompletionItem::fixed(
                    sequence.as_str(),
                    CompletionType::Sequence,
                    ParseFlags::empty(),
                )
                .with_sub_text(database.name.as_str());
                item.ranking = self.rank(&item, None);
                list.push(item);
            }
        }
    }
}

fn parser_item(output: &ParseOutput, id: ItemId, parsed: &ParsedItem) -> CompletionItem {
    CompletionItem {
        text: parsed.name.clone(),
        kind: parsed.completion_type(),
        flags: parsed.flags,
        ranking: 0,
        sub_text: parsed.kind.sub_text().map(str::to_owned),
        provenance: Provenance::Parser,
        item: Some(id),
        locator: Some(parsed.locator(&output.file)),
    }
}

/// Emission-ordered list deduplicated on `(lowercased text, category)`.
#[derive(Default)]
struct ItemList {
    items: Vec<CompletionItem>,
    index: FxHashMap<(String, CompletionType), usize>,
}

impl ItemList {
    fn push(&mut self, item: CompletionItem) {
        let key = (item.text.to_ascii_lowercase(), item.kind);
        match self.index.get(&key) {
            Some(&at) => {
                if item.ranking > self.items[at].ranking {
                    self.items[at] = item;
                }
            }
            None => {
                self.index.insert(key, self.items.len());
                self.items.push(item);
            }
        }
    }
}

/// Filter a built list by typed text.
///
/// Case-insensitive. Prefix matches come before substring matches; inside
/// each group the list order (ranking, then emission) is kept. An empty
/// filter keeps everything.
pub fn filter<'l>(items: &'l [CompletionItem], typed: &str) -> Vec<&'l CompletionItem> {
    if typed.is_empty() {
        return items.iter().collect();
    }
    let needle = typed.to_lowercase();
    let mut matched: Vec<(bool, &CompletionItem)> = items
        .iter()
        .filter_map(|item| {
            let text = item.text.to_lowercase();
            if text.starts_with(&needle) {
                Some((true, item))
            } else if text.contains(&needle) {
                Some((false, item))
            } else {
                None
            }
        })
        .collect();
    matched.sort_by_key(|(prefix, item)| (Reverse(*prefix), Reverse(item.ranking)));
    matched.into_iter().map(|(_, item)| item).collect()
}
