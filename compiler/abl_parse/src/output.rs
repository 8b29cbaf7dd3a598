//! Result of one parse pass.

use abl_ir::{ItemId, ParsedItem, ScopeRef};

use crate::scope::ScopeRegion;

/// Items and block regions of one file.
///
/// Rebuilt wholesale by every pass. Only the post-pass flags of its items
/// change afterwards (see [`resolve`](crate::resolve::resolve)).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOutput {
    /// File identifier passed to [`parse`](crate::parse).
    pub file: String,
    /// Items in emission order; an [`ItemId`] indexes this vector.
    pub items: Vec<ParsedItem>,
    /// Regions of named blocks, in closing order.
    pub regions: Vec<ScopeRegion>,
    pub statement_count: u32,
    /// Byte length of the parsed text (BOM excluded).
    pub source_len: u32,
}

impl ParseOutput {
    #[inline]
    pub fn item(&self, id: ItemId) -> Option<&ParsedItem> {
        self.items.get(id.index())
    }

    /// Scope of the innermost named block containing `offset`.
    pub fn scope_at(&self, offset: u32) -> ScopeRef {
        self.regions
            .iter()
            .filter(|r| r.contains(offset))
            .min_by_key(|r| r.len())
            .map_or(ScopeRef::File, |r| r.scope)
    }

    /// `scope` followed by each enclosing scope, ending with the file scope.
    pub fn scope_chain(&self, scope: ScopeRef) -> Vec<ScopeRef> {
        let mut chain = vec![scope];
        let mut current = scope;
        // An owner is always emitted before anything it encloses, so the
        // walk strictly descends through item ids.
        while let Some(id) = current.item() {
            let parent = self.item(id).map_or(ScopeRef::File, |item| item.scope);
            if parent.item().is_some_and(|p| p >= id) {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        if chain.last() != Some(&ScopeRef::File) {
            chain.push(ScopeRef::File);
        }
        chain
    }

    /// Distance from `from` up to `target` along the scope chain, or `None`
    /// when `target` does not enclose `from`.
    pub fn scope_distance(&self, from: ScopeRef, target: ScopeRef) -> Option<usize> {
        self.scope_chain(from).iter().position(|s| *s == target)
    }

    /// Items with their ids, in emission order.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "item count is bounded by token count, which fits in u32"
    )]
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &ParsedItem)> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(idx, item)| (ItemId::new(idx as u32), item))
    }

    /// Items whose name matches `word` case-insensitively.
    pub fn items_named<'a>(
        &'a self,
        word: &'a str,
    ) -> impl Iterator<Item = (ItemId, &'a ParsedItem)> + 'a {
        self.iter().filter(move |(_, item)| item.name_matches(word))
    }
}
