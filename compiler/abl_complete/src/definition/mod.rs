//! Go to definition inside one parsed file.

use abl_ir::{ItemId, Locator, ParsedItem};
use abl_parse::ParseOutput;
use tracing::trace;

/// Locate the definition of `word` as seen from `offset`.
///
/// Definitions visible from the caret win, the innermost scope first and
/// the earliest definition inside one scope. When nothing visible matches,
/// the first definition of that name anywhere in the file is used. Run and
/// trigger items never count as definitions.
pub fn find_definition(output: &ParseOutput, word: &str, offset: u32) -> Option<Locator> {
    let chain = output.scope_chain(output.scope_at(offset));

    let visible = definitions(output, word)
        .filter_map(|(id, item)| {
            let distance = chain.iter().position(|s| *s == item.scope)?;
            Some((distance, id, item))
        })
        .min_by_key(|(distance, id, _)| (*distance, *id));

    let found = match visible {
        Some((distance, _, item)) => {
            trace!(word, distance, "definition in scope");
            item
        }
        None => definitions(output, word).next().map(|(_, item)| item)?,
    };
    Some(found.locator(&output.file))
}

fn definitions<'a>(
    output: &'a ParseOutput,
    word: &'a str,
) -> impl Iterator<Item = (ItemId, &'a ParsedItem)> + 'a {
    output
        .items_named(word)
        .filter(|(_, item)| item.is_definition())
}
