//! Statement recognizers.
//!
//! One module per statement family. Each `recognize` function is entered
//! with the cursor just past the statement's leading keyword and may read
//! up to, never past, the statement terminator. Recognizers emit items and
//! set the pending scope through the [`ParseContext`](crate::context::ParseContext);
//! they return nothing, because an incomplete statement simply yields fewer
//! items.

pub(crate) mod create;
pub(crate) mod define;
pub(crate) mod function;
pub mod on_event;
pub(crate) mod preprocessor;
pub(crate) mod procedure;
pub(crate) mod run;

use abl_ir::keyword::{self, primitive_type};

use crate::cursor::TokenCursor;

/// Strip the quotes (and any translation attribute) off a string token.
///
/// Text that is not a quoted string is returned unchanged.
pub fn unquote(text: &str) -> &str {
    let Some(quote) = text.chars().next().filter(|c| *c == '"' || *c == '\'') else {
        return text;
    };
    let body = &text[quote.len_utf8()..];
    match body.rfind(quote) {
        Some(end) => &body[..end],
        None => body,
    }
}

/// A data type read after `AS`.
pub(crate) struct DataType {
    pub name: String,
    pub primitive: bool,
}

/// Read the type after `AS`, honoring an optional `CLASS` keyword and
/// canonicalizing primitive spellings (`CHAR` becomes `CHARACTER`).
pub(crate) fn data_type_after_as(cursor: &mut TokenCursor<'_>) -> Option<DataType> {
    cursor.eat_keyword(keyword::CLASS);
    let ty = cursor.bump()?;
    Some(match primitive_type(ty.text) {
        Some(name) => DataType {
            name: name.to_owned(),
            primitive: true,
        },
        None => DataType {
            name: ty.text.to_owned(),
            primitive: false,
        },
    })
}

#[cfg(test)]
mod tests;
