//! Text edits the command line offers on top of the index.

use serde::Serialize;

/// Direction a [`toggle_comment`] call went.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    /// Lines were wrapped in `/* */`.
    On,
    /// Wrapped lines were unwrapped.
    Off,
    /// Nothing to do (only blank lines in the range).
    Unchanged,
}

/// Result of a [`toggle_comment`] call.
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct ToggledText {
    pub text: String,
    pub toggle: Toggle,
}

/// Toggle `/* */` comments on lines `first..=last` (1-based) of `text`.
///
/// The first non-blank line decides the direction: if it is already
/// wrapped, wrapped lines are unwrapped; otherwise every non-blank line is
/// wrapped after its indentation. A lone blank line receives an empty
/// comment. Line endings are preserved and lines outside the range are
/// left untouched.
pub fn toggle_comment(text: &str, first: usize, last: usize) -> ToggledText {
    let single = first == last;
    let mut toggle = Toggle::Unchanged;
    let mut out = String::with_capacity(text.len() + 8);

    for (idx, line) in text.split_inclusive('\n').enumerate() {
        let number = idx + 1;
        if number < first || number > last {
            out.push_str(line);
            continue;
        }

        let (content, ending) = split_ending(line);
        let body_start = content.len() - content.trim_start_matches([' ', '\t']).len();
        let (indent, body) = content.split_at(body_start);
        out.push_str(indent);

        if body.is_empty() {
            if single {
                out.push_str("/*  */");
            }
        } else if let Some(inner) = wrapped(body) {
            if toggle == Toggle::Unchanged {
                toggle = Toggle::Off;
            }
            if toggle == Toggle::On && !inner.is_empty() {
                out.push_str("/*");
                out.push_str(body);
                out.push_str("*/");
            } else {
                out.push_str(inner);
            }
        } else {
            if toggle == Toggle::Unchanged {
                toggle = Toggle::On;
            }
            if toggle == Toggle::On {
                out.push_str("/*");
                out.push_str(body);
                out.push_str("*/");
            } else {
                out.push_str(body);
            }
        }
        out.push_str(ending);
    }

    ToggledText { text: out, toggle }
}

fn split_ending(line: &str) -> (&str, &str) {
    let content = line
        .strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line);
    line.split_at(content.len())
}

/// The text between `/*` and `*/` when `body` is exactly one such pair.
fn wrapped(body: &str) -> Option<&str> {
    if body.len() < 4 {
        return None;
    }
    body.strip_prefix("/*")?.strip_suffix("*/")
}

#[cfg(test)]
mod tests;
