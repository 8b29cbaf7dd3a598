//! Completion lists and go-to-definition over parsed ABL files.
//!
//! Everything here is a pure function of its inputs: parse outputs, the
//! static keyword table, and an optional database schema. A completion list
//! is rebuilt from scratch for every request by [`Projection`] and then
//! narrowed by [`filter`] as the user types.
//!
//! ```
//! use abl_complete::{filter, Projection};
//!
//! let output = abl_parse::parse("main.p", "DEFINE VARIABLE custName AS CHAR.\n");
//! let items = Projection::new().with_output(&output).build();
//! let matches = filter(&items, "cust");
//! assert_eq!(matches[0].text, "custName");
//! ```

mod definition;
mod item;
mod keywords;
mod projection;
mod score;

pub use definition::find_definition;
pub use item::{CompletionItem, Provenance};
pub use keywords::{lookup as lookup_keyword, KeywordEntry, KeywordType, KEYWORDS};
pub use projection::{filter, Caret, Projection};
pub use score::{Candidate, DefaultScorer, Scorer, CATEGORY_ORDER};
