//! ABL IR - shared types for the indexer pipeline
//!
//! This crate contains the data structures that flow between the tokenizer,
//! the statement parser, and the completion layer:
//! - Spans and line/column positions
//! - Tokens and `TokenList` for tokenizer output
//! - `ParseFlags`, the per-symbol facet bitmask
//! - `ParsedItem` and its kind-specific payloads
//! - `CompletionType`, the closed set of presentation categories
//! - Keyword spellings with their minimum abbreviations
//! - The database `Schema` supplied by the host
//!
//! # Design Philosophy
//!
//! - **Index, don't point**: scopes and back-references are `ItemId` keys into
//!   the owning item vector, so dropping a parse pass is a single `Vec` drop.
//! - **Build once**: tokens and items are never mutated after the pass that
//!   created them, except for the post-pass flag bits.

mod completion_type;
mod flags;
mod item;
pub mod keyword;
mod schema;
mod span;
mod token;

pub use completion_type::CompletionType;
pub use flags::{ParseFlags, RESERVED_BIT};
pub use item::{ItemId, ItemKind, Locator, ParsedItem, ScopeRef};
pub use keyword::Keyword;
pub use schema::{Database, Field, Schema, Table, TableRef};
pub use span::{Position, Span};
pub use token::{StatementId, Token, TokenIdx, TokenKind, TokenList};
