//! Completion ranking.
//!
//! A [`Scorer`] turns one candidate into a ranking; higher sorts first.
//! The projection only ever compares rankings, so a host can swap in its
//! own scorer (for example one that learns from accepted completions).
//!
//! # Default scoring
//!
//! - Parser symbols start at `SCORE_PARSER_BASE`, static entries at zero
//! - Scope proximity adds up to `SCORE_SCOPE_MAX`, minus
//!   `SCORE_SCOPE_STEP` per enclosing scope between caret and symbol
//! - Categories add a small bonus by rank in [`CATEGORY_ORDER`]
//! - Abbreviated keyword spellings sit just below their full spelling

use abl_ir::{CompletionType, ParseFlags};

use crate::item::Provenance;

/// Base for parsed symbols, above every static entry.
const SCORE_PARSER_BASE: i32 = 1000;
/// Bonus for a symbol in the caret's own scope.
const SCORE_SCOPE_MAX: i32 = 300;
/// Lost per scope level between the caret and the symbol.
const SCORE_SCOPE_STEP: i32 = 100;
/// Spread of the category bonus; the first category gets this much.
const SCORE_CATEGORY_MAX: i32 = 80;
const SCORE_CATEGORY_STEP: i32 = 5;
/// Penalty for an abbreviated keyword spelling.
const SCORE_ABBREVIATION_PENALTY: i32 = -1;
/// Penalty for symbols carrying a warning facet.
const SCORE_WARNING_PENALTY: i32 = -10;

/// Categories by preference when everything else is equal.
pub const CATEGORY_ORDER: &[CompletionType] = &[
    CompletionType::VariablePrimitive,
    CompletionType::VariableComplex,
    CompletionType::Widget,
    CompletionType::TempTable,
    CompletionType::Field,
    CompletionType::FieldPk,
    CompletionType::Table,
    CompletionType::Function,
    CompletionType::Procedure,
    CompletionType::Preprocessed,
    CompletionType::Label,
    CompletionType::Database,
    CompletionType::Sequence,
    CompletionType::Snippet,
    CompletionType::KeywordObject,
    CompletionType::Keyword,
];

/// What a scorer sees of an entry.
#[derive(Copy, Clone, Debug)]
pub struct Candidate<'a> {
    pub text: &'a str,
    pub kind: CompletionType,
    pub flags: ParseFlags,
    pub provenance: Provenance,
    /// Scope levels from the caret up to the scope the symbol lives in.
    /// `None` without a caret, for static entries, and for symbols of
    /// other files.
    pub scope_distance: Option<usize>,
}

pub trait Scorer {
    fn score(&self, candidate: &Candidate<'_>) -> i32;
}

impl<F: Fn(&Candidate<'_>) -> i32> Scorer for F {
    fn score(&self, candidate: &Candidate<'_>) -> i32 {
        self(candidate)
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultScorer;

impl DefaultScorer {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "CATEGORY_ORDER has sixteen entries"
    )]
    fn category_score(kind: CompletionType) -> i32 {
        let index = CATEGORY_ORDER
            .iter()
            .position(|c| *c == kind)
            .unwrap_or(CATEGORY_ORDER.len());
        SCORE_CATEGORY_MAX - index as i32 * SCORE_CATEGORY_STEP
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "scope depth is tiny"
    )]
    fn scope_score(distance: Option<usize>) -> i32 {
        distance.map_or(0, |d| {
            let d = d.min(i32::MAX as usize) as i32;
            (SCORE_SCOPE_MAX - d.saturating_mul(SCORE_SCOPE_STEP)).max(0)
        })
    }
}

impl Scorer for DefaultScorer {
    fn score(&self, candidate: &Candidate<'_>) -> i32 {
        let mut score = match candidate.provenance {
            Provenance::Parser => SCORE_PARSER_BASE,
            Provenance::Static => 0,
        };
        score += Self::scope_score(candidate.scope_distance);
        score += Self::category_score(candidate.kind);
        if candidate.flags.contains(ParseFlags::ABBREVIATION) {
            score += SCORE_ABBREVIATION_PENALTY;
        }
        if candidate.flags.has_warning() {
            score += SCORE_WARNING_PENALTY;
        }
        score
    }
}

#[cfg(test)]
mod tests;
