use abl_ir::{CompletionType, ParseFlags};

use super::{Candidate, DefaultScorer, Scorer, CATEGORY_ORDER};
use crate::item::Provenance;

fn candidate(
    kind: CompletionType,
    provenance: Provenance,
    scope_distance: Option<usize>,
) -> Candidate<'static> {
    Candidate {
        text: "x",
        kind,
        flags: ParseFlags::empty(),
        provenance,
        scope_distance,
    }
}

fn score(c: &Candidate<'_>) -> i32 {
    DefaultScorer.score(c)
}

#[test]
fn category_order_lists_every_category_once() {
    for kind in CompletionType::ALL {
        assert_eq!(
            CATEGORY_ORDER.iter().filter(|c| **c == kind).count(),
            1,
            "{kind}"
        );
    }
}

#[test]
fn nearer_scopes_rank_higher() {
    let kind = CompletionType::VariablePrimitive;
    let own = score(&candidate(kind, Provenance::Parser, Some(0)));
    let parent = score(&candidate(kind, Provenance::Parser, Some(1)));
    let file = score(&candidate(kind, Provenance::Parser, Some(2)));
    let unknown = score(&candidate(kind, Provenance::Parser, None));
    assert!(own > parent);
    assert!(parent > file);
    assert!(file >= unknown);
}

#[test]
fn parser_symbols_beat_keywords() {
    let worst_parser = score(&candidate(CompletionType::Label, Provenance::Parser, None));
    let best_static = score(&candidate(
        CompletionType::VariablePrimitive,
        Provenance::Static,
        Some(0),
    ));
    assert!(worst_parser > best_static);
}

#[test]
fn abbreviations_sit_below_full_spellings() {
    let full = candidate(CompletionType::Keyword, Provenance::Static, None);
    let abbreviated = Candidate {
        flags: ParseFlags::ABBREVIATION,
        ..full
    };
    assert!(score(&full) > score(&abbreviated));
}

#[test]
fn warnings_lower_the_ranking() {
    let clean = candidate(CompletionType::Procedure, Provenance::Parser, Some(0));
    let flagged = Candidate {
        flags: ParseFlags::NOT_FOUND,
        ..clean
    };
    assert!(score(&clean) > score(&flagged));
}

#[test]
fn closures_are_scorers() {
    fn by_length(c: &Candidate<'_>) -> i32 {
        i32::try_from(c.text.len()).unwrap_or(0)
    }
    let c = candidate(CompletionType::Keyword, Provenance::Static, None);
    assert_eq!(by_length.score(&c), 1);
}
