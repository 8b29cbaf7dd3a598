use abl_ir::TokenKind::{self, String as Str, Symbol, Word};
use pretty_assertions::assert_eq;

use super::{Clause, Input, OnEventMachine, OnState, Step};

fn clause(events: &[&str], widgets: &[&str]) -> Clause {
    Clause {
        events: events.iter().map(|s| (*s).to_owned()).collect(),
        widgets: widgets.iter().map(|s| (*s).to_owned()).collect(),
    }
}

/// Drive the machine over significant tokens, returning every step. Skips
/// are reported but not applied; callers feed post-skip tokens themselves.
fn drive(tokens: &[(TokenKind, &str)]) -> (Vec<Step>, Option<Clause>) {
    let mut machine = OnEventMachine::new();
    let mut steps = Vec::new();
    for (i, (kind, text)) in tokens.iter().enumerate() {
        let next = tokens.get(i + 1).map(|(k, t)| Input::new(*k, t));
        let step = machine.step(Input::new(*kind, text), next);
        let stop = matches!(step, Step::EmitAndStop(_) | Step::Stop);
        steps.push(step);
        if stop {
            return (steps, None);
        }
    }
    (steps, machine.finish())
}

fn emitted(steps: &[Step], tail: Option<Clause>) -> Vec<Clause> {
    steps
        .iter()
        .filter_map(|s| match s {
            Step::Emit(c) | Step::EmitAndStop(c) => Some(c.clone()),
            _ => None,
        })
        .chain(tail)
        .collect()
}

#[test]
fn widget_list_is_flushed_at_statement_end() {
    let (steps, tail) = drive(&[
        (Word, "CHOOSE"),
        (Word, "OF"),
        (Word, "btnOk"),
        (Symbol, ","),
        (Word, "btnCancel"),
    ]);
    assert_eq!(
        emitted(&steps, tail),
        vec![clause(&["CHOOSE"], &["btnOk", "btnCancel"])]
    );
}

#[test]
fn anywhere_stops_immediately() {
    let (steps, tail) = drive(&[(Str, "\"WEB-NOTIFY\""), (Word, "ANYWHERE"), (Word, "DO")]);
    assert_eq!(steps.len(), 2);
    assert_eq!(
        emitted(&steps, tail),
        vec![clause(&["WEB-NOTIFY"], &["anywhere"])]
    );
}

#[test]
fn key_label_form() {
    let (steps, tail) = drive(&[(Word, "F1"), (Word, "HELP")]);
    assert_eq!(emitted(&steps, tail), vec![clause(&["F1"], &["HELP"])]);
}

#[test]
fn event_list_with_commas() {
    let (steps, tail) = drive(&[
        (Word, "ENTRY"),
        (Symbol, ","),
        (Word, "LEAVE"),
        (Word, "OF"),
        (Word, "fill-in1"),
        (Word, "DO"),
    ]);
    assert_eq!(
        emitted(&steps, tail),
        vec![clause(&["ENTRY", "LEAVE"], &["fill-in1"])]
    );
}

#[test]
fn in_before_frame_ends_the_clause() {
    let (steps, tail) = drive(&[
        (Word, "CHOOSE"),
        (Word, "OF"),
        (Word, "btn"),
        (Word, "IN"),
        (Word, "FRAME"),
        (Word, "fMain"),
    ]);
    assert_eq!(steps.last(), Some(&Step::EmitAndStop(clause(&["CHOOSE"], &["btn"]))));
    assert_eq!(tail, None);
}

#[test]
fn frame_lookahead_is_case_insensitive() {
    let mut machine = OnEventMachine::new();
    machine.step(Input::new(Word, "choose"), None);
    machine.step(Input::new(Word, "of"), None);
    machine.step(Input::new(Word, "btn"), None);
    let step = machine.step(Input::new(Word, "in"), Some(Input::new(Word, "Frame")));
    assert!(matches!(step, Step::EmitAndStop(_)));
}

#[test]
fn in_before_other_qualifier_requests_a_skip() {
    let mut machine = OnEventMachine::new();
    machine.step(Input::new(Word, "CHOOSE"), None);
    machine.step(Input::new(Word, "OF"), None);
    machine.step(Input::new(Word, "col1"), None);
    let step = machine.step(Input::new(Word, "IN"), Some(Input::new(Word, "BROWSE")));
    assert_eq!(step, Step::Skip(4));
    assert_eq!(machine.state(), OnState::AfterWidget);
}

#[test]
fn or_resets_both_accumulators() {
    let (steps, tail) = drive(&[
        (Word, "CHOOSE"),
        (Word, "OF"),
        (Word, "b1"),
        (Word, "OR"),
        (Word, "CHOOSE"),
        (Word, "OF"),
        (Word, "b2"),
    ]);
    assert_eq!(
        emitted(&steps, tail),
        vec![clause(&["CHOOSE"], &["b1"]), clause(&["CHOOSE"], &["b2"])]
    );
}

#[test]
fn frame_keyword_is_not_a_widget() {
    let (steps, tail) = drive(&[
        (Word, "GO"),
        (Word, "OF"),
        (Word, "FRAME"),
        (Word, "fMain"),
        (Word, "DO"),
    ]);
    assert_eq!(emitted(&steps, tail), vec![clause(&["GO"], &["fMain"])]);
}

#[test]
fn no_in_token_never_skips() {
    let (steps, _) = drive(&[
        (Word, "CHOOSE"),
        (Word, "OF"),
        (Word, "a"),
        (Symbol, ","),
        (Word, "b"),
        (Word, "OR"),
        (Word, "LEAVE"),
        (Word, "OF"),
        (Word, "c"),
        (Word, "DO"),
    ]);
    assert!(!steps.iter().any(|s| matches!(s, Step::Skip(_))));
}

#[test]
fn no_flush_outside_widget_list() {
    let (steps, tail) = drive(&[(Word, "CHOOSE"), (Word, "OF")]);
    assert_eq!(emitted(&steps, tail), Vec::<Clause>::new());
}

#[test]
fn done_machine_stops() {
    let mut machine = OnEventMachine::new();
    machine.step(Input::new(Word, "X"), None);
    machine.step(Input::new(Word, "ANYWHERE"), None);
    assert_eq!(machine.state(), OnState::Done);
    assert_eq!(machine.step(Input::new(Word, "Y"), None), Step::Stop);
    assert_eq!(machine.finish(), None);
}
