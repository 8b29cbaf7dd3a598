//! `ON event-list OF widget-list` trigger recognizer.
//!
//! ```text
//! ON event-list
//!    { ANYWHERE
//!    | OF widget-list [ OR event-list OF widget-list ]... [ ANYWHERE ] }
//!    { trigger-block | REVERT | PERSISTENT RUN procedure }
//! ON key-label key-function
//! ```
//!
//! [`OnEventMachine`] is the transition function alone: it is fed one
//! significant token at a time (plus the significant token after it) and
//! answers with a [`Step`]. [`recognize`] drives it from a cursor and turns
//! emitted clauses into items.

use abl_ir::{ItemKind, ParseFlags, TokenKind};
use tracing::trace;

use super::unquote;
use crate::context::ParseContext;
use crate::cursor::{Lexeme, TokenCursor};

/// Raw tokens skipped after an `IN` that does not introduce `FRAME`
/// (`IN BROWSE b` is whitespace, `BROWSE`, whitespace, `b`).
const IN_QUALIFIER_TOKENS: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OnState {
    /// Expecting an event name.
    Event,
    /// After an event: `,`, `ANYWHERE`, `OF`, or a key function.
    AfterEvent,
    /// Expecting a widget name.
    Widget,
    /// After a widget: `,`, `IN`, `OR`, or the start of the trigger body.
    AfterWidget,
    Done,
}

/// One `events OF widgets` clause.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Clause {
    pub events: Vec<String>,
    pub widgets: Vec<String>,
}

/// Answer of one transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// Skip this many further raw tokens, never past the statement end.
    Skip(usize),
    /// Emit the clause and keep going with empty accumulators.
    Emit(Clause),
    /// Emit the clause; the statement's trigger header is over.
    EmitAndStop(Clause),
    Stop,
}

/// Kind and text of a token fed to the machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Input<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Input<'a> {
    pub fn new(kind: TokenKind, text: &'a str) -> Self {
        Input { kind, text }
    }

    fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Word && self.text.eq_ignore_ascii_case(word)
    }

    fn is_comma(&self) -> bool {
        self.kind == TokenKind::Symbol && self.text == ","
    }
}

impl<'a> From<Lexeme<'a>> for Input<'a> {
    fn from(lex: Lexeme<'a>) -> Self {
        Input::new(lex.kind, lex.text)
    }
}

#[derive(Debug)]
pub struct OnEventMachine {
    state: OnState,
    events: Vec<String>,
    widgets: Vec<String>,
}

impl Default for OnEventMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl OnEventMachine {
    pub fn new() -> Self {
        OnEventMachine {
            state: OnState::Event,
            events: Vec::new(),
            widgets: Vec::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> OnState {
        self.state
    }

    /// Feed the next significant token.
    ///
    /// `next` is the significant token after `token`, if the statement has
    /// one. Trivia must not be fed.
    pub fn step(&mut self, token: Input<'_>, next: Option<Input<'_>>) -> Step {
        match self.state {
            OnState::Done => Step::Stop,

            OnState::Event => {
                if matches!(
                    token.kind,
                    TokenKind::Word | TokenKind::String | TokenKind::Symbol
                ) {
                    self.events.push(unquote(token.text).to_owned());
                    self.state = OnState::AfterEvent;
                }
                Step::Continue
            }

            OnState::AfterEvent => {
                if token.is_comma() {
                    self.state = OnState::Event;
                    return Step::Continue;
                }
                if token.kind != TokenKind::Word {
                    return Step::Continue;
                }
                if token.is_word("of") {
                    self.state = OnState::Widget;
                    return Step::Continue;
                }
                // `ANYWHERE`, or `ON key-label key-function`.
                let target = if token.is_word("anywhere") {
                    "anywhere"
                } else {
                    token.text
                };
                self.widgets.push(target.to_owned());
                self.stop_with_clause()
            }

            OnState::Widget => {
                if matches!(token.kind, TokenKind::Word | TokenKind::String)
                    && !token.is_word("frame")
                {
                    self.widgets.push(unquote(token.text).to_owned());
                    self.state = OnState::AfterWidget;
                }
                Step::Continue
            }

            OnState::AfterWidget => {
                if token.is_comma() {
                    self.state = OnState::Widget;
                    return Step::Continue;
                }
                if token.kind != TokenKind::Word {
                    return Step::Continue;
                }
                if token.is_word("in") && !next.is_some_and(|n| n.is_word("frame")) {
                    return Step::Skip(IN_QUALIFIER_TOKENS);
                }
                if token.is_word("or") {
                    self.state = OnState::Event;
                    return Step::Emit(self.take_clause());
                }
                self.stop_with_clause()
            }
        }
    }

    /// Statement end reached. Flushes a clause whose widget list is still
    /// open (`ON CHOOSE OF a, b:`).
    pub fn finish(&mut self) -> Option<Clause> {
        let flush = self.state == OnState::AfterWidget && !self.widgets.is_empty();
        self.state = OnState::Done;
        flush.then(|| self.take_clause())
    }

    fn take_clause(&mut self) -> Clause {
        Clause {
            events: std::mem::take(&mut self.events),
            widgets: std::mem::take(&mut self.widgets),
        }
    }

    fn stop_with_clause(&mut self) -> Step {
        self.state = OnState::Done;
        Step::EmitAndStop(self.take_clause())
    }
}

/// Recognize an ON statement. The cursor sits after `ON`.
pub(crate) fn recognize(cursor: &mut TokenCursor<'_>, ctx: &mut ParseContext, on: &Lexeme<'_>) {
    let mut machine = OnEventMachine::new();

    while let Some(token) = cursor.bump() {
        let next = cursor.peek_significant(0).map(Input::from);
        let step = machine.step(token.into(), next);
        trace!(text = token.text, state = ?machine.state(), step = ?step, "on-event step");
        match step {
            Step::Continue => {}
            Step::Skip(n) => cursor.skip_raw_in_statement(n),
            Step::Emit(clause) => emit_clause(ctx, on, clause),
            Step::EmitAndStop(clause) => {
                emit_clause(ctx, on, clause);
                return;
            }
            Step::Stop => return,
        }
    }

    if let Some(clause) = machine.finish() {
        emit_clause(ctx, on, clause);
    }
}

/// One item per widget, each carrying the full event list. The first item
/// of the clause becomes the pending scope.
fn emit_clause(ctx: &mut ParseContext, on: &Lexeme<'_>, clause: Clause) {
    let event_text = clause.events.join(", ");
    let mut first = None;
    for widget in &clause.widgets {
        let id = ctx.emit(
            format!("{event_text} {widget}"),
            ItemKind::OnEvent {
                events: clause.events.clone(),
                widgets: vec![widget.clone()],
            },
            on,
            ParseFlags::empty(),
        );
        first.get_or_insert(id);
    }
    if let Some(id) = first {
        ctx.push_scope(id);
    }
}

#[cfg(test)]
mod tests;
