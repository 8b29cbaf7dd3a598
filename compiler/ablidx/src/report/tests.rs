use abl_complete::Projection;
use abl_parse::parse;
use pretty_assertions::assert_eq;

use super::{CompletionRow, FileSummary, ItemRow, TokenRow};

#[test]
fn item_rows_name_their_scope() {
    let output = parse(
        "a.p",
        "PROCEDURE calc:\n  DEFINE VARIABLE n AS INT NO-UNDO.\nEND.\n",
    );
    let mut text = String::new();
    for item in &output.items {
        ItemRow::new(&output, item).render(&mut text);
    }
    assert_eq!(
        text,
        "1:1 procedure calc (Procedure) [FILE_SCOPE]\n\
         2:3 variable n (VariablePrimitive) : INTEGER in calc [LOCAL_SCOPE]\n"
    );
}

#[test]
fn item_rows_serialize_flag_names() {
    let output = parse("a.p", "DEFINE NEW SHARED VARIABLE s AS CHAR.\n");
    let json = serde_json::to_value(ItemRow::new(&output, &output.items[0]))
        .unwrap_or_default();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "s",
            "kind": "variable",
            "category": "VariablePrimitive",
            "line": 1,
            "column": 1,
            "scope": null,
            "detail": "CHARACTER",
            "flags": ["FILE_SCOPE", "NEW", "SHARED"],
        })
    );
}

#[test]
fn completion_rows_carry_locators() {
    let output = parse("a.p", "DEFINE VARIABLE total AS DECIMAL.\n");
    let items = Projection::new().without_keywords().with_output(&output).build();
    let json = serde_json::to_value(CompletionRow::new(&items[0])).unwrap_or_default();
    assert_eq!(json["text"], "total");
    assert_eq!(json["provenance"], "parser");
    assert_eq!(json["locator"]["file"], "a.p");
    assert_eq!(json["locator"]["line"], 1);
}

#[test]
fn token_rows_list_every_token() {
    let tokens = abl_lexer::lex("x = 1.");
    let rows = TokenRow::all(&tokens);
    assert_eq!(rows.len(), tokens.len());
    assert_eq!(rows[0].kind, "Word");
    assert_eq!(rows[0].text, "x");
    assert_eq!(rows.last().map(|r| r.kind.as_str()), Some("EndOfFile"));
}

#[test]
fn summaries_list_warnings_only() {
    let output = parse("a.p", "RUN VALUE(prog).\nDEFINE VARIABLE ok AS INT.\n");
    let summary = FileSummary::new(&output);
    assert_eq!(summary.items, 2);
    assert_eq!(summary.warnings.len(), 1);
    let mut text = String::new();
    summary.render(&mut text);
    assert_eq!(
        text,
        "a.p: 2 statements, 2 items\n  warning 1:1 run prog (Procedure) [FILE_SCOPE UNCERTAIN]\n"
    );
}
