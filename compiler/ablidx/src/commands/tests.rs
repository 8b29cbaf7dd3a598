use std::path::Path;

use pretty_assertions::assert_eq;

use super::{line_column_offset, parse_position, run, word_at, word_before, USAGE};
use crate::error::Error;

fn invoke(args: &[&str]) -> Result<String, Error> {
    let args: Vec<String> = args.iter().map(|s| (*s).to_owned()).collect();
    let mut out = Vec::new();
    run(&args, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn write(dir: &Path, name: &str, text: &str) -> String {
    let path = dir.join(name);
    let _ = std::fs::write(&path, text);
    path.to_string_lossy().into_owned()
}

#[test]
fn no_arguments_prints_usage() {
    assert_eq!(invoke(&[]).ok(), Some(USAGE.to_owned()));
    assert_eq!(invoke(&["help"]).ok(), Some(USAGE.to_owned()));
}

#[test]
fn version_names_the_binary() {
    let text = invoke(&["version"]).unwrap_or_default();
    assert!(text.starts_with("ablidx "));
}

#[test]
fn unknown_commands_and_missing_arguments_are_errors() {
    assert!(matches!(invoke(&["frobnicate"]), Err(Error::InvalidArgument(_))));
    assert!(matches!(invoke(&["items"]), Err(Error::InvalidArgument(_))));
    assert!(matches!(invoke(&["index"]), Err(Error::InvalidArgument(_))));
    assert!(matches!(
        invoke(&["toggle-comment", "x.p", "3", "1"]),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn unreadable_files_are_io_errors() {
    let result = invoke(&["items", "/no/such/file.p"]);
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn items_of_a_latin1_file() {
    let Ok(dir) = tempfile::tempdir() else { return };
    let path = dir.path().join("legacy.p");
    assert!(std::fs::write(&path, b"/* caf\xe9 */ DEFINE VARIABLE x AS INT.\n").is_ok());
    let text = invoke(&["items", &path.to_string_lossy()]).unwrap_or_default();
    assert!(text.contains("variable x (VariablePrimitive) : INTEGER"));
}

#[test]
fn items_as_text() {
    let Ok(dir) = tempfile::tempdir() else { return };
    let file = write(dir.path(), "a.p", "DEFINE VARIABLE n AS INT.\n");
    let text = invoke(&["items", &file]).unwrap_or_default();
    assert_eq!(text, "1:1 variable n (VariablePrimitive) : INTEGER [FILE_SCOPE]\n");
}

#[test]
fn items_as_json() {
    let Ok(dir) = tempfile::tempdir() else { return };
    let file = write(dir.path(), "a.p", "PROCEDURE p:\nEND.\n");
    let text = invoke(&["items", &file, "--json"]).unwrap_or_default();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap_or_default();
    assert_eq!(json[0]["name"], "p");
    assert_eq!(json[0]["kind"], "procedure");
}

#[test]
fn index_reports_warnings() {
    let Ok(dir) = tempfile::tempdir() else { return };
    write(dir.path(), "main.p", "RUN gone.p.\n");
    let propath = format!("--propath={}", dir.path().display());
    let root = dir.path().to_string_lossy().into_owned();
    let text = invoke(&["index", &root, &propath]).unwrap_or_default();
    assert!(text.contains("main.p: 1 statements, 1 items"), "{text}");
    assert!(text.contains("NOT_FOUND"), "{text}");
}

#[test]
fn complete_uses_the_word_before_the_caret() {
    let Ok(dir) = tempfile::tempdir() else { return };
    let file = write(
        dir.path(),
        "a.p",
        "DEFINE VARIABLE custName AS CHAR.\nDEFINE VARIABLE custNum AS INT.\ncu",
    );
    let text = invoke(&["complete", &file, "3:3"]).unwrap_or_default();
    let names: Vec<_> = text
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .collect();
    assert_eq!(names.first(), Some(&"custName"));
    assert!(names.contains(&"custNum"));
    assert!(names.iter().all(|n| n.to_ascii_lowercase().contains("cu")));
}

#[test]
fn goto_finds_definitions_in_other_roots() {
    let Ok(dir) = tempfile::tempdir() else { return };
    let lib = write(dir.path(), "lib.i", "DEFINE VARIABLE gCount AS INT.\n");
    let file = write(dir.path(), "main.p", "gCount = 1.\n");
    let index = format!("--index={lib}");
    let text = invoke(&["goto", &file, "1:3", &index]).unwrap_or_default();
    assert_eq!(text, format!("{}:1:1\n", lib.replace('\\', "/")));

    let text = invoke(&["goto", &file, "1:3", "unknownWord"]).unwrap_or_default();
    assert_eq!(text, "no definition found for 'unknownWord'\n");
}

#[test]
fn lex_lists_tokens() {
    let Ok(dir) = tempfile::tempdir() else { return };
    let file = write(dir.path(), "a.p", "x.");
    let text = invoke(&["lex", &file]).unwrap_or_default();
    let kinds: Vec<_> = text
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(kinds, vec!["Word", "EndOfStatement", "EndOfFile"]);
}

#[test]
fn toggle_comment_prints_the_new_text() {
    let Ok(dir) = tempfile::tempdir() else { return };
    let file = write(dir.path(), "a.p", "a.\nb.\nc.\n");
    let text = invoke(&["toggle-comment", &file, "2", "3"]).unwrap_or_default();
    assert_eq!(text, "a.\n/*b.*/\n/*c.*/\n");
    let json = invoke(&["toggle-comment", &file, "1", "--format=json"]).unwrap_or_default();
    let json: serde_json::Value = serde_json::from_str(&json).unwrap_or_default();
    assert_eq!(json["toggle"], "on");
    assert_eq!(json["text"], "/*a.*/\nb.\nc.\n");
}

#[test]
fn positions_accept_line_column_and_offsets() {
    let source = "ab\ncdé f\n";
    assert_eq!(parse_position(source, "2:1").ok(), Some(3));
    assert_eq!(parse_position(source, "2:5").ok(), Some(8));
    assert_eq!(parse_position(source, "7").ok(), Some(7));
    assert_eq!(parse_position(source, "6").ok(), Some(5));
    assert_eq!(parse_position(source, "999").ok(), Some(10));
    assert!(parse_position(source, "0:1").is_err());
    assert!(parse_position(source, "x").is_err());
    assert_eq!(line_column_offset(source, 9, 1), Some(10));
}

#[test]
fn words_around_the_caret() {
    let source = "RUN lib/util.p.\nx = cust";
    assert_eq!(word_at(source, 6), "lib/util.p");
    assert_eq!(word_at(source, 0), "RUN");
    assert_eq!(word_at(source, 3), "RUN");
    assert_eq!(word_before(source, 24), "cust");
    assert_eq!(word_before(source, 22), "cu");
    assert_eq!(word_before(source, 20), "");
}
