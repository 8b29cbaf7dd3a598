use pretty_assertions::assert_eq;

use super::{toggle_comment, Toggle};

#[test]
fn wraps_each_line_after_indentation() {
    let result = toggle_comment("a = 1.\n  b = 2.\nc = 3.\n", 1, 2);
    assert_eq!(result.text, "/*a = 1.*/\n  /*b = 2.*/\nc = 3.\n");
    assert_eq!(result.toggle, Toggle::On);
}

#[test]
fn unwraps_when_first_line_is_commented() {
    let result = toggle_comment("/*a = 1.*/\n  /*b = 2.*/\nc = 3.\n", 1, 3);
    assert_eq!(result.text, "a = 1.\n  b = 2.\nc = 3.\n");
    assert_eq!(result.toggle, Toggle::Off);
}

#[test]
fn wrapping_nests_existing_comments() {
    let result = toggle_comment("x.\n/*y.*/\n/**/\n", 1, 3);
    assert_eq!(result.text, "/*x.*/\n/*/*y.*/*/\n\n");
}

#[test]
fn blank_lines_are_skipped_in_a_range() {
    let result = toggle_comment("a.\n\n   \nb.", 1, 4);
    assert_eq!(result.text, "/*a.*/\n\n   \n/*b.*/");
}

#[test]
fn single_blank_line_gets_an_empty_comment() {
    let result = toggle_comment("a.\n    \nb.\n", 2, 2);
    assert_eq!(result.text, "a.\n    /*  */\nb.\n");
    assert_eq!(result.toggle, Toggle::Unchanged);
}

#[test]
fn crlf_endings_are_kept() {
    let result = toggle_comment("a.\r\nb.\r\n", 1, 2);
    assert_eq!(result.text, "/*a.*/\r\n/*b.*/\r\n");
}

#[test]
fn out_of_range_lines_change_nothing() {
    let text = "a.\nb.\n";
    let result = toggle_comment(text, 5, 9);
    assert_eq!(result.text, text);
    assert_eq!(result.toggle, Toggle::Unchanged);
}
