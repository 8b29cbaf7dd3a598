use abl_ir::{CompletionType, ParseFlags};
use pretty_assertions::assert_eq;

use super::{lookup, KeywordType, KEYWORDS};

#[test]
fn table_is_sorted_and_unique() {
    for pair in KEYWORDS.windows(2) {
        assert!(
            pair[0].keyword.name() < pair[1].keyword.name(),
            "{} before {}",
            pair[0].keyword.name(),
            pair[1].keyword.name()
        );
    }
}

#[test]
fn abbreviable_keywords_have_two_spellings() {
    let define = lookup("DEFINE").map(|e| e.spellings().collect::<Vec<_>>());
    assert_eq!(
        define,
        Some(vec![
            ("DEFINE", ParseFlags::RESERVED),
            ("DEF", ParseFlags::RESERVED | ParseFlags::ABBREVIATION),
        ])
    );

    let message = lookup("message").map(|e| e.spellings().count());
    assert_eq!(message, Some(1));
}

#[test]
fn unreserved_keywords_carry_no_reserved_flag() {
    let button = lookup("BUT").map(|e| e.spellings().collect::<Vec<_>>());
    assert_eq!(
        button,
        Some(vec![
            ("BUTTON", ParseFlags::empty()),
            ("BUT", ParseFlags::ABBREVIATION),
        ])
    );
}

#[test]
fn lookup_honors_minimum_length() {
    assert!(lookup("AVAIL").is_some());
    assert!(lookup("AVAI").is_none());
    assert!(lookup("").is_none());
}

#[test]
fn objects_project_to_keyword_object() {
    assert_eq!(KeywordType::Object.completion_type(), CompletionType::KeywordObject);
    assert_eq!(KeywordType::Statement.completion_type(), CompletionType::Keyword);
    assert!(KEYWORDS
        .iter()
        .all(|e| e.kind.completion_type().is_keyword()));
}

#[test]
fn parser_keywords_are_in_the_table() {
    use abl_ir::keyword as kw;
    for keyword in [kw::DEFINE, kw::PROCEDURE, kw::GLOBAL_DEFINE, kw::VARIABLE, kw::PERSISTENT] {
        let entry = lookup(keyword.name()).map(|e| e.keyword);
        assert_eq!(entry, Some(keyword));
    }
}
