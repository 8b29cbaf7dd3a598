use super::*;

// === Abbreviation matching ===

#[test]
fn define_accepts_every_truncation() {
    for word in ["def", "DEFI", "Defin", "DEFINE"] {
        assert!(DEFINE.matches(word), "{word} should match DEFINE");
    }
}

#[test]
fn too_short_or_too_long_is_rejected() {
    assert!(!DEFINE.matches("de"));
    assert!(!DEFINE.matches("defines"));
    assert!(!DEFINE.matches(""));
}

#[test]
fn full_keywords_need_full_spelling() {
    assert!(FUNCTION.matches("function"));
    assert!(!FUNCTION.matches("func"));
    assert!(!FUNCTION.has_abbreviation());
}

#[test]
fn abbreviation_is_the_minimum_prefix() {
    assert_eq!(VARIABLE.abbreviation(), "VAR");
    assert_eq!(PROCEDURE.abbreviation(), "PROCE");
    assert_eq!(RUN.abbreviation(), "RUN");
}

#[test]
fn preprocessor_directives() {
    assert!(GLOBAL_DEFINE.matches("&glob"));
    assert!(GLOBAL_DEFINE.matches("&GLOBAL-DEFINE"));
    assert!(SCOPED_DEFINE.matches("&Scoped-Def"));
    assert!(!SCOPED_DEFINE.matches("&SCO"));
}

#[test]
fn non_ascii_word_does_not_panic() {
    assert!(!DEFINE.matches("dé"));
    assert!(!DEFINE.matches("défi"));
}

// === Primitive types ===

#[test]
fn primitive_types_resolve_to_full_name() {
    assert_eq!(primitive_type("char"), Some("CHARACTER"));
    assert_eq!(primitive_type("INT"), Some("INTEGER"));
    assert_eq!(primitive_type("int64"), Some("INT64"));
    assert_eq!(primitive_type("dec"), Some("DECIMAL"));
    assert_eq!(primitive_type("datetime-tz"), Some("DATETIME-TZ"));
    assert_eq!(primitive_type("Progress.Lang.Object"), None);
}

#[test]
fn any_matches_over_a_set() {
    let widgets = [BUTTON, FRAME, BROWSE];
    assert!(any_matches(&widgets, "but"));
    assert!(!any_matches(&widgets, "query"));
}
