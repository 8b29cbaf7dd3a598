use abl_ir::{ItemId, ItemKind, ParseFlags, ParsedItem, ScopeRef};
use pretty_assertions::assert_eq;

use super::unquote;
use crate::parse;

fn items(source: &str) -> Vec<ParsedItem> {
    parse("test.p", source).items
}

fn only(source: &str) -> ParsedItem {
    let mut all = items(source);
    assert_eq!(all.len(), 1, "expected one item from {source:?}: {all:#?}");
    all.remove(0)
}

// === unquote ===

#[test]
fn unquote_strips_quotes_and_attributes() {
    assert_eq!(unquote("\"abc\""), "abc");
    assert_eq!(unquote("'abc'"), "abc");
    assert_eq!(unquote("\"abc\":U"), "abc");
    assert_eq!(unquote("'x':L20"), "x");
    assert_eq!(unquote("\"open"), "open");
    assert_eq!(unquote("plain"), "plain");
    assert_eq!(unquote(""), "");
}

// === DEFINE VARIABLE / PARAMETER ===

#[test]
fn variable_with_primitive_type() {
    let item = only("DEFINE VARIABLE cName AS CHARACTER NO-UNDO.");
    assert_eq!(item.name, "cName");
    assert_eq!(
        item.kind,
        ItemKind::Variable {
            data_type: "CHARACTER".into(),
            primitive: true
        }
    );
    assert_eq!(item.flags, ParseFlags::FILE_SCOPE);
}

#[test]
fn abbreviated_define_with_extent() {
    let item = only("def var i as int extent 3 no-undo.");
    assert_eq!(
        item.kind,
        ItemKind::Variable {
            data_type: "INTEGER".into(),
            primitive: true
        }
    );
    assert_eq!(item.flags, ParseFlags::FILE_SCOPE | ParseFlags::EXTENT);
}

#[test]
fn storage_modifiers_become_flags() {
    let item = only("DEFINE NEW GLOBAL SHARED VARIABLE gUser AS CHARACTER.");
    assert_eq!(
        item.flags,
        ParseFlags::NEW | ParseFlags::GLOBAL | ParseFlags::SHARED | ParseFlags::FILE_SCOPE
    );

    let item = only("DEFINE PRIVATE VARIABLE hidden AS LOGICAL.");
    assert!(item.flags.contains(ParseFlags::PRIVATE));
    assert!(!item.flags.contains(ParseFlags::GLOBAL));
}

#[test]
fn like_and_class_types_are_complex() {
    let item = only("DEFINE VARIABLE cc LIKE Customer.Name.");
    assert_eq!(
        item.kind,
        ItemKind::Variable {
            data_type: "Customer.Name".into(),
            primitive: false
        }
    );

    let item = only("DEFINE VARIABLE oList AS CLASS Progress.Lang.Object.");
    assert_eq!(
        item.kind,
        ItemKind::Variable {
            data_type: "Progress.Lang.Object".into(),
            primitive: false
        }
    );
}

#[test]
fn variable_without_type_is_kept() {
    let item = only("DEFINE VARIABLE x.");
    assert_eq!(
        item.kind,
        ItemKind::Variable {
            data_type: String::new(),
            primitive: true
        }
    );
}

#[test]
fn parameters_carry_the_parameter_flag() {
    let all = items(
        "DEFINE INPUT PARAMETER pcName AS CHARACTER NO-UNDO.\n\
         DEFINE OUTPUT PARAMETER plOk AS LOGICAL NO-UNDO.\n\
         DEFINE INPUT PARAMETER TABLE FOR ttData.\n\
         DEFINE PARAMETER BUFFER bCust FOR Customer.\n",
    );
    let summary: Vec<_> = all.iter().map(|i| (i.name.as_str(), i.flags)).collect();
    assert_eq!(
        summary,
        vec![
            ("pcName", ParseFlags::PARAMETER | ParseFlags::FILE_SCOPE),
            ("plOk", ParseFlags::PARAMETER | ParseFlags::FILE_SCOPE),
            (
                "bCust",
                ParseFlags::PARAMETER | ParseFlags::BUFFER | ParseFlags::FILE_SCOPE
            ),
        ]
    );
}

// === BUFFER / TEMP-TABLE ===

#[test]
fn buffers_know_whether_they_cover_a_temp_table() {
    let all = items(
        "DEFINE BUFFER bCust FOR Customer.\n\
         DEFINE TEMP-TABLE ttOrder NO-UNDO FIELD num AS INT.\n\
         DEFINE BUFFER bOrder FOR ttOrder.\n\
         DEFINE BUFFER bX FOR TEMP-TABLE ttLater.\n",
    );
    let buffers: Vec<_> = all
        .iter()
        .filter(|i| matches!(i.kind, ItemKind::Buffer { .. }))
        .map(|i| (i.name.as_str(), i.kind.clone()))
        .collect();
    assert_eq!(
        buffers,
        vec![
            (
                "bCust",
                ItemKind::Buffer {
                    table: "Customer".into(),
                    temp_table: false
                }
            ),
            (
                "bOrder",
                ItemKind::Buffer {
                    table: "ttOrder".into(),
                    temp_table: true
                }
            ),
            (
                "bX",
                ItemKind::Buffer {
                    table: "ttLater".into(),
                    temp_table: true
                }
            ),
        ]
    );
}

#[test]
fn temp_table_fields_and_indexes() {
    let all = items(
        "DEFINE TEMP-TABLE ttCust NO-UNDO LIKE Customer\n\
         \x20 FIELD extra AS CHAR EXTENT 2\n\
         \x20 FIELD seq AS INT\n\
         \x20 FIELD note AS CHARACTER FORMAT \"x(20)\"\n\
         \x20 INDEX ixSeq IS PRIMARY UNIQUE seq\n\
         \x20 INDEX ixNote note DESCENDING.\n",
    );
    let summary: Vec<_> = all
        .iter()
        .map(|i| (i.name.as_str(), i.kind.clone(), i.flags))
        .collect();
    assert_eq!(
        summary,
        vec![
            (
                "ttCust",
                ItemKind::TempTable {
                    like: Some("Customer".into())
                },
                ParseFlags::FILE_SCOPE
            ),
            (
                "extra",
                ItemKind::Field {
                    table: "ttCust".into(),
                    data_type: "CHARACTER".into(),
                    primary_key: false
                },
                ParseFlags::FILE_SCOPE | ParseFlags::EXTENT
            ),
            (
                "seq",
                ItemKind::Field {
                    table: "ttCust".into(),
                    data_type: "INTEGER".into(),
                    primary_key: true
                },
                ParseFlags::FILE_SCOPE | ParseFlags::INDEX
            ),
            (
                "note",
                ItemKind::Field {
                    table: "ttCust".into(),
                    data_type: "CHARACTER".into(),
                    primary_key: false
                },
                ParseFlags::FILE_SCOPE | ParseFlags::INDEX
            ),
        ]
    );
}

#[test]
fn work_table_is_a_temp_table() {
    let item = only("DEFINE WORK-TABLE wt FIELD a AS INT.");
    assert_eq!(item.kind, ItemKind::TempTable { like: None });
}

// === Widgets and objects ===

#[test]
fn widgets_and_complex_objects() {
    let all = items(
        "DEFINE BUTTON btnOk LABEL \"OK\".\n\
         DEFINE FRAME fMain btnOk WITH SIZE 80 BY 20.\n\
         DEFINE QUERY qCust FOR Customer.\n\
         DEFINE STREAM sOut.\n",
    );
    let summary: Vec<_> = all.iter().map(|i| (i.name.as_str(), i.kind.clone())).collect();
    assert_eq!(
        summary,
        vec![
            (
                "btnOk",
                ItemKind::Widget {
                    widget_type: "BUTTON".into()
                }
            ),
            (
                "fMain",
                ItemKind::Widget {
                    widget_type: "FRAME".into()
                }
            ),
            (
                "qCust",
                ItemKind::Variable {
                    data_type: "QUERY".into(),
                    primitive: false
                }
            ),
            (
                "sOut",
                ItemKind::Variable {
                    data_type: "STREAM".into(),
                    primitive: false
                }
            ),
        ]
    );
}

#[test]
fn unknown_define_object_emits_nothing() {
    assert!(items("DEFINE WIDGET-POOL wp.").is_empty());
    assert!(items("DEFINE NEW SHARED.").is_empty());
}

// === CREATE ===

#[test]
fn created_handles_are_dynamic() {
    let all = items(
        "CREATE BUTTON hBtn ASSIGN LABEL = \"Go\".\n\
         CREATE QUERY hQuery.\n\
         CREATE Customer.\n\
         CREATE WIDGET-POOL \"pool\".\n",
    );
    let summary: Vec<_> = all
        .iter()
        .map(|i| (i.name.as_str(), i.kind.clone(), i.flags))
        .collect();
    assert_eq!(
        summary,
        vec![
            (
                "hBtn",
                ItemKind::Widget {
                    widget_type: "BUTTON".into()
                },
                ParseFlags::DYNAMIC | ParseFlags::FILE_SCOPE
            ),
            (
                "hQuery",
                ItemKind::Variable {
                    data_type: "QUERY".into(),
                    primitive: false
                },
                ParseFlags::DYNAMIC | ParseFlags::FILE_SCOPE
            ),
        ]
    );
}

// === PROCEDURE ===

#[test]
fn procedure_opens_a_scope() {
    let all = items(
        "PROCEDURE doIt:\n\
         \x20 DEFINE VARIABLE x AS INT NO-UNDO.\n\
         END PROCEDURE.\n\
         DEFINE VARIABLE y AS INT NO-UNDO.\n",
    );
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].kind, ItemKind::Procedure { external: None });
    assert_eq!(all[0].scope, ScopeRef::File);
    assert_eq!(all[1].scope, ScopeRef::Item(ItemId::new(0)));
    assert!(all[1].flags.contains(ParseFlags::LOCAL_SCOPE));
    assert_eq!(all[2].scope, ScopeRef::File);
    assert!(all[2].flags.contains(ParseFlags::FILE_SCOPE));
}

#[test]
fn external_procedure() {
    let all = items("PROCEDURE GetTick EXTERNAL \"kernel32.dll\" PERSISTENT:\nEND.");
    assert_eq!(
        all[0].kind,
        ItemKind::Procedure {
            external: Some("kernel32.dll".into())
        }
    );
    assert_eq!(
        all[0].flags,
        ParseFlags::EXTERNAL_PROC | ParseFlags::PERSISTENT | ParseFlags::FILE_SCOPE
    );
    let plain = only("PROCEDURE Beep EXTERNAL \"user32.dll\":\nEND.");
    assert!(!plain.flags.contains(ParseFlags::PERSISTENT));
}

#[test]
fn private_procedure() {
    let item = only("PROCEDURE helper PRIVATE:\nEND.");
    assert!(item.flags.contains(ParseFlags::PRIVATE));
}

// === FUNCTION ===

#[test]
fn function_parameters_live_in_the_function_scope() {
    let all = items(
        "FUNCTION addUp RETURNS INTEGER (INPUT a AS INTEGER, b AS INT EXTENT 2):\n\
         \x20 RETURN a + b[1].\n\
         END FUNCTION.\n",
    );
    let summary: Vec<_> = all
        .iter()
        .map(|i| (i.name.as_str(), i.scope, i.flags))
        .collect();
    let fid = ScopeRef::Item(ItemId::new(0));
    assert_eq!(
        summary,
        vec![
            ("addUp", ScopeRef::File, ParseFlags::FILE_SCOPE),
            ("a", fid, ParseFlags::PARAMETER | ParseFlags::LOCAL_SCOPE),
            (
                "b",
                fid,
                ParseFlags::PARAMETER | ParseFlags::LOCAL_SCOPE | ParseFlags::EXTENT
            ),
        ]
    );
    assert_eq!(
        all[0].kind,
        ItemKind::Function {
            return_type: "INTEGER".into(),
            forward: false
        }
    );
}

#[test]
fn forward_declarations_open_nothing() {
    let all = items(
        "FUNCTION isOk RETURNS LOGICAL (INPUT x AS INT) FORWARD.\n\
         FUNCTION remote RETURNS CHAR IN hLib.\n\
         DEFINE VARIABLE after AS INT.\n",
    );
    let summary: Vec<_> = all.iter().map(|i| (i.name.as_str(), i.scope)).collect();
    assert_eq!(
        summary,
        vec![
            ("isOk", ScopeRef::File),
            ("remote", ScopeRef::File),
            ("after", ScopeRef::File),
        ]
    );
    assert!(matches!(
        all[1].kind,
        ItemKind::Function { forward: true, .. }
    ));
    assert!(!all[0].flags.contains(ParseFlags::PERSISTENT));
    assert!(all[1].flags.contains(ParseFlags::PERSISTENT));
}

#[test]
fn functions_in_super_are_not_persistent() {
    let item = only("FUNCTION inherited RETURNS INT IN SUPER.");
    assert!(matches!(item.kind, ItemKind::Function { forward: true, .. }));
    assert_eq!(item.flags, ParseFlags::FILE_SCOPE);
}

#[test]
fn buffer_and_table_parameters_of_functions() {
    let all = items(
        "FUNCTION f RETURNS LOGICAL (BUFFER bc FOR Customer, TABLE FOR ttX):\nEND.",
    );
    let names: Vec<_> = all.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["f", "bc"]);
    assert_eq!(
        all[1].kind,
        ItemKind::Buffer {
            table: "Customer".into(),
            temp_table: false
        }
    );
}

// === RUN ===

#[test]
fn run_targets() {
    let all = items(
        "RUN lib/util.p PERSISTENT SET hLib.\n\
         RUN doIt IN hLib (INPUT 1).\n\
         RUN VALUE(cProg + \".p\").\n\
         RUN \"quoted.w\".\n",
    );
    let summary: Vec<_> = all
        .iter()
        .map(|i| (i.name.as_str(), i.flags - ParseFlags::FILE_SCOPE))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("lib/util.p", ParseFlags::LOAD_PERSISTENT),
            ("doIt", ParseFlags::empty()),
            ("cProg + \".p\"", ParseFlags::UNCERTAIN),
            ("quoted.w", ParseFlags::empty()),
        ]
    );
}

// === Preprocessor ===

#[test]
fn preprocessor_definitions() {
    let all = items(
        "&GLOBAL-DEFINE WINDOW-NAME wWin\n\
         &SCOPED-DEFINE QUERY-STRING FOR EACH Customer. ~\n\
         \x20 NO-LOCK\n\
         DEFINE VARIABLE x AS INT.\n",
    );
    let summary: Vec<_> = all
        .iter()
        .map(|i| (i.name.as_str(), i.kind.clone(), i.flags))
        .collect();
    assert_eq!(
        summary[0],
        (
            "WINDOW-NAME",
            ItemKind::Preprocessor {
                value: "wWin".into()
            },
            ParseFlags::GLOBAL | ParseFlags::FILE_SCOPE
        )
    );
    assert_eq!(summary[1].0, "QUERY-STRING");
    assert_eq!(summary[1].2, ParseFlags::FILE_SCOPE);
    assert!(matches!(
        &summary[1].1,
        ItemKind::Preprocessor { value } if value.starts_with("FOR EACH Customer.") && value.ends_with("NO-LOCK")
    ));
    assert_eq!(summary[2].0, "x");
}

// === Labels ===

#[test]
fn labels_do_not_open_blocks() {
    let all = items(
        "mainLoop:\n\
         REPEAT:\n\
         \x20 DEFINE VARIABLE z AS INT.\n\
         END.\n",
    );
    assert_eq!(all[0].kind, ItemKind::Label);
    assert_eq!(all[0].name, "mainLoop");
    assert_eq!(all[1].scope, ScopeRef::File);
}
