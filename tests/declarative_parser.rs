//! Declarative syntax parsing, end to end through the public API
//!
//! Operator semantics are exercised one rule per test; the `templates/`
//! directory doubles as a set of realistic documents.

use rstest::rstest;
use treemancer::treemancer::parser::{parse_declarative, ParseError};
use treemancer::treemancer::testing::assert_tree;
use treemancer::{Error, NodeKind};

fn parse_err(source: &str) -> ParseError {
    match parse_declarative(source) {
        Err(Error::Parse(err)) => err,
        other => panic!("expected a parse error for {source:?}, got {other:?}"),
    }
}

fn workspace_file(path: &str) -> String {
    let full = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(path);
    std::fs::read_to_string(&full).unwrap_or_else(|e| panic!("cannot read {}: {e}", full.display()))
}

#[rstest]
#[case("a > b c d", &["b", "c", "d"])]
#[case("a > b c > x | d", &["b", "c", "d"])]
#[case("a > d(b) f(c) d", &["b", "c", "d"])]
#[case("a >\n  b\n  c", &["b", "c"])]
fn test_whitespace_separates_siblings(#[case] source: &str, #[case] names: &[&str]) {
    let tree = parse_declarative(source).unwrap();
    assert_tree(&tree).name("a").is_dir().children_names(names);
}

#[rstest]
#[case("a > d(main.py)", NodeKind::Directory)]
#[case("a > f(src) > x", NodeKind::File)]
#[case("a > f(bin)", NodeKind::File)]
#[case("a > d(empty)", NodeKind::Directory)]
fn test_hints_decide_kind(#[case] source: &str, #[case] kind: NodeKind) {
    match parse_declarative(source) {
        Ok(tree) => {
            assert_tree(&tree).child(0, |child| child.kind(kind));
        }
        Err(Error::Parse(ParseError::ChildrenUnderFile { name, .. })) => {
            assert_eq!(kind, NodeKind::File);
            assert_eq!(name, "src");
        }
        Err(other) => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
#[case("Dockerfile")]
#[case("LICENSE")]
#[case(".gitignore")]
#[case("Makefile")]
fn test_bare_names_default_to_files(#[case] name: &str) {
    let tree = parse_declarative(&format!("app > {name}")).unwrap();
    assert_tree(&tree).child(0, |child| child.name(name).is_file());
}

#[test]
fn test_reset_climbs_one_level_per_bar() {
    let tree = parse_declarative("root > a > b > c | d | e").unwrap();
    assert_tree(&tree)
        .children_names(&["a", "e"])
        .child_named("a", |a| {
            a.is_dir().children_names(&["b", "d"]).child(0, |b| {
                b.is_dir().children_names(&["c"]);
            });
        })
        .has_path("root/a/d")
        .has_path("root/e");
}

#[rstest]
#[case("a | b", 2)]
#[case("a > b | | c", 8)]
#[case("a > b > c | | | d", 14)]
fn test_underflow_is_reported_at_the_offending_bar(#[case] source: &str, #[case] offset: usize) {
    match parse_err(source) {
        ParseError::CascadeUnderflow { offset: found, .. } => assert_eq!(found, offset),
        other => panic!("expected CascadeUnderflow, got {other:?}"),
    }
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n\t\n")]
fn test_empty_input(#[case] source: &str) {
    assert_eq!(parse_err(source), ParseError::EmptyInput);
}

#[test]
fn test_second_root_is_rejected() {
    let err = parse_err("a > b | c");
    assert!(matches!(err, ParseError::MultipleRoots { ref name, .. } if name == "c"));
    assert_eq!(err.line(), Some(1));
}

#[test]
fn test_error_positions_on_later_lines() {
    let err = parse_err("app >\n  src |\n  | |");
    assert!(matches!(err, ParseError::CascadeUnderflow { .. }));
    assert_eq!(err.line(), Some(3));
}

#[test]
fn test_webapp_template() {
    let tree = parse_declarative(&workspace_file("templates/webapp.tree")).unwrap();
    assert_tree(&tree)
        .name("webapp")
        .children_names(&[
            "src",
            "static",
            "templates",
            "tests",
            "requirements.txt",
            "README.md",
        ])
        .has_path("webapp/src/routes/auth.py")
        .has_path("webapp/static/js/app.js")
        .child_named("templates", |templates| {
            templates.is_dir().child_count(2);
        })
        .file_count(11)
        .directory_count(8);
}

#[rstest]
#[case("templates/rust-cli.tree", "rust-cli")]
#[case("templates/python-package.tree", "package")]
fn test_templates_parse(#[case] path: &str, #[case] root: &str) {
    let tree = parse_declarative(&workspace_file(path)).unwrap();
    assert_tree(&tree).name(root).is_dir();
}
