//! Diagram parsing against the files in `samples/`, plus the error surface
//! as seen through the crate-level [`Error`].

use insta::assert_snapshot;
use rstest::rstest;
use std::path::PathBuf;
use treemancer::treemancer::formats::to_diagram;
use treemancer::treemancer::parser::{IndentIssue, ParseError};
use treemancer::treemancer::source::read_diagram_file;
use treemancer::treemancer::testing::assert_tree;
use treemancer::{DiagramParser, Error, TreeParser};

fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(name)
}

fn sample_text(name: &str) -> String {
    read_diagram_file(&sample_path(name)).expect("sample to be readable")
}

#[test]
fn test_markdown_sample_first_tree() {
    let tree = DiagramParser::new().parse(&sample_text("project.md")).unwrap();

    assert_tree(&tree)
        .name("project")
        .is_dir()
        .children_names(&["src", "tests", "docs", "README.md"])
        .child_named("src", |src| {
            src.children_names(&["main.py", "utils"])
                .child(1, |utils| {
                    utils.is_dir().child(0, |helpers| helpers.name("helpers.py").is_file());
                });
        })
        .child_named("docs", |docs| {
            docs.is_dir().child_count(0);
        })
        .file_count(4)
        .directory_count(5);

    assert_snapshot!(to_diagram(&tree), @r"
    project/
    ├── src/
    │   ├── main.py
    │   └── utils/
    │       └── helpers.py
    ├── tests/
    │   └── test_main.py
    ├── docs/
    └── README.md
    ");
}

#[test]
fn test_markdown_sample_all_trees() {
    let trees = DiagramParser::new()
        .parse_all(&sample_text("project.md"))
        .unwrap();
    let roots: Vec<&str> = trees.iter().map(|tree| tree.name()).collect();
    assert_eq!(roots, vec!["project", "tools"]);
    assert_tree(&trees[1]).children_names(&["build.sh", "release.sh"]);
}

#[test]
fn test_every_prefix_style_in_one_file() {
    let trees = DiagramParser::new()
        .parse_all(&sample_text("styles.txt"))
        .unwrap();
    assert_eq!(trees.len(), 3);

    assert_tree(&trees[0])
        .name("connectors")
        .has_path("connectors/nested/b.txt")
        .child(0, |a| a.is_file());
    assert_tree(&trees[1])
        .name("bullets")
        .children_names(&["one.md", "two"])
        .has_path("bullets/two/three.md");
    assert_tree(&trees[2])
        .name("indented")
        .children_names(&["alpha.txt", "beta"])
        .has_path("indented/beta/gamma.txt");
}

#[rstest]
#[case::connectors("app/\n├── src/\n│   └── main.rs\n└── Cargo.toml\n")]
#[case::ascii("app\n|-- src\n|   `-- main.rs\n`-- Cargo.toml\n")]
#[case::bullets("- app\n  - src\n    - main.rs\n  - Cargo.toml\n")]
#[case::indent_two("app\n  src\n    main.rs\n  Cargo.toml\n")]
#[case::indent_tabs("app\n\tsrc\n\t\tmain.rs\n\tCargo.toml\n")]
fn test_styles_agree(#[case] source: &str) {
    let tree = DiagramParser::new().parse(source).unwrap();
    assert_eq!(to_diagram(&tree), "app/\n├── src/\n│   └── main.rs\n└── Cargo.toml\n");
}

#[rstest]
#[case::partial_unit("root\n    a\n      b\n", 3)]
#[case::jump("root\n├── a\n│       └── b\n", 3)]
#[case::tabs_then_spaces("root\n\ta\n\t\tb\n    c\n", 4)]
fn test_inconsistent_indentation(#[case] source: &str, #[case] line: usize) {
    match DiagramParser::new().parse(source) {
        Err(Error::Parse(ParseError::InconsistentIndent { line: found, .. })) => {
            assert_eq!(found, line)
        }
        other => panic!("expected InconsistentIndent, got {other:?}"),
    }
}

#[test]
fn test_indent_issue_messages() {
    let err = DiagramParser::new().parse("root\n  a\n   b\n").unwrap_err();
    assert_eq!(
        err,
        Error::Parse(ParseError::InconsistentIndent {
            line: 3,
            reason: IndentIssue::PartialUnit { width: 3, unit: 2 },
        })
    );
    assert!(err.is_syntax_error());
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn test_mixed_styles_are_rejected() {
    let err = DiagramParser::new()
        .parse("root\n  a\n  - b\n")
        .unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::MixedStyles { line: 3, .. })));
}
