//! Outline formatting and display
//!
//! - `config` - Output configuration types
//! - `tree` - Tree formatter for outlines
//! - `matches` - `--find` result lines
//! - `json` - JSON output

mod config;
mod json;
mod matches;
mod tree;

pub use config::OutputConfig;
pub use json::{DocumentReport, print_json};
pub use matches::{print_matches, write_matches};
pub use tree::{OutlineFormatter, print_summary};

#[cfg(test)]
mod tests {
    use std::path::Path;

    use termcolor::NoColor;

    use super::*;
    use crate::find::{compile_pattern, find_labels};
    use crate::outline::{OutlineConfig, outline};
    use crate::progress::NoProgress;
    use crate::test_utils::{parse, sample_program};

    fn plain() -> OutputConfig {
        OutputConfig {
            use_color: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_format_draws_tree_connectors() {
        let (mut ast, root) = sample_program();
        let outline = outline(&mut ast, root, &OutlineConfig::default(), NoProgress);
        let text = OutlineFormatter::new(plain()).format(&outline);

        let expected = "\
Program
├── VariableDeclaration const
│   └── VariableDeclarator
│       ├── Identifier greeting
│       └── TemplateLiteral
│           ├── TemplateElement `hello `
│           ├── Identifier name
│           └── TemplateElement ``
└── ExpressionStatement
    └── CallExpression
        ├── MemberExpression
        │   ├── Identifier console
        │   └── Identifier log
        └── Identifier greeting
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_format_marks_hidden_children() {
        let (mut ast, root) = sample_program();
        let config = OutlineConfig {
            max_depth: Some(1),
            ..Default::default()
        };
        let outline = outline(&mut ast, root, &config, NoProgress);

        let text = OutlineFormatter::new(plain()).format(&outline);
        assert!(text.contains("├── VariableDeclaration const (+1 hidden)"));

        let quiet = OutputConfig {
            show_hidden_counts: false,
            ..plain()
        };
        let text = OutlineFormatter::new(quiet).format(&outline);
        assert!(!text.contains("hidden"));
    }

    #[test]
    fn test_format_shows_synthetic_nulls() {
        let (mut ast, root) = parse(
            r#"{"type": "IfStatement", "test": {"type": "Identifier", "name": "x"},
                "consequent": {"type": "EmptyStatement"}, "alternate": null}"#,
        );
        let config = OutlineConfig {
            walk_nulls: true,
            ..Default::default()
        };
        let outline = outline(&mut ast, root, &config, NoProgress);
        let text = OutlineFormatter::new(plain()).format(&outline);
        assert!(text.ends_with("└── Literal null\n"), "{}", text);
    }

    #[test]
    fn test_write_matches_lists_paths() {
        let (mut ast, root) = sample_program();
        let (found, _) = find_labels(&mut ast, root, &compile_pattern("^log$").unwrap());

        let mut out = NoColor::new(Vec::new());
        write_matches(&mut out, Path::new("app.json"), &found).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(
            text,
            "app.json: Program > ExpressionStatement > CallExpression > MemberExpression > Identifier log\n"
        );
    }

    #[test]
    fn test_document_report_json_shape() {
        let (mut ast, root) = sample_program();
        let outline = outline(&mut ast, root, &OutlineConfig::default(), NoProgress);
        let report = DocumentReport {
            path: "app.json".into(),
            outline: Some(outline),
            matches: None,
            error: None,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["path"], "app.json");
        assert_eq!(value["outline"]["walk"]["visited"], 14);
        assert_eq!(value["outline"]["entries"][1]["label"], "const");
        assert!(value["outline"]["entries"][0].get("prefix").is_none());
        assert!(value.get("error").is_none());

        let failed = serde_json::to_value(DocumentReport::failed("x.json".into(), "boom")).unwrap();
        assert_eq!(failed["error"], "boom");
    }
}
