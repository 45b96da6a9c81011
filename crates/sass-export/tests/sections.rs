//! Integration tests for structured (section-scoped) extraction.

use sass_export::{Declaration, Parser, ParserConfig, parse_declarations, parse_sections};

// ============================================================================
// SCOPING
// ============================================================================

#[test]
fn test_section_then_default() {
    let source = r#"
// @sass-export-subsection="Colors"
$primary: blue;
// @end-sass-export-subsection
$size: 10px;
"#;
    let sections = parse_sections(source);

    assert_eq!(sections.get("Colors"), Some(&[Declaration::new("primary", "blue")][..]));
    assert_eq!(sections.get("variables"), Some(&[Declaration::new("size", "10px")][..]));
    assert_eq!(sections.len(), 2);
}

#[test]
fn test_unclosed_section_runs_to_end_of_input() {
    let source = "$a: 1;\n// @sass-export-subsection=\"Spacing\"\n$b: 2;\n$c: 3;";
    let sections = parse_sections(source);

    assert_eq!(sections.get("variables").unwrap().len(), 1);
    let names: Vec<_> = sections.get("Spacing").unwrap().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["b", "c"]);
}

#[test]
fn test_sections_do_not_nest() {
    let source = r#"
// @sass-export-subsection="Outer"
$a: 1;
// @sass-export-subsection="Inner"
$b: 2;
// @end-sass-export-subsection
$c: 3;
// @end-sass-export-subsection
$d: 4;
"#;
    let sections = parse_sections(source);

    assert_eq!(sections.get("Outer").unwrap().len(), 1);
    assert_eq!(sections.get("Inner").unwrap().len(), 1);
    let defaults: Vec<_> = sections
        .get("variables")
        .unwrap()
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(defaults, vec!["c", "d"]);
}

#[test]
fn test_reopened_section_appends() {
    let source = r#"
// @sass-export-subsection="Colors"
$a: 1;
// @end-sass-export-subsection
// @sass-export-subsection="Colors"
$b: 2;
"#;
    let sections = parse_sections(source);
    assert_eq!(sections.get("Colors").unwrap().len(), 2);
    assert_eq!(sections.len(), 2);
}

#[test]
fn test_spurious_end_is_harmless() {
    let source = "// @end-sass-export-subsection\n$a: 1;";
    let sections = parse_sections(source);
    assert_eq!(sections.get("variables"), Some(&[Declaration::new("a", "1")][..]));
}

#[test]
fn test_empty_section_is_kept() {
    let source = "// @sass-export-subsection=\"Empty\"\n// @end-sass-export-subsection\n$a: 1;";
    let sections = parse_sections(source);
    assert_eq!(sections.get("Empty"), Some(&[][..]));
    assert_eq!(sections.names().collect::<Vec<_>>(), vec!["variables", "Empty"]);
}

#[test]
fn test_block_comment_markers() {
    let source = "/* @sass-export-subsection=\"Type\" */\n$font: Inter;\n\
                  /* @end-sass-export-subsection */";
    let sections = parse_sections(source);
    assert_eq!(sections.get("Type").unwrap()[0].value, "Inter");
}

#[test]
fn test_marker_after_declaration_on_same_line() {
    let source = "$a: 1; // @sass-export-subsection=\"Late\"\n$b: 2;";
    let sections = parse_sections(source);
    assert_eq!(sections.get("variables").unwrap()[0].name, "a");
    assert_eq!(sections.get("Late").unwrap()[0].name, "b");
}

// ============================================================================
// EMPTY RESULTS
// ============================================================================

#[test]
fn test_empty_input_yields_empty_mapping() {
    assert!(parse_sections("").is_empty());
    assert!(parse_sections("a { color: red; }").is_empty());
}

#[test]
fn test_markers_only_still_create_default() {
    let sections = parse_sections("// @sass-export-subsection=\"Colors\"");
    assert_eq!(sections.names().collect::<Vec<_>>(), vec!["variables", "Colors"]);
    assert!(sections.get("variables").unwrap().is_empty());
}

// ============================================================================
// FLAT MODE AND MARKERS
// ============================================================================

#[test]
fn test_flat_mode_ignores_markers() {
    let source = r#"
// @sass-export-subsection="Colors"
$primary: blue;
// @end-sass-export-subsection
$size: 10px;
"#;
    let names: Vec<_> = parse_declarations(source).into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["primary", "size"]);
}

#[test]
fn test_flat_mode_drops_declaration_swallowing_a_marker() {
    let source = "$a: 1\n// @sass-export-subsection=\"X\"\n$b: 2;\n$c: 3;";
    let names: Vec<_> = parse_declarations(source).into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["c"]);
}

#[test]
fn test_flat_mode_drops_declaration_swallowing_an_end_marker() {
    let source = "$a: 1\n// @end-sass-export-subsection\n$b: 2;\n$c: 3;";
    let names: Vec<_> = parse_declarations(source).into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["c"]);
}

#[test]
fn test_uppercase_marker_swallowed_by_declaration_opens_section() {
    let source = "$a: 1\n// @SASS-EXPORT-SUBSECTION=\"X\"\n$b: 2;\n$c: 3;";
    let sections = parse_sections(source);

    assert_eq!(sections.names().collect::<Vec<_>>(), vec!["variables", "X"]);
    assert!(sections.get("variables").unwrap().is_empty());
    assert_eq!(sections.get("X"), Some(&[Declaration::new("c", "3")][..]));
}

#[test]
fn test_mixed_case_end_marker_in_declaration_closes_section() {
    let source = "// @sass-export-subsection=\"X\"\n\
                  $a: 1\n// @End-Sass-Export-Subsection\n$b: 2;\n$c: 3;";
    let sections = parse_sections(source);

    assert!(sections.get("X").unwrap().is_empty());
    assert_eq!(sections.get("variables"), Some(&[Declaration::new("c", "3")][..]));
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn test_custom_default_section() {
    let config = ParserConfig {
        default_section: "globals".to_string(),
    };
    let sections = Parser::with_config("$a: 1;", config).parse_structured();
    assert_eq!(sections.names().collect::<Vec<_>>(), vec!["globals"]);
}
