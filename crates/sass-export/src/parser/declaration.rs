//! Single-declaration parsing.
//!
//! Turns one matched declaration (see [`Lexer`](super::Lexer)) into a
//! [`Declaration`]:
//!
//! 1. A `!default;` / `!global;` suffix is replaced by a plain `;`
//! 2. The text is matched again as a standalone declaration
//! 3. The first `_` of the name becomes `-` (`$my_var_two` -> `my-var_two`)
//! 4. The value is trimmed, line breaks are folded into single spaces and one
//!    pair of surrounding quotes is removed
//! 5. Each marker of a trailing annotation becomes an `extend_<tag>` field

use std::borrow::Cow;

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0},
    sequence::tuple,
};

use super::grammar::{extend_markers, unquote};
use super::lexer::find_declaration;
use crate::types::Declaration;

/// Parses one declaration.
///
/// Returns `None` when the text no longer forms a declaration once the
/// modifier is stripped, e.g. `$a: !default;`.
pub fn parse_declaration(text: &str) -> Option<Declaration> {
    let stripped = strip_modifier(text);
    let Some(found) = find_declaration(&stripped) else {
        log::trace!("dropping unparseable declaration: {text:?}");
        return None;
    };

    let mut declaration = Declaration::new(
        found.name.trim().replacen('_', "-", 1),
        unquote(&fold_line_breaks(found.value.trim())),
    );

    if let Some(annotation) = found.annotation {
        for (marker, literal) in extend_markers(annotation) {
            declaration.set_extend(marker, unquote(literal));
        }
    }

    Some(declaration)
}

/// Replaces the first `\s*!(default|global)\s*;` with `;`.
fn strip_modifier(text: &str) -> Cow<'_, str> {
    for (bang, _) in text.match_indices('!') {
        let modifier: IResult<&str, _> = tuple((
            alt((tag("default"), tag("global"))),
            multispace0,
            char(';'),
        ))(&text[bang + 1..]);

        if let Ok((rest, _)) = modifier {
            let start = text[..bang].trim_end().len();
            let end = text.len() - rest.len();
            return Cow::Owned(format!("{};{}", &text[..start], &text[end..]));
        }
    }
    Cow::Borrowed(text)
}

/// Collapses every whitespace run that contains a line feed into one space.
fn fold_line_breaks(value: &str) -> String {
    let mut folded = String::with_capacity(value.len());
    let mut run = String::new();

    for c in value.chars() {
        if c.is_whitespace() {
            run.push(c);
            continue;
        }
        flush_run(&mut folded, &mut run);
        folded.push(c);
    }
    flush_run(&mut folded, &mut run);
    folded
}

fn flush_run(out: &mut String, run: &mut String) {
    if run.contains('\n') {
        out.push(' ');
    } else {
        out.push_str(run);
    }
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_declaration() {
        assert_eq!(
            parse_declaration("$primary: blue;"),
            Some(Declaration::new("primary", "blue"))
        );
    }

    #[test]
    fn replaces_only_first_underscore() {
        assert_eq!(parse_declaration("$my_var: 1;").unwrap().name, "my-var");
        assert_eq!(parse_declaration("$my_var_two: 1;").unwrap().name, "my-var_two");
    }

    #[test]
    fn strips_modifiers() {
        assert_eq!(parse_declaration("$a: 1 !default;").unwrap().value, "1");
        assert_eq!(parse_declaration("$a: 1  !global ;").unwrap().value, "1");
    }

    #[test]
    fn modifier_only_value_is_dropped() {
        assert_eq!(parse_declaration("$a: !default;"), None);
    }

    #[test]
    fn strip_modifier_rewrites_first_occurrence() {
        assert_eq!(strip_modifier("$a: 1 !default;"), "$a: 1;");
        assert_eq!(strip_modifier("$a: 1;"), "$a: 1;");
        assert_eq!(strip_modifier("$a: b!important;"), "$a: b!important;");
    }

    #[test]
    fn folds_multiline_values() {
        let decl = parse_declaration("$stack: Helvetica,\n    Arial,\n    sans-serif;").unwrap();
        assert_eq!(decl.value, "Helvetica, Arial, sans-serif");
    }

    #[test]
    fn keeps_inline_whitespace() {
        assert_eq!(fold_line_breaks("1px  solid"), "1px  solid");
        assert_eq!(fold_line_breaks("a \r\n\t b"), "a b");
    }

    #[test]
    fn unquotes_fully_quoted_values() {
        let quoted = parse_declaration("$font: \"Helvetica Neue\";").unwrap();
        assert_eq!(quoted.value, "Helvetica Neue");
        assert_eq!(parse_declaration("$font: 'Georgia';").unwrap().value, "Georgia");
        assert_eq!(parse_declaration("$q: \"a\" + 'b';").unwrap().value, "\"a\" + 'b'");
    }

    #[test]
    fn quoted_name() {
        assert_eq!(parse_declaration("$'brand_color': red;").unwrap().name, "brand-color");
    }

    #[test]
    fn extend_fields_from_annotation() {
        let source = concat!(
            r#"$primary: blue; "#,
            r#"/* @sass-export-alias="Brand Blue" @sass-export-group="brand" */"#,
        );
        let decl = parse_declaration(source).unwrap();
        assert_eq!(
            decl,
            Declaration::new("primary", "blue")
                .with_extend("alias", "Brand Blue")
                .with_extend("group", "brand")
        );
    }

    #[test]
    fn modifier_and_annotation() {
        let source = r#"$primary: blue !default; // @sass-export-alias="Blue""#;
        let decl = parse_declaration(source).unwrap();
        assert_eq!(decl.value, "blue");
        assert_eq!(decl.extend("alias"), Some("Blue"));
    }
}
