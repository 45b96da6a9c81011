//! Lexical grammar for exported declarations.
//!
//! Every shape the extractor recognizes inside arbitrary stylesheet text:
//!
//! - Variable names: `primary`, `my_var`, `'quoted-key'`
//! - Extend markers: `@sass-export-alias="Brand Blue"`
//! - Annotations: `/* markers */` or `// markers` right after a declaration
//! - Map entries: `key: value` pairs inside a map literal
//! - Section markers: `@sass-export-subsection="Name"` / `@end-sass-export-subsection`
//!
//! The parsers here are plain nom parsers over `&str`. The declaration
//! boundary itself needs lookahead over the whole input and lives in
//! [`lexer`](super::lexer).

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_till1, take_while, take_while1},
    character::complete::{char, multispace0, one_of, satisfy, space0},
    combinator::{opt, recognize, verify},
    multi::{many0, many1},
    sequence::{delimited, pair, preceded, tuple},
};

macro_rules! section_tag {
    () => {
        "sass-export-subsection"
    };
}

/// Tag shared by both section markers.
pub const SECTION_TAG: &str = section_tag!();

/// Prefix of every extend marker.
pub const EXTEND_PREFIX: &str = "@sass-export-";

/// Opens a section: `@sass-export-subsection="Name"`.
pub const SECTION_START: &str = concat!("@", section_tag!(), "=");

/// Closes the active section.
pub const SECTION_END: &str = concat!("@end-", section_tag!());

/// Section that collects declarations outside any marker pair.
pub const DEFAULT_SECTION: &str = "variables";

/// Extend tag reserved for section markers.
const SECTION_KEYWORD: &str = "subsection";

pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn tag_error(input: &str) -> nom::Err<nom::error::Error<&str>> {
    nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Tag))
}

/// Parses a variable identifier. It may not start with a digit.
pub fn parse_ident(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic() || c == '_' || c == '-'),
        take_while(is_ident_char),
    ))(input)
}

/// Parses an identifier optionally wrapped in single or double quotes.
pub fn parse_variable_name(input: &str) -> IResult<&str, &str> {
    delimited(opt(one_of("'\"")), parse_ident, opt(one_of("'\"")))(input)
}

/// Parses `@sass-export-<tag>="<literal>"`, returning the tag and the
/// literal with its quotes still attached.
pub fn parse_extend_marker(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, _) = tag(EXTEND_PREFIX)(input)?;
    let (input, name) = verify(take_while1(is_word_char), |t: &str| t != SECTION_KEYWORD)(input)?;
    let (input, _) = char('=')(input)?;
    let (input, literal) = recognize(delimited(
        char('"'),
        take_till1(|c: char| c == '"' || is_line_terminator(c)),
        char('"'),
    ))(input)?;
    Ok((input, (name, literal)))
}

/// Parses a block annotation: `/* markers */` with zero or more markers.
pub fn parse_block_annotation(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        tag("/*"),
        many0(preceded(multispace0, parse_extend_marker)),
        multispace0,
        tag("*/"),
    )))(input)
}

/// Parses a line annotation: `// markers` with at least one marker. It ends
/// after the last marker.
pub fn parse_line_annotation(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        tag("//"),
        many1(preceded(space0, parse_extend_marker)),
    ))(input)
}

/// Parses an annotation comment made only of extend markers.
pub fn parse_annotation(input: &str) -> IResult<&str, &str> {
    alt((parse_block_annotation, parse_line_annotation))(input)
}

/// Returns true if an annotation starts anywhere in `text`.
pub fn contains_annotation(text: &str) -> bool {
    text.char_indices()
        .filter(|(_, c)| *c == '/')
        .any(|(i, _)| parse_annotation(&text[i..]).is_ok())
}

/// Collects every extend marker inside an annotation, in order.
pub fn extend_markers(annotation: &str) -> Vec<(&str, &str)> {
    let mut markers = Vec::new();
    let mut rest = annotation;

    while let Some(idx) = rest.find(EXTEND_PREFIX) {
        let candidate = &rest[idx..];
        let glued = rest[..idx].chars().next_back().is_some_and(is_word_char);

        match parse_extend_marker(candidate) {
            Ok((remaining, marker)) if !glued => {
                markers.push(marker);
                rest = remaining;
            }
            _ => rest = &candidate[EXTEND_PREFIX.len()..],
        }
    }

    markers
}

/// Parses `@sass-export-subsection="..."`, returning the raw quoted name.
///
/// The name runs to the last `"` on the line.
pub fn parse_section_start(input: &str) -> IResult<&str, &str> {
    let (input, _) = tag(SECTION_START)(input)?;
    let line_end = input.find(is_line_terminator).unwrap_or(input.len());
    let line = &input[..line_end];

    if !line.starts_with('"') {
        return Err(tag_error(input));
    }
    match line.rfind('"') {
        Some(close) if close >= 2 => Ok((&input[close + 1..], &input[..=close])),
        _ => Err(tag_error(input)),
    }
}

pub fn parse_section_end(input: &str) -> IResult<&str, &str> {
    tag(SECTION_END)(input)
}

/// Strips every double quote from a raw section name.
pub fn section_name(raw: &str) -> String {
    raw.replace('"', "")
}

/// Finds the first section-start marker anywhere in `text`, ignoring case.
pub fn find_section_start(text: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets, so the name is cut from `text`.
    let folded = text.to_ascii_lowercase();
    folded
        .match_indices(SECTION_START)
        .find_map(|(i, _)| parse_section_start(&folded[i..]).ok())
        .map(|(rest, raw)| {
            let end = text.len() - rest.len();
            section_name(&text[end - raw.len()..end])
        })
}

/// Returns true if `text` holds a section-end marker, ignoring case.
pub fn contains_section_end(text: &str) -> bool {
    text.to_ascii_lowercase().contains(SECTION_END)
}

/// Removes one matching pair of outer quotes from a single-line value.
pub fn unquote(value: &str) -> &str {
    let mut chars = value.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open @ ('\'' | '"')), Some(close))
            if open == close && !chars.as_str().contains(is_line_terminator) =>
        {
            chars.as_str()
        }
        _ => value,
    }
}

// ============================================================================
// Map entries
// ============================================================================

/// `darken(...)`, `RGBA(...)`: a call with no nested parentheses.
fn parse_function_call(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '-'),
        char('('),
        take_till1(|c: char| c == ')'),
        char(')'),
    )))(input)
}

fn parse_bare_entry_value(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !matches!(c, ')' | '(' | ',' | '/'))(input)
}

fn parse_paren_group(input: &str) -> IResult<&str, &str> {
    recognize(tuple((char('('), take_till1(|c: char| c == ')'), char(')'))))(input)
}

fn parse_entry_value(input: &str) -> IResult<&str, &str> {
    let (after_ws, _) = multispace0(input)?;
    alt((parse_function_call, parse_bare_entry_value, parse_paren_group))(after_ws)
        .or_else(|_| parse_bare_entry_value(input))
}

/// Parses one `key: value` map entry, including a trailing `, /* ... */`
/// annotation when present.
pub fn parse_map_entry(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        parse_variable_name,
        multispace0,
        char(':'),
        parse_entry_value,
        opt(tuple((char(','), multispace0, parse_annotation))),
    )))(input)
}
