//! Tokenizer that finds declarations and section markers in raw text.
//!
//! Matches are computed left to right over the whole input. After a match
//! the scan resumes at its end; otherwise it moves on by one character.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0, space0},
    sequence::tuple,
};

use super::grammar::{
    contains_section_end, find_section_start, parse_block_annotation, parse_line_annotation,
    parse_section_end, parse_section_start, parse_variable_name, section_name,
};

/// A token produced by the lexer.
#[derive(Clone, Debug, PartialEq)]
pub enum Token<'a> {
    /// Raw text of one declaration, annotation included.
    Declaration(&'a str),
    /// A section-start marker with its quotes removed (may be empty).
    SectionStart(String),
    /// A section-end marker.
    SectionEnd,
}

/// Which shapes the lexer looks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexMode {
    /// Declarations only.
    Declarations,
    /// Declarations and standalone section markers.
    Structured,
}

/// One declaration located in a larger text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeclarationMatch<'a> {
    /// The full matched text, from `$` through the annotation.
    pub text: &'a str,
    pub name: &'a str,
    /// Untrimmed value text. Includes a `!default`/`!global` suffix when the
    /// bare `;` closed the declaration.
    pub value: &'a str,
    pub annotation: Option<&'a str>,
}

/// Lexer over stylesheet source.
///
/// # Examples
///
/// ```
/// use sass_export::parser::{LexMode, Lexer, Token};
///
/// let source = "$a: 1; // @end-sass-export-subsection";
/// let tokens: Vec<_> = Lexer::new(source, LexMode::Structured).collect();
/// assert_eq!(tokens, vec![Token::Declaration("$a: 1; "), Token::SectionEnd]);
/// ```
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    mode: LexMode,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, mode: LexMode) -> Self {
        Self {
            input,
            pos: 0,
            mode,
        }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Moves to the next character that can start a match.
    fn skip_to_candidate(&mut self) -> Option<char> {
        let structured = self.mode == LexMode::Structured;
        let offset = self
            .remaining()
            .find(|c: char| c == '$' || (structured && c == '@'))?;
        self.pos += offset;
        self.remaining().chars().next()
    }

    fn advance_past(&mut self, rest: &str) {
        self.pos = self.input.len() - rest.len();
    }

    fn lex_marker(&mut self) -> Option<Token<'a>> {
        let input = self.remaining();
        if let Ok((rest, raw)) = parse_section_start(input) {
            self.advance_past(rest);
            return Some(Token::SectionStart(section_name(raw)));
        }
        if let Ok((rest, _)) = parse_section_end(input) {
            self.advance_past(rest);
            return Some(Token::SectionEnd);
        }
        None
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let c = self.skip_to_candidate()?;

            let token = if c == '$' {
                match_declaration_at(self.input, self.pos).map(|found| {
                    self.pos += found.text.len();
                    classify(found.text)
                })
            } else {
                self.lex_marker()
            };

            match token {
                Some(token) => return Some(token),
                None => self.pos += c.len_utf8(),
            }
        }
    }
}

/// A declaration whose text swallowed a section marker counts as that marker.
fn classify(text: &str) -> Token<'_> {
    if let Some(name) = find_section_start(text) {
        log::trace!("declaration text embeds a section start: {text:?}");
        Token::SectionStart(name)
    } else if contains_section_end(text) {
        log::trace!("declaration text embeds a section end: {text:?}");
        Token::SectionEnd
    } else {
        Token::Declaration(text)
    }
}

/// Finds the first declaration anywhere in `haystack`.
pub fn find_declaration(haystack: &str) -> Option<DeclarationMatch<'_>> {
    haystack
        .match_indices('$')
        .find_map(|(pos, _)| match_declaration_at(haystack, pos))
}

/// Matches a declaration starting at byte `pos` (which must hold a `$`).
///
/// `haystack` is the whole input: the bare `;` terminator is rejected when a
/// `}` follows it before any `{`, since the declaration then sits inside a
/// rule block.
pub fn match_declaration_at(haystack: &str, pos: usize) -> Option<DeclarationMatch<'_>> {
    let input = &haystack[pos..];
    let (rest, _) = char::<_, nom::error::Error<&str>>('$')(input).ok()?;
    let (rest, name) = parse_variable_name(rest).ok()?;
    let colon: IResult<&str, _> = tuple((multispace0, char(':'), multispace0))(rest);
    let (rest, _) = colon.ok()?;

    let value_start = haystack.len() - rest.len();
    let (value, after) =
        match_unquoted(haystack, value_start).or_else(|| match_quoted(haystack, value_start))?;

    // Block annotations may follow on later lines; line annotations must
    // share the terminator's line.
    let tail = &haystack[after..];
    let annotated = alt((
        tuple((multispace0, parse_block_annotation)),
        tuple((space0, parse_line_annotation)),
    ))(tail);
    let (end, annotation) = match annotated {
        Ok((rest, (_, annotation))) => (haystack.len() - rest.len(), Some(annotation)),
        Err(_) => {
            let trailing = tail.trim_start();
            (haystack.len() - trailing.len(), None)
        }
    };

    Some(DeclarationMatch {
        text: &haystack[pos..end],
        name,
        value,
        annotation,
    })
}

/// Value alternative one: everything up to the first `;`.
fn match_unquoted(haystack: &str, start: usize) -> Option<(&str, usize)> {
    let rest = &haystack[start..];
    let semi = rest.find(';')?;
    let value = &rest[..semi];
    if value.trim().is_empty() {
        return None;
    }

    let after = start + semi + 1;
    if !closes_block(&haystack[after..]) {
        return Some((value, after));
    }

    // Inside a block only the modifier form may end the declaration.
    strip_modifier_suffix(value).map(|value| (value, after))
}

/// Value alternative two: a double-quoted string with `\"` escapes.
fn match_quoted(haystack: &str, start: usize) -> Option<(&str, usize)> {
    let rest = &haystack[start..];
    if !rest.starts_with('"') {
        return None;
    }

    closing_quote_candidates(rest).into_iter().find_map(|close| {
        let after = match_terminator(haystack, start + close + 1)?;
        Some((&rest[..=close], after))
    })
}

/// Candidate closing quotes, in the order a backtracking matcher tries them:
/// the first quote, then the first unescaped quote, then escaped quotes
/// from last to first.
fn closing_quote_candidates(quoted: &str) -> Vec<usize> {
    let mut candidates = Vec::new();
    if let Some(first) = quoted[1..].find('"').map(|i| i + 1) {
        if first > 1 {
            candidates.push(first);
        }
    }

    let bytes = quoted.as_bytes();
    let mut escaped = Vec::new();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if bytes.get(i + 1) == Some(&b'"') => {
                escaped.push(i + 1);
                i += 2;
            }
            b'"' => {
                candidates.push(i);
                break;
            }
            _ => i += 1,
        }
    }
    candidates.extend(escaped.into_iter().rev());
    candidates
}

/// Matches `\s*!(global|default)\s*;` or `\s*;` at `pos`.
fn match_terminator(haystack: &str, pos: usize) -> Option<usize> {
    let rest = &haystack[pos..];
    let modifier: IResult<&str, _> = tuple((
        multispace0,
        char('!'),
        alt((tag("global"), tag("default"))),
        multispace0,
        char(';'),
    ))(rest);
    if let Ok((rest, _)) = modifier {
        return Some(haystack.len() - rest.len());
    }

    let (rest, _) = tuple((multispace0::<_, nom::error::Error<&str>>, char(';')))(rest).ok()?;
    if closes_block(rest) {
        None
    } else {
        Some(haystack.len() - rest.len())
    }
}

/// True when a `}` appears before any `{`.
fn closes_block(rest: &str) -> bool {
    rest.find(['{', '}'])
        .is_some_and(|i| rest.as_bytes()[i] == b'}')
}

/// Splits `value !default` into `value`, requiring a non-blank value.
fn strip_modifier_suffix(value: &str) -> Option<&str> {
    let body = value.trim_end();
    let head = body
        .strip_suffix("default")
        .or_else(|| body.strip_suffix("global"))?
        .strip_suffix('!')?
        .trim_end();
    (!head.trim().is_empty()).then_some(head)
}
