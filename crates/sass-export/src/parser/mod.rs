//! Declaration extraction.
//!
//! This module provides the extractor and its building blocks:
//!
//! - [`Parser`]: Entry point holding the source text
//! - [`Lexer`]: Finds declarations and section markers in raw text
//! - [`parse_declaration`]: Parses one matched declaration
//! - [`expand_map`]: Recursively expands map literal values
//! - [`SectionState`]: The section-scoping fold used by structured mode
//!
//! ## Submodules
//!
//! - [`grammar`]: Identifier, annotation, marker and map-entry parsers
//! - [`lexer`]: Declaration boundaries and tokenization
//! - [`declaration`]: Name/value/extend-field normalization
//! - [`map`]: Map literal expansion
//! - [`sections`]: Section-scoped aggregation
//!
//! ## Example
//!
//! ```rust
//! use sass_export::parser::Parser;
//!
//! let source = r#"
//!     // @sass-export-subsection="Colors"
//!     $primary: blue;
//!     // @end-sass-export-subsection
//!     $size: 10px;
//! "#;
//!
//! let sections = Parser::new(source).parse_structured();
//! assert_eq!(sections.get("Colors").unwrap()[0].value, "blue");
//! assert_eq!(sections.get("variables").unwrap()[0].name, "size");
//! ```

pub mod declaration;
pub mod grammar;
pub mod lexer;
pub mod map;
pub mod sections;

pub use crate::parser::declaration::parse_declaration;
pub use crate::parser::grammar::{DEFAULT_SECTION, SECTION_TAG};
pub use crate::parser::lexer::{LexMode, Lexer, Token};
pub use crate::parser::map::expand_map;
pub use crate::parser::sections::SectionState;

use crate::types::{Declaration, Sections};

/// Extractor settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Section that collects declarations outside any section markers.
    pub default_section: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_section: DEFAULT_SECTION.to_string(),
        }
    }
}

/// Extracts exported declarations from one stylesheet source.
///
/// The parser only borrows the text, so the same instance can serve both
/// entry points.
#[derive(Clone, Debug)]
pub struct Parser<'a> {
    source: &'a str,
    config: ParserConfig,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, ParserConfig::default())
    }

    pub fn with_config(source: &'a str, config: ParserConfig) -> Self {
        Self { source, config }
    }

    /// Flat extraction: every declaration in source order, sections ignored.
    pub fn parse(&self) -> Vec<Declaration> {
        let declarations: Vec<Declaration> = Lexer::new(self.source, LexMode::Declarations)
            .filter_map(|token| match token {
                Token::Declaration(text) => parse_declaration(text).map(expand_map),
                marker => {
                    log::trace!("skipping section marker in flat mode: {marker:?}");
                    None
                }
            })
            .collect();

        log::debug!("extracted {} declarations", declarations.len());
        declarations
    }

    /// Structured extraction: declarations grouped by section.
    ///
    /// Returns an empty collection when the source holds no declarations or
    /// markers at all; otherwise the default section is always present.
    pub fn parse_structured(&self) -> Sections {
        let tokens: Vec<Token<'a>> = Lexer::new(self.source, LexMode::Structured).collect();
        if tokens.is_empty() {
            return Sections::new();
        }

        let sections = tokens
            .into_iter()
            .fold(SectionState::new(&self.config.default_section), SectionState::apply)
            .finish();

        log::debug!("extracted {} sections", sections.len());
        sections
    }

    /// Flat extraction encoded as a JSON array.
    pub fn parse_to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(&self.parse())?)
    }

    /// Structured extraction encoded as a JSON object.
    pub fn parse_structured_to_json(&self) -> crate::Result<String> {
        self.parse_structured().to_json()
    }
}

/// Shorthand for `Parser::new(source).parse()`.
pub fn parse_declarations(source: &str) -> Vec<Declaration> {
    Parser::new(source).parse()
}

/// Shorthand for `Parser::new(source).parse_structured()`.
pub fn parse_sections(source: &str) -> Sections {
    Parser::new(source).parse_structured()
}
