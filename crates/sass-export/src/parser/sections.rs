//! Section-scoped aggregation.
//!
//! Structured extraction folds the token stream through [`SectionState`].
//! The only state is the active section name:
//!
//! - `SectionStart(name)` makes `name` active (a blank name is ignored)
//! - `SectionEnd` makes the default section active again, whatever was open
//! - `Declaration` is parsed, expanded and appended to the active section
//!
//! Sections do not nest; a start inside an open section just switches to it.

use super::declaration::parse_declaration;
use super::lexer::Token;
use super::map::expand_map;
use crate::types::Sections;

/// One step of the structured fold.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionState {
    default_section: String,
    current: String,
    sections: Sections,
}

impl SectionState {
    /// Starts in the default section, whose bucket exists up front.
    pub fn new(default_section: impl Into<String>) -> Self {
        let default_section = default_section.into();
        let mut sections = Sections::new();
        sections.ensure(&default_section);
        Self {
            current: default_section.clone(),
            default_section,
            sections,
        }
    }

    /// The section that receives the next declaration.
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    /// Applies one token and returns the next state.
    pub fn apply(mut self, token: Token<'_>) -> Self {
        match token {
            Token::SectionStart(name) => {
                if name.is_empty() {
                    log::trace!("ignoring section start without a name");
                } else {
                    log::trace!("entering section {name:?}");
                    self.sections.ensure(&name);
                    self.current = name;
                }
            }
            Token::SectionEnd => {
                log::trace!("leaving section {:?}", self.current);
                self.current.clone_from(&self.default_section);
            }
            Token::Declaration(text) => {
                if let Some(declaration) = parse_declaration(text) {
                    self.sections.push(&self.current, expand_map(declaration));
                }
            }
        }
        self
    }

    pub fn finish(self) -> Sections {
        self.sections
    }
}
