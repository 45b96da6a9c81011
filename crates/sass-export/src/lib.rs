//! # sass-export - Exported Sass variable extraction
//!
//! Extracts `$variable: value;` declarations from Sass/SCSS source text
//! without compiling it, for documentation and export tooling. This crate
//! provides:
//!
//! - **Flat extraction**: every top-level declaration in source order
//! - **Structured extraction**: declarations grouped into named sections
//! - **Maps**: map literal values expanded into nested entries
//! - **Annotations**: `@sass-export-<tag>="..."` comments become `extend_<tag>` fields
//!
//! ## Quick Start
//!
//! ```rust
//! use sass_export::Parser;
//!
//! let source = r#"
//!     $primary: blue; // @sass-export-alias="Brand Blue"
//!     $breakpoints: (small: 576px, large: 992px);
//! "#;
//!
//! let declarations = Parser::new(source).parse();
//! assert_eq!(declarations.len(), 2);
//! assert_eq!(declarations[0].extend("alias"), Some("Brand Blue"));
//! assert_eq!(declarations[1].entries()[1].value, "992px");
//! ```
//!
//! ## Annotation Syntax
//!
//! ```scss
//! // @sass-export-subsection="Colors"
//! $primary: blue; /* @sass-export-alias="Brand Blue" */
//! // @end-sass-export-subsection
//! ```
//!
//! ## Not Supported
//!
//! - Expressions, functions and control flow are captured as literal text
//! - Nested sections
//!
//! ## Modules
//!
//! - [`parser`]: Tokenization, declaration parsing and section aggregation
//! - [`types`]: The extracted data model
//! - [`error`]: Error types for encoding results

pub mod error;
pub mod parser;
pub mod types;

pub use error::{Result, SassExportError};
pub use parser::{Parser, ParserConfig, parse_declarations, parse_sections};
pub use types::{Declaration, ExtendField, Section, Sections};
