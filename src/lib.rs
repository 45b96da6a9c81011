//! Exported Sass variables for documentation and export tooling.
//!
//! Re-exports the [`sass_export`] extractor so hosts depend on one crate.
//!
//! ```rust
//! use sass_export_rs::{Parser, Sections};
//!
//! let source = r#"
//!     // @sass-export-subsection="Colors"
//!     $primary: blue; // @sass-export-alias="Brand Blue"
//!     // @end-sass-export-subsection
//!     $size: 10px;
//! "#;
//!
//! let sections: Sections = Parser::new(source).parse_structured();
//! let colors = sections.get("Colors").unwrap();
//! assert_eq!(colors[0].extend("alias"), Some("Brand Blue"));
//! ```

pub use sass_export::*;
