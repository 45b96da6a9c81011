//! Error types for the declaration extractor.
//!
//! Extraction itself never fails: malformed input degrades to fewer
//! declarations. The only fallible surface is encoding results for
//! downstream tooling.

use thiserror::Error;

/// Errors that can occur when exporting extracted declarations.
///
/// # Examples
///
/// ```rust
/// use sass_export::Parser;
///
/// let json = Parser::new("$primary: blue;").parse_to_json().unwrap();
/// assert_eq!(json, r#"[{"name":"primary","value":"blue"}]"#);
/// ```
#[derive(Error, Debug)]
pub enum SassExportError {
    /// The extracted model could not be encoded as JSON.
    #[error("failed to encode declarations as JSON")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SassExportError>;
