//! Error types for PrintRender
//!
//! The cascade core never fails on malformed input: extraction, tree
//! building, matching and resolution all degrade gracefully. What the
//! tree builder *tolerates* is still worth reporting, so `ParseError`
//! doubles as a non-fatal diagnostic collected during the build pass.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and
//! proper error trait implementations.

use thiserror::Error;

/// Result type alias for PrintRender operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for PrintRender
#[derive(Error, Debug)]
pub enum Error {
  /// HTML or CSS parsing problem
  #[error("Parse error: {0}")]
  Parse(#[from] ParseError),

  /// Generic error for miscellaneous issues
  #[error("{0}")]
  Other(String),
}

/// Parse diagnostics for HTML fragments
///
/// The tree builder never aborts; these describe input it had to repair.
/// Collected by [`crate::html::TreeBuilder::build_with_diagnostics`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
  /// A closing tag appeared with no matching open element
  #[error("Mismatched closing tag </{tag}>")]
  MismatchedClosingTag { tag: String },

  /// An element was still open when the fragment ended
  #[error("Unclosed tag <{tag}> at end of fragment")]
  UnclosedTag { tag: String },
}
