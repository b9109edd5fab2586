//! Error type shared by document loading, parsing and diff application.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for regtree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning documents into section indexes.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading a document or diff failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The grammar could not be loaded into the parser.
    #[error("Tree-sitter language error: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// A format query failed to compile.
    #[error("Tree-sitter query error: {0}")]
    Query(#[from] tree_sitter::QueryError),

    /// The parser produced no tree.
    #[error("Failed to parse {0}")]
    Parse(String),

    /// The configured root element is not in the document.
    #[error("No element with id {id:?} in {}", path.display())]
    RootNotFound {
        /// Requested root identifier.
        id: String,
        /// Document that was searched.
        path: PathBuf,
    },

    /// A diff file was not valid JSON for the expected shape.
    #[error("Invalid diff: {0}")]
    Json(#[from] serde_json::Error),

    /// A text change pointed outside the section it targets.
    #[error("Diff for {label} references position {position} in text of length {len}")]
    DiffPosition {
        /// Section label the change belongs to.
        label: String,
        /// Offending character position.
        position: usize,
        /// Character length of the original text.
        len: usize,
    },
}
