//! Format trait and implementations for different document markups.
//!
//! A format supplies the tree-sitter grammar for a markup language along with the queries
//! needed to recover element identifiers, and knows how to lower the syntax tree into the
//! owned [`SectionNode`](crate::section::SectionNode) tree the extractor walks.

use crate::error::Result;
use crate::section::SectionNode;

pub mod html;

/// Markup language front-end.
pub trait Format {
    /// Grammar used to parse documents of this format.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing identifier attribute values as `@id`, scoped to their element.
    fn identifier_query(&self) -> &str;
    /// Parses `source` into an element tree rooted at a synthetic `#document` node.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded, the query is invalid, or parsing fails.
    fn parse(&self, source: &str) -> Result<SectionNode>;
}
