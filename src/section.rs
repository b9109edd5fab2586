//! Section representation for nested regulation documents.
//!
//! The source side is a tree of elements, each carrying an optional identifier and its
//! serialized inner content. The extractor only ever sees that tree through the
//! [`SectionSource`] capability, so any document representation can be indexed as long as it
//! can report a name, an identifier, its content and its ordered children.

use serde::Serialize;

/// Read-only view of a node in a nested document tree.
pub trait SectionSource: Sized {
    /// Element name (lower-case tag for markup), used to recognise child containers.
    fn name(&self) -> &str;
    /// Identifier attribute, absent when the node has none.
    fn identifier(&self) -> Option<&str>;
    /// Serialized inner content, captured verbatim into records.
    fn content(&self) -> &str;
    /// Direct element children in document order.
    fn children(&self) -> &[Self];
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Owned, immutable element of a parsed document.
pub struct SectionNode {
    /// Lower-case tag name, or `#document` for the tree root.
    pub name: String,
    /// Value of the `id` attribute if present (an empty value still counts as present).
    pub identifier: Option<String>,
    /// Source text between the element's start and end tags.
    pub content: String,
    /// Element children in document order.
    pub children: Vec<SectionNode>,
}

impl SectionNode {
    #[must_use]
    /// Creates a childless element.
    pub fn new(name: impl Into<String>, identifier: Option<&str>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.map(str::to_string),
            content: content.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    /// Attaches children, preserving their order.
    pub fn with_children(mut self, children: Vec<SectionNode>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    /// Finds the first element in pre-order whose identifier equals `id`, including `self`.
    pub fn find_by_id(&self, id: &str) -> Option<&SectionNode> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.identifier.as_deref() == Some(id) {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    #[must_use]
    /// Number of elements in this subtree, `self` included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(&node.children);
        }
        count
    }
}

impl Drop for SectionNode {
    // Unlinks descendants onto a heap stack so deep documents drop without deep recursion.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl SectionSource for SectionNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Snapshot of one visited node, the unit stored in a section index.
pub struct SectionRecord {
    /// Identifier of the source node; `None` is a valid, indexable state.
    pub key: Option<String>,
    /// Serialized content captured at extraction time.
    pub content: String,
    /// Walk level the record was produced at (1 for direct children of the root).
    pub depth: usize,
}

impl SectionRecord {
    #[must_use]
    /// Builds a record from its parts.
    pub fn new(key: Option<&str>, content: impl Into<String>, depth: usize) -> Self {
        Self {
            key: key.map(str::to_string),
            content: content.into(),
            depth,
        }
    }
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
