//! regtree: section tree extraction and indexing for nested regulation documents.
//!
//! A regulation is published as deeply nested markup: sections hold paragraphs, and
//! paragraphs hold sub-lists of further paragraphs. Every view of the document (table of
//! contents, sidebar, content pane, definitions) wants the same thing: a flat, addressable
//! list of those sections in reading order. This crate builds it in one pass.
//!
//! ```
//! use regtree::extract::Extractor;
//! use regtree::section::SectionNode;
//!
//! let root = SectionNode::new("div", Some("reg-content"), "").with_children(vec![
//!     SectionNode::new("li", Some("intro"), "Intro"),
//!     SectionNode::new("li", Some("body"), "Body").with_children(vec![
//!         SectionNode::new("ol", None, "").with_children(vec![SectionNode::new(
//!             "li",
//!             Some("body-1"),
//!             "First",
//!         )]),
//!     ]),
//! ]);
//!
//! let index = Extractor::default().index(&root);
//! let keys: Vec<_> = index.entries_in_order().filter_map(|r| r.key.as_deref()).collect();
//! assert_eq!(keys, ["intro", "body", "body-1"]);
//! assert_eq!(index.get("body-1").map(|r| r.content.as_str()), Some("First"));
//! ```
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod diff;
pub mod error;
pub mod extract;
pub mod formats;
pub mod index;
pub mod input;
pub mod section;

pub use error::{Error, Result};
pub use extract::{Descent, Extractor};
pub use index::SectionIndex;
pub use section::{SectionNode, SectionRecord, SectionSource};
