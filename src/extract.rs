//! Depth-first extraction of a nested section tree into a flat [`SectionIndex`].
//!
//! Each direct child of the walked node becomes one record, in document order, before any of
//! its descendants are visited. Where the walk goes next is decided by two facts about the
//! child: whether it has an identifier, and whether it holds any child containers (the
//! sub-lists, `<ol>` by default, that nest further sections).
//!
//! | identifier | containers | next level                      |
//! |------------|------------|---------------------------------|
//! | any        | yes        | children of every container     |
//! | yes        | no         | the child's own children        |
//! | no         | no         | none, the child is a leaf       |

use crate::config::Config;
use crate::index::SectionIndex;
use crate::section::{SectionRecord, SectionSource};

/// Default cap on walk depth before descent is abandoned.
pub const DEFAULT_MAX_DEPTH: usize = 512;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Where the walk continues after recording a node.
pub enum Descent {
    /// Walk the children of each child container in order.
    Containers,
    /// Walk the node's own children as the next level.
    OwnChildren,
    /// Stop here.
    Leaf,
}

impl Descent {
    #[must_use]
    /// Resolves the case table over identifier presence and container presence.
    pub fn decide(has_key: bool, has_containers: bool) -> Self {
        match (has_key, has_containers) {
            (_, true) => Self::Containers,
            (true, false) => Self::OwnChildren,
            (false, false) => Self::Leaf,
        }
    }
}

#[derive(Clone, Debug)]
/// Walks a section tree and registers every visited node into an index.
pub struct Extractor {
    container_tag: String,
    max_depth: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new("ol", DEFAULT_MAX_DEPTH)
    }
}

impl Extractor {
    #[must_use]
    /// Creates an extractor descending through `container_tag` elements, at most `max_depth`
    /// levels below the root.
    pub fn new(container_tag: impl Into<String>, max_depth: usize) -> Self {
        Self {
            container_tag: container_tag.into().to_ascii_lowercase(),
            max_depth,
        }
    }

    #[must_use]
    /// Creates an extractor from the loaded configuration.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.container_tag.as_str(), cfg.max_depth)
    }

    /// Records every node reachable from `root` into `index`, in pre-order.
    ///
    /// The root itself is not recorded; its direct children are the first level. Records
    /// already in `index` are kept and may be overwritten by key.
    pub fn extract<N: SectionSource>(&self, root: &N, index: &mut SectionIndex) {
        let before = index.len();
        self.walk(root, 1, index);
        tracing::debug!(
            records = index.len() - before,
            distinct_keys = index.keys().count(),
            "extracted section tree"
        );
    }

    #[must_use]
    /// Extracts `root` into a fresh index.
    pub fn index<N: SectionSource>(&self, root: &N) -> SectionIndex {
        let mut index = SectionIndex::new();
        self.extract(root, &mut index);
        index
    }

    fn walk<N: SectionSource>(&self, parent: &N, depth: usize, index: &mut SectionIndex) {
        if depth > self.max_depth {
            if !parent.children().is_empty() {
                tracing::warn!(
                    max_depth = self.max_depth,
                    "section tree nested too deeply, not descending further"
                );
            }
            return;
        }

        for child in parent.children() {
            let key = child.identifier();
            let containers = self.containers(child);

            index.set(SectionRecord::new(key, child.content(), depth));

            match Descent::decide(key.is_some(), !containers.is_empty()) {
                Descent::Containers => {
                    for container in containers {
                        self.walk(container, depth + 1, index);
                    }
                }
                Descent::OwnChildren => self.walk(child, depth + 1, index),
                Descent::Leaf => {}
            }
        }
    }

    #[must_use]
    /// Finds the outermost container elements beneath `node`, in document order.
    ///
    /// Containers nested inside another container are left for the deeper level to find.
    pub fn containers<'a, N: SectionSource>(&self, node: &'a N) -> Vec<&'a N> {
        let mut found = Vec::new();
        let mut stack: Vec<&N> = node.children().iter().rev().collect();

        while let Some(candidate) = stack.pop() {
            if candidate.name().eq_ignore_ascii_case(&self.container_tag) {
                found.push(candidate);
            } else {
                stack.extend(candidate.children().iter().rev());
            }
        }

        found
    }
}

#[cfg(test)]
#[path = "tests/extract.rs"]
mod tests;
