//! Marking up the changes between two versions of a regulation.
//!
//! A diff maps section labels to an operation. Whole sections that were added or deleted are
//! wrapped in `<ins>`/`<del>`; modified sections carry character-level changes that are woven
//! into the original text. Positions count characters, not bytes.

use crate::error::{Error, Result};
use crate::index::SectionIndex;
use crate::section::SectionRecord;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// What happened to a section between versions.
pub enum DiffOp {
    /// The section is new.
    Added,
    /// The section was removed.
    Deleted,
    /// The section text changed; see [`LabelDiff::text`].
    Modified,
    /// Any other operation, left untouched.
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Clone, Debug)]
/// Diff entry for a single section label.
pub struct LabelDiff {
    /// Section-level operation.
    pub op: DiffOp,
    /// Character-level changes, applied in order.
    #[serde(default)]
    pub text: Option<Vec<TextChange>>,
    /// Payload of an added section.
    #[serde(default)]
    pub node: Option<DiffNode>,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
/// Section body carried by an `added` entry.
pub struct DiffNode {
    /// Section text.
    #[serde(default)]
    pub text: String,
    /// Section heading, if the section has one.
    #[serde(default)]
    pub title: Option<String>,
}

impl DiffNode {
    #[must_use]
    /// Record content for the section: the title on its own line, then the text.
    pub fn content(&self) -> String {
        match self.title {
            Some(ref title) => format!("{title}\n{}", self.text),
            None => self.text.clone(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(from = "RawTextChange")]
/// One character-level change to a section's text.
pub enum TextChange {
    /// Insert `text` after the character at `position`.
    Insert {
        /// Character the insertion follows.
        position: usize,
        /// Inserted text.
        text: String,
    },
    /// Delete the characters in `start..end`.
    Delete {
        /// First deleted character.
        start: usize,
        /// One past the last deleted character.
        end: usize,
    },
    /// Delete `start..end` and place `text` right after the deletion.
    Replace {
        /// First deleted character.
        start: usize,
        /// One past the last deleted character.
        end: usize,
        /// Replacement text.
        text: String,
    },
}

// Wire shapes: ["insert", pos, text], ["delete", start, end], [["delete", s, e], ["insert", _, text]]
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTextChange {
    Replace(RawDelete, RawInsert),
    Insert(InsertTag, usize, String),
    Delete(DeleteTag, usize, usize),
}

#[derive(Deserialize)]
struct RawDelete(DeleteTag, usize, usize);

#[derive(Deserialize)]
struct RawInsert(InsertTag, usize, String);

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum InsertTag {
    Insert,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum DeleteTag {
    Delete,
}

impl From<RawTextChange> for TextChange {
    fn from(raw: RawTextChange) -> Self {
        match raw {
            RawTextChange::Replace(
                RawDelete(DeleteTag::Delete, start, end),
                RawInsert(InsertTag::Insert, _, text),
            ) => Self::Replace { start, end, text },
            RawTextChange::Insert(InsertTag::Insert, position, text) => {
                Self::Insert { position, text }
            }
            RawTextChange::Delete(DeleteTag::Delete, start, end) => Self::Delete { start, end },
        }
    }
}

/// One character of the original text with the markup accumulated around it.
struct Slot {
    before: String,
    ch: char,
    after: String,
}

/// Per-character buffer that markup is attached to without shifting positions.
struct MarkedText {
    slots: Vec<Slot>,
    tail: String,
}

impl MarkedText {
    fn new(original: &str) -> Self {
        Self {
            slots: original
                .chars()
                .map(|ch| Slot {
                    before: String::new(),
                    ch,
                    after: String::new(),
                })
                .collect(),
            tail: String::new(),
        }
    }

    /// Appends an insertion after `position`, or after the last character at the end.
    fn insert(&mut self, position: usize, text: &str) -> std::result::Result<(), usize> {
        let len = self.slots.len();
        let target = match position {
            p if p > len => return Err(p),
            0 if len == 0 => &mut self.tail,
            p if p == len => &mut self.slots[len - 1].after,
            p => &mut self.slots[p].after,
        };
        target.push_str("<ins>");
        target.push_str(text);
        target.push_str("</ins>");
        Ok(())
    }

    fn delete(&mut self, start: usize, end: usize) -> std::result::Result<(), usize> {
        if end > self.slots.len() {
            return Err(end);
        }
        if start >= end {
            return Ok(());
        }
        self.slots[start].before.insert_str(0, "<del>");
        self.slots[end - 1].after.push_str("</del>");
        Ok(())
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for slot in &self.slots {
            out.push_str(&slot.before);
            out.push(slot.ch);
            out.push_str(&slot.after);
        }
        out.push_str(&self.tail);
        out
    }
}

/// Applies a version diff to section text, producing `<ins>`/`<del>` markup.
pub struct DiffApplier {
    diff: BTreeMap<String, LabelDiff>,
    label_requested: String,
}

impl DiffApplier {
    #[must_use]
    /// Wraps a parsed diff; `label_requested` scopes [`DiffApplier::added_labels`].
    pub fn new(diff: BTreeMap<String, LabelDiff>, label_requested: impl Into<String>) -> Self {
        Self {
            diff,
            label_requested: label_requested.into(),
        }
    }

    /// Parses a diff from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a label-to-diff mapping.
    pub fn from_json(json: &str, label_requested: impl Into<String>) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?, label_requested))
    }

    /// Returns `original` with the changes recorded for `label` marked up.
    ///
    /// Labels without an entry, and modified entries without text changes, come back as-is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DiffPosition`] if a change points past the end of the text.
    pub fn apply_diff(&self, original: &str, label: &str) -> Result<String> {
        let Some(entry) = self.diff.get(label) else {
            return Ok(original.to_string());
        };

        match (entry.op, &entry.text) {
            (DiffOp::Deleted, _) => Ok(format!("<del>{original}</del>")),
            (DiffOp::Added, _) => Ok(format!("<ins>{original}</ins>")),
            (_, Some(changes)) => Self::apply_text_changes(original, label, changes),
            (_, None) => Ok(original.to_string()),
        }
    }

    fn apply_text_changes(
        original: &str,
        label: &str,
        changes: &[TextChange],
    ) -> Result<String> {
        let mut text = MarkedText::new(original);
        let out_of_range = |position| Error::DiffPosition {
            label: label.to_string(),
            position,
            len: text_len(original),
        };

        for change in changes {
            match change {
                TextChange::Insert { position, text: new } => {
                    text.insert(*position, &format!("{new} "))
                        .map_err(out_of_range)?;
                }
                TextChange::Delete { start, end } => {
                    text.delete(*start, *end).map_err(out_of_range)?;
                }
                TextChange::Replace { start, end, text: new } => {
                    text.delete(*start, *end).map_err(out_of_range)?;
                    if *end > 0 {
                        text.insert(*end - 1, new).map_err(out_of_range)?;
                    }
                }
            }
        }

        tracing::trace!(label, changes = changes.len(), "applied text diff");
        Ok(text.render())
    }

    #[must_use]
    /// Labels of regulation-text sections added beneath the requested label, in label order.
    ///
    /// Interpretation labels are left out.
    pub fn added_labels(&self) -> Vec<&str> {
        self.diff
            .iter()
            .filter(|(label, entry)| {
                entry.op == DiffOp::Added
                    && label.starts_with(&self.label_requested)
                    && !label.contains("Interp")
            })
            .map(|(label, _)| label.as_str())
            .collect()
    }

    #[must_use]
    /// Builds a new index with every added section merged in beneath its parent.
    ///
    /// Each label from [`added_labels`](Self::added_labels) that the index lacks becomes a
    /// record placed after the last record of its parent's subtree, one level deeper than the
    /// parent. Parents sort before their children, so a parent added by the same diff is
    /// placed first and its children follow it. A label whose parent is nowhere to be found is
    /// appended at the top level.
    pub fn add_to_index(&self, index: &SectionIndex) -> SectionIndex {
        let mut records: Vec<SectionRecord> = index.entries_in_order().cloned().collect();

        for label in self.added_labels() {
            if records.iter().any(|r| r.key.as_deref() == Some(label)) {
                continue;
            }
            let content = self
                .diff
                .get(label)
                .and_then(|entry| entry.node.as_ref())
                .map(DiffNode::content)
                .unwrap_or_default();

            let parent = parent_label(label)
                .and_then(|p| records.iter().rposition(|r| r.key.as_deref() == Some(p)));
            match parent {
                Some(at) => {
                    let depth = records[at].depth;
                    let end = records[at + 1..]
                        .iter()
                        .position(|r| r.depth <= depth)
                        .map_or(records.len(), |offset| at + 1 + offset);
                    records.insert(end, SectionRecord::new(Some(label), content, depth + 1));
                }
                None => {
                    tracing::debug!(label, "no parent section, adding at top level");
                    records.push(SectionRecord::new(Some(label), content, 1));
                }
            }
        }

        let mut merged = SectionIndex::new();
        for record in records {
            merged.set(record);
        }
        merged
    }

    /// Builds a new index whose keyed records carry diff markup.
    ///
    /// Record order, depths and keyless records are preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if any change points outside its section's text.
    pub fn apply_to_index(&self, index: &SectionIndex) -> Result<SectionIndex> {
        let mut marked = SectionIndex::new();
        for record in index.entries_in_order() {
            let content = match record.key.as_deref() {
                Some(key) => self.apply_diff(&record.content, key)?,
                None => record.content.clone(),
            };
            marked.set(SectionRecord::new(record.key.as_deref(), content, record.depth));
        }
        Ok(marked)
    }
}

/// Label of the enclosing section: everything before the last `-`.
fn parent_label(label: &str) -> Option<&str> {
    label.rsplit_once('-').map(|(parent, _)| parent)
}

fn text_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
#[path = "tests/diff.rs"]
mod tests;
