//! Locating documents on disk and turning them into section indexes.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::extract::Extractor;
use crate::formats::Format;
use crate::index::SectionIndex;
use crate::section::SectionNode;
use std::path::{Path, PathBuf};
use std::{fs, io};
use walkdir::WalkDir;

/// Expands files and directories into the sorted list of documents with a matching extension.
///
/// Files named explicitly are kept whatever their extension; directories are scanned
/// recursively.
///
/// # Errors
///
/// Returns an error if a path does not exist. Unreadable entries inside a directory are
/// logged and skipped.
pub fn find_documents(paths: &[PathBuf], extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for path in paths {
        if path.is_dir() {
            scan_dir(path, extensions, &mut documents);
        } else if path.is_file() {
            documents.push(path.clone());
        } else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ));
        }
    }

    documents.sort();
    documents.dedup();
    Ok(documents)
}

fn scan_dir(dir: &Path, extensions: &[String], documents: &mut Vec<PathBuf>) {
    // Symlinks are not followed, so a link back to an ancestor cannot loop.
    for result in WalkDir::new(dir).follow_links(false) {
        match result {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                if has_extension(path, extensions) {
                    documents.push(path.to_path_buf());
                } else {
                    tracing::trace!(path = %path.display(), "skipping non-document file");
                }
            }
            Err(e) => tracing::warn!(dir = %dir.display(), "skipping unreadable entry: {e}"),
        }
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
}

/// Reads and parses a document into its element tree.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_document(path: &Path, format: &impl Format) -> Result<SectionNode> {
    let source = fs::read_to_string(path)?;
    let document = format.parse(&source)?;
    tracing::debug!(
        path = %path.display(),
        elements = document.node_count() - 1,
        "parsed document"
    );
    Ok(document)
}

/// Selects the configured root element, or the whole document when no root is configured.
///
/// # Errors
///
/// Returns [`Error::RootNotFound`] if the document has no element with the configured id.
pub fn select_root<'a>(
    document: &'a SectionNode,
    cfg: &Config,
    path: &Path,
) -> Result<&'a SectionNode> {
    if cfg.root_id.is_empty() {
        return Ok(document);
    }
    document
        .find_by_id(&cfg.root_id)
        .ok_or_else(|| Error::RootNotFound {
            id: cfg.root_id.clone(),
            path: path.to_path_buf(),
        })
}

/// Loads a document and runs a single extraction pass into a fresh index.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or lacks the configured root.
pub fn index_document(path: &Path, format: &impl Format, cfg: &Config) -> Result<SectionIndex> {
    let document = load_document(path, format)?;
    let root = select_root(&document, cfg, path)?;
    Ok(Extractor::from_config(cfg).index(root))
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
