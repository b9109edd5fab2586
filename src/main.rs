//! regtree: index the sections of nested regulation documents.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use regtree::diff::DiffApplier;
use regtree::formats::html::HtmlFormat;
use regtree::{config, input, SectionIndex};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "regtree")]
#[command(about = "Section tree extraction and indexing for regulation documents", long_about = None)]
struct Args {
    /// Files or directories to index
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Id of the element whose children form the first level ("" for the whole document)
    #[arg(long, value_name = "ID")]
    root: Option<String>,

    /// Tag of the sub-list elements that nest sections
    #[arg(long, value_name = "TAG")]
    container: Option<String>,

    /// Print the content of a single section
    #[arg(long, value_name = "KEY")]
    get: Option<String>,

    /// Print every record as JSON
    #[arg(long)]
    json: bool,

    /// Mark up section content with a version diff loaded from JSON
    #[arg(long, value_name = "FILE")]
    diff: Option<PathBuf>,

    /// Label the diff was requested for
    #[arg(long, value_name = "LABEL", default_value = "")]
    label: String,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,
}

fn main() -> regtree::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("regtree=info")),
        )
        .init();

    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if let Some(root) = args.root {
        cfg.root_id = root;
    }
    if let Some(container) = args.container {
        cfg.container_tag = container;
    }
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }

    let documents = input::find_documents(&args.paths, &cfg.file_extensions)?;

    if documents.is_empty() {
        eprintln!("No matching files found");
        return Ok(());
    }

    let applier = match args.diff {
        Some(ref path) => Some(DiffApplier::from_json(&fs::read_to_string(path)?, args.label)?),
        None => None,
    };
    if let Some(ref applier) = applier {
        for label in applier.added_labels() {
            tracing::info!(label, "section added in this version");
        }
    }

    let format = HtmlFormat;
    for doc in &documents {
        let index = match prepare_index(doc, &format, &cfg, applier.as_ref()) {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!(path = %doc.display(), "skipping document: {e}");
                continue;
            }
        };

        if let Some(ref key) = args.get {
            match index.get(key) {
                Some(record) => println!("{}", record.content),
                None => eprintln!("{}: no section {key}", doc.display()),
            }
        } else if args.json {
            println!("{}", serde_json::to_string_pretty(&index)?);
        } else {
            print_outline(doc, &index);
        }
    }

    Ok(())
}

/// Indexes one document, then merges in added sections and marks it up with the diff, if any.
fn prepare_index(
    doc: &Path,
    format: &HtmlFormat,
    cfg: &config::Config,
    applier: Option<&DiffApplier>,
) -> regtree::Result<SectionIndex> {
    let index = input::index_document(doc, format, cfg)?;
    match applier {
        Some(applier) => applier.apply_to_index(&applier.add_to_index(&index)),
        None => Ok(index),
    }
}

/// Prints one line per record, indented by depth, in document order.
fn print_outline(doc: &Path, index: &SectionIndex) {
    println!("{} ({} sections)", doc.display(), index.len());
    for record in index.entries_in_order() {
        let indent = "  ".repeat(record.depth);
        match record.key {
            Some(ref key) => println!("{indent}{key}"),
            None => println!("{indent}-"),
        }
    }
}

#[cfg(test)]
#[path = "tests/main.rs"]
mod tests;
