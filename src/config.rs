//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! We look for a regtree.toml, and if present load settings from there. This selects which
//! element is the document root, which elements nest further sections, how deep the walk may
//! go, and which file suffixes count as documents.

use crate::extract::DEFAULT_MAX_DEPTH;
use facet::Facet;
use std::fs;
use std::path::Path;

/// File consulted by [`Config::load`].
pub const CONFIG_FILE: &str = "regtree.toml";

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from regtree.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "reg-content".to_string())]
    /// `id` of the element whose children form the first level; empty means the whole document.
    pub root_id: String,
    #[facet(default = "ol".to_string())]
    /// Tag of the sub-list elements that hold nested sections.
    pub container_tag: String,
    #[facet(default = DEFAULT_MAX_DEPTH)]
    /// Deepest walk level recorded before descent stops.
    pub max_depth: usize,
    #[facet(default = vec!["html".to_string(), "htm".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
}

impl Default for Config {
    /// Every field at its `#[facet(default)]` value.
    ///
    /// # Panics
    ///
    /// Panics if the empty configuration cannot be parsed.
    fn default() -> Self {
        facet_toml::from_str::<Self>("").unwrap()
    }
}

impl Config {
    #[must_use]
    /// Load configuration from regtree.toml in the working directory if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, falling back to defaults when it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        Self::parse(&contents).unwrap_or_else(|| {
            tracing::warn!(path = %path.display(), "ignoring unparseable config file");
            Self::default()
        })
    }

    #[must_use]
    /// Parse TOML settings, with absent keys taking their defaults.
    pub fn parse(contents: &str) -> Option<Self> {
        facet_toml::from_str::<Self>(contents).ok()
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
