//! Facet index configuration via `facets.toml`
//!
//! The configuration declares the full facet hierarchy plus the path syntax.
//! It is read once when an index is built; changing it means rebuilding the
//! index.

use crate::error::{Error, Result};
use crate::path::{FacetSyntax, DEFAULT_MAX_DEPTH, DEFAULT_MAX_TERM_BYTES, DEFAULT_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name used by hosts that keep one next to their catalog.
pub const CONFIG_FILE_NAME: &str = "facets.toml";

/// Facet index configuration loaded from `facets.toml`.
///
/// # Example
///
/// ```toml
/// separator = ":"
/// strict = true
/// facets = ["price", "price:0-100", "color", "color:blue"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetConfig {
    /// Segment separator, a single character.
    #[serde(default = "default_separator")]
    pub separator: char,
    /// Reject leaf terms that are not declared in `facets`.
    #[serde(default = "default_strict")]
    pub strict: bool,
    /// Maximum number of segments per path.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Maximum path length in bytes.
    #[serde(default = "default_max_term_bytes")]
    pub max_term_bytes: usize,
    /// Every known facet path. Each path's ancestors must be listed too.
    #[serde(default)]
    pub facets: Vec<String>,
}

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

fn default_strict() -> bool {
    true
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_max_term_bytes() -> usize {
    DEFAULT_MAX_TERM_BYTES
}

impl Default for FacetConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            strict: default_strict(),
            max_depth: default_max_depth(),
            max_term_bytes: default_max_term_bytes(),
            facets: Vec::new(),
        }
    }
}

impl FacetConfig {
    /// Config with default syntax for the given facet list
    pub fn new<I, S>(facets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            facets: facets.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Toggle strict leaf-term checking
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Use a different separator
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Path syntax described by this config
    pub fn syntax(&self) -> FacetSyntax {
        FacetSyntax::new(self.separator).with_limits(self.max_depth, self.max_term_bytes)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Facet index configuration
#
# Segment separator for hierarchical facet paths (default ":")
separator = ":"

# Reject documents indexed with facets that are not declared below (default true)
strict = true

# Limits on a single facet path
max_depth = 32
max_term_bytes = 1024

# Every known facet path. Parents must be declared alongside their children.
facets = []
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the text is not valid TOML for this schema.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FacetConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse facet config: {}", e)))?;
        config.check()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::Config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    fn check(&self) -> Result<()> {
        if self.max_depth == 0 || self.max_term_bytes == 0 {
            return Err(Error::Config(
                "max_depth and max_term_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
