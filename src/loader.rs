//! Filesystem entry points for catalog files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSetBuilder,
};
use ignore::WalkBuilder;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::ts::{
    self,
    ParseError,
};

/// Glob used when the caller does not supply patterns.
const DEFAULT_PATTERN: &str = "**/*.ts";

/// Errors raised while loading catalogs from disk.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// The file could not be read.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The file content is not a valid catalog.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] ParseError),

    /// A discovery glob pattern is invalid.
    #[error("{0}")]
    Pattern(String),
}

/// Load and parse a single catalog file.
///
/// # Errors
/// Fails when the file cannot be read or its content is malformed.
pub fn load_catalog_file(path: &Path) -> Result<Catalog, LoaderError> {
    tracing::debug!(path = %path.display(), "Loading catalog file");
    let content = std::fs::read_to_string(path)?;
    let catalog = ts::parse(&content)?;
    tracing::debug!(
        contexts = catalog.contexts.len(),
        messages = catalog.message_count(),
        "Loaded catalog"
    );
    Ok(catalog)
}

/// Find catalog files under a directory tree.
///
/// Patterns default to `**/*.ts` when empty and match paths relative to
/// `root`. Results are sorted for deterministic downstream merges.
/// Unreadable directory entries are logged and skipped.
///
/// # Errors
/// Fails when a pattern is not a valid glob.
pub fn find_catalog_files(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, LoaderError> {
    let mut builder = GlobSetBuilder::new();
    if patterns.is_empty() {
        builder.add(compile_pattern(DEFAULT_PATTERN)?);
    } else {
        for pattern in patterns {
            builder.add(compile_pattern(pattern)?);
        }
    }
    let matcher = builder
        .build()
        .map_err(|e| LoaderError::Pattern(format!("failed to build catalog patterns: {e}")))?;

    let mut found = Vec::new();
    for entry in WalkBuilder::new(root).build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Failed to walk directory entry: {e}");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        if matcher.is_match(relative) {
            found.push(path.to_path_buf());
        }
    }
    found.sort();

    tracing::debug!(root = %root.display(), count = found.len(), "Discovered catalog files");
    Ok(found)
}

/// Compile one glob pattern.
fn compile_pattern(pattern: &str) -> Result<Glob, LoaderError> {
    Glob::new(pattern)
        .map_err(|e| LoaderError::Pattern(format!("invalid catalog pattern '{pattern}': {e}")))
}
