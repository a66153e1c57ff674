//! The `ContentDescriptor` value type and source classification helpers.
//!
//! A descriptor is created fresh on every listing pass and never persisted;
//! it is immutable after construction. All byte sizes are as reported by the
//! source (filesystem stat, HTTP Content-Length, or catalog entry).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Expansion multiplier for recognized archives (ZIP, tarballs).
pub const ARCHIVE_EXPANSION: f64 = 1.2;

/// Expansion multiplier for non-ZIM catalog packages (mostly ZIP files).
pub const PACKAGE_EXPANSION: f64 = 1.1;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("invalid content '{0}': size is zero or could not be determined")]
    InvalidContent(String),
}

/// One downloadable, possibly expandable artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDescriptor {
    /// Source location, remote URL or `file://` reference.
    pub url: String,
    /// Destination filename, used as the cache key.
    pub name: String,
    /// SHA-256 of the archive; present only for catalog-sourced items.
    pub checksum: Option<String>,
    /// As-downloaded byte size. Always greater than zero.
    pub archive_size: u64,
    /// Byte size after extraction/installation. Never below `archive_size`.
    pub expanded_size: u64,
    /// Whether the artifact is kept as an archive AND extracted onto the
    /// final image, doubling its footprint.
    pub copied_on_destination: bool,
}

impl ContentDescriptor {
    /// Build a descriptor from explicit fields, enforcing the size
    /// invariants: `archive_size > 0`, `expanded_size >= archive_size`.
    pub fn new(
        url: impl Into<String>,
        name: impl Into<String>,
        checksum: Option<String>,
        archive_size: u64,
        expanded_size: u64,
        copied_on_destination: bool,
    ) -> Result<Self, DescriptorError> {
        let name = name.into();
        if archive_size == 0 {
            return Err(DescriptorError::InvalidContent(name));
        }
        Ok(Self {
            url: url.into(),
            name,
            checksum,
            archive_size,
            expanded_size: expanded_size.max(archive_size),
            copied_on_destination,
        })
    }

    /// Descriptor for a user-supplied file or URL: unverified (no checksum),
    /// expanded size inflated by [`ARCHIVE_EXPANSION`] when the name
    /// classifies as an archive, equal to `archive_size` otherwise.
    pub fn for_file(
        url: impl Into<String>,
        name: impl Into<String>,
        archive_size: u64,
    ) -> Result<Self, DescriptorError> {
        let name = name.into();
        let expanded_size = if classify_archive(&name) {
            (archive_size as f64 * ARCHIVE_EXPANSION) as u64
        } else {
            archive_size
        };
        Self::new(url, name, None, archive_size, expanded_size, false)
    }
}

/// Whether a path or URL points at a remote source.
pub fn is_remote(path_or_url: &str) -> bool {
    path_or_url.starts_with("http")
}

/// Extension-based archive classification. Anything not in the known set is
/// treated as a plain file (expansion multiplier 1.0).
pub fn classify_archive(path: &str) -> bool {
    const ARCHIVE_SUFFIXES: [&str; 5] = [".zip", ".tar", ".tar.bz2", ".tar.gz", ".tar.xz"];
    ARCHIVE_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
}
