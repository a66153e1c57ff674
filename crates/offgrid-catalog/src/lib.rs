//! Content and package catalogs for offgrid.
//!
//! This crate provides the catalog layer: the static `ContentCatalog` mapping
//! well-known content keys to descriptors, the prioritized `PackageCatalogSet`
//! resolving user-selected package identifiers, and read-only cache-folder
//! queries (existence, size, optional SHA-256 verification).
//!
//! Catalogs are explicit values constructed once at startup and passed by
//! reference into whatever needs them; there is no process-global catalog
//! state, and tests build a fresh catalog per case.

pub mod cache;
pub mod contents;
pub mod packages;

pub use cache::{file_sha256, is_cached};
pub use contents::{ContentCatalog, ContentEntry, MasterImage, MASTER_IMAGE_KEY};
pub use packages::{PackageCatalog, PackageCatalogSet, PackageEntry, ZIM_PACKAGE_TYPE};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("requested content '{0}' is not in the catalog")]
    UnknownContent(String),
    #[error("malformed catalog entry '{key}': {reason}")]
    MalformedEntry { key: String, reason: String },
    #[error(transparent)]
    Descriptor(#[from] offgrid_schema::DescriptorError),
}
