//! Read-only cache-folder queries.
//!
//! The cache folder holds previously downloaded artifacts keyed by
//! destination filename. Nothing in this crate ever writes to it.

use crate::CatalogError;
use offgrid_schema::ContentDescriptor;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Whether a descriptor's artifact is already present in the cache folder.
///
/// A hit requires a file named `descriptor.name` directly under
/// `cache_folder` with a size equal to `descriptor.archive_size`. With
/// `verify_checksum`, the file's SHA-256 must additionally match the
/// descriptor checksum; a descriptor without a checksum fails verification.
pub fn is_cached(
    descriptor: &ContentDescriptor,
    cache_folder: &Path,
    verify_checksum: bool,
) -> Result<bool, CatalogError> {
    let path = cache_folder.join(&descriptor.name);
    let Ok(meta) = path.metadata() else {
        return Ok(false);
    };
    if meta.len() != descriptor.archive_size {
        debug!(
            "cache size mismatch for '{}': {} != {}",
            descriptor.name,
            meta.len(),
            descriptor.archive_size
        );
        return Ok(false);
    }

    if verify_checksum {
        let Some(expected) = descriptor.checksum.as_deref() else {
            return Ok(false);
        };
        let actual = file_sha256(&path)?;
        return Ok(actual == expected);
    }

    Ok(true)
}

/// SHA-256 of a file's contents, as a lowercase hex string.
pub fn file_sha256(path: &Path) -> Result<String, std::io::Error> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
