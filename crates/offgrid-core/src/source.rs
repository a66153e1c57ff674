//! Descriptors for user-supplied content, local file or remote URL.

use crate::CoreError;
use offgrid_remote::SizeLookup;
use offgrid_schema::{is_remote, ContentDescriptor, DescriptorError};
use std::path::Path;
use tracing::debug;

/// Descriptor for a local file. Stat only, no further I/O; the caller is
/// responsible for copying the file into the cache before building.
pub fn from_local_file(path: &Path) -> Result<ContentDescriptor, CoreError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let size = match path.metadata() {
        Ok(meta) => meta.len(),
        Err(e) => {
            debug!("stat failed for {}: {e}", path.display());
            return Err(DescriptorError::InvalidContent(name).into());
        }
    };
    Ok(ContentDescriptor::for_file(
        format!("file://{}", path.display()),
        name,
        size,
    )?)
}

/// Descriptor for a remote URL, sized via a metadata-only HEAD request.
/// Nothing is downloaded here.
pub fn from_remote_url(url: &str, lookup: &SizeLookup) -> Result<ContentDescriptor, CoreError> {
    let size = lookup.content_length(url)?;
    let name = url.rsplit('/').next().unwrap_or(url).to_owned();
    Ok(ContentDescriptor::for_file(url, name, size)?)
}

/// Dispatch between local and remote descriptor construction.
pub fn from_path_or_url(
    path_or_url: &str,
    lookup: &SizeLookup,
) -> Result<ContentDescriptor, CoreError> {
    if is_remote(path_or_url) {
        from_remote_url(path_or_url, lookup)
    } else {
        from_local_file(Path::new(path_or_url))
    }
}
