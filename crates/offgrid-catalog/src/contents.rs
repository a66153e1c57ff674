//! The static content catalog: well-known downloadable artifacts keyed by
//! content key (`nomad_zip`, `wikifundi_langpack_fr`, ...).

use crate::CatalogError;
use offgrid_schema::ContentDescriptor;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Catalog key of the base image every hotspot build starts from.
pub const MASTER_IMAGE_KEY: &str = "hotspot_master_image";

/// One raw catalog record, as found in the contents JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub checksum: Option<String>,
    pub archive_size: u64,
    /// Defaults to `archive_size` when the catalog does not state one.
    #[serde(default)]
    pub expanded_size: Option<u64>,
    #[serde(default)]
    pub copied_on_destination: bool,
    /// Only present on the master image entry.
    #[serde(default)]
    pub root_partition_size: Option<u64>,
}

/// The hotspot master image, read off its dedicated catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct MasterImage {
    /// As-downloaded size; counts against temporary build storage.
    pub archive_size: u64,
    /// Root partition size of the image, the floor of every built image.
    pub root_partition_size: u64,
}

/// Immutable lookup table from content key to descriptor fields, loaded once
/// at startup and shared by reference.
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    entries: BTreeMap<String, ContentEntry>,
}

impl ContentCatalog {
    pub fn new(entries: BTreeMap<String, ContentEntry>) -> Self {
        Self { entries }
    }

    pub fn from_json_str(input: &str) -> Result<Self, CatalogError> {
        let entries: BTreeMap<String, ContentEntry> = serde_json::from_str(input)?;
        Ok(Self::new(entries))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Look up a fixed content key. A miss is a programming error on the
    /// caller's side (the keys are hardcoded), hence a hard failure.
    pub fn get(&self, key: &str) -> Result<ContentDescriptor, CatalogError> {
        let entry = self
            .entries
            .get(key)
            .ok_or_else(|| CatalogError::UnknownContent(key.to_owned()))?;
        let expanded = entry.expanded_size.unwrap_or(entry.archive_size);
        Ok(ContentDescriptor::new(
            entry.url.clone(),
            entry.name.clone(),
            entry.checksum.clone(),
            entry.archive_size,
            expanded,
            entry.copied_on_destination,
        )?)
    }

    /// The master image entry, with its `root_partition_size` field.
    pub fn master_image(&self) -> Result<MasterImage, CatalogError> {
        let entry = self
            .entries
            .get(MASTER_IMAGE_KEY)
            .ok_or_else(|| CatalogError::UnknownContent(MASTER_IMAGE_KEY.to_owned()))?;
        let root_partition_size =
            entry
                .root_partition_size
                .ok_or_else(|| CatalogError::MalformedEntry {
                    key: MASTER_IMAGE_KEY.to_owned(),
                    reason: "missing root_partition_size".to_owned(),
                })?;
        Ok(MasterImage {
            archive_size: entry.archive_size,
            root_partition_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ContentCatalog {
        ContentCatalog::from_json_str(
            r#"{
  "nomad_zip": {
    "url": "https://mirror.example.org/nomad.zip",
    "name": "nomad.zip",
    "checksum": "abcd",
    "archive_size": 100000000
  },
  "wikifundi_langpack_fr": {
    "url": "https://mirror.example.org/wikifundi_fr.tar.gz",
    "name": "wikifundi_fr.tar.gz",
    "archive_size": 2000,
    "expanded_size": 9000,
    "copied_on_destination": true
  },
  "hotspot_master_image": {
    "url": "https://mirror.example.org/master.img.zip",
    "name": "master.img.zip",
    "archive_size": 2500000000,
    "root_partition_size": 7000000000
  }
}"#,
        )
        .expect("catalog parses")
    }

    #[test]
    fn get_builds_descriptor_with_default_expansion() {
        let d = catalog().get("nomad_zip").unwrap();
        assert_eq!(d.archive_size, 100_000_000);
        assert_eq!(d.expanded_size, 100_000_000);
        assert_eq!(d.checksum.as_deref(), Some("abcd"));
        assert!(!d.copied_on_destination);
    }

    #[test]
    fn get_honors_explicit_expanded_size_and_copy_flag() {
        let d = catalog().get("wikifundi_langpack_fr").unwrap();
        assert_eq!(d.expanded_size, 9000);
        assert!(d.copied_on_destination);
    }

    #[test]
    fn unknown_key_is_a_hard_error() {
        let result = catalog().get("no_such_content");
        assert!(matches!(result, Err(CatalogError::UnknownContent(_))));
    }

    #[test]
    fn master_image_exposes_both_sizes() {
        let master = catalog().master_image().unwrap();
        assert_eq!(master.archive_size, 2_500_000_000);
        assert_eq!(master.root_partition_size, 7_000_000_000);
    }

    #[test]
    fn master_image_without_partition_size_is_malformed() {
        let catalog = ContentCatalog::from_json_str(
            r#"{"hotspot_master_image": {"url": "u", "name": "n", "archive_size": 1}}"#,
        )
        .unwrap();
        assert!(matches!(
            catalog.master_image(),
            Err(CatalogError::MalformedEntry { .. })
        ));
    }
}
