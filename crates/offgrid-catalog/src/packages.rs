//! Prioritized package catalogs: ZIM files and static-site ZIPs selected by
//! package identifier.

use crate::CatalogError;
use offgrid_schema::{ContentDescriptor, PACKAGE_EXPANSION};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Package `type` value marking ZIM files, which expand 1:1. Everything else
/// is shipped as a ZIP and gets a 10% expansion margin.
pub const ZIM_PACKAGE_TYPE: &str = "zim";

/// One package record, as found in a package catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageEntry {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: u64,
    pub sha256sum: String,
    /// Human/display identifier; the package id is used when absent.
    #[serde(default)]
    pub langid: Option<String>,
}

/// A single catalog: package id to entry.
#[derive(Debug, Clone, Default)]
pub struct PackageCatalog {
    entries: BTreeMap<String, PackageEntry>,
}

impl PackageCatalog {
    pub fn new(entries: BTreeMap<String, PackageEntry>) -> Self {
        Self { entries }
    }

    pub fn from_json_str(input: &str) -> Result<Self, CatalogError> {
        let entries: BTreeMap<String, PackageEntry> = serde_json::from_str(input)?;
        Ok(Self::new(entries))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn get(&self, package_id: &str) -> Option<&PackageEntry> {
        self.entries.get(package_id)
    }

    pub fn package_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// An ordered set of package catalogs. Priority matters: the first catalog
/// containing a package id wins.
#[derive(Debug, Clone, Default)]
pub struct PackageCatalogSet {
    catalogs: Vec<PackageCatalog>,
}

impl PackageCatalogSet {
    pub fn new(catalogs: Vec<PackageCatalog>) -> Self {
        Self { catalogs }
    }

    /// Resolve a package id to a descriptor.
    ///
    /// Returns `Ok(None)` when no catalog knows the id — callers are expected
    /// to skip missing packages rather than abort. A present entry with a
    /// zero size is still an error.
    pub fn find(&self, package_id: &str) -> Result<Option<ContentDescriptor>, CatalogError> {
        for catalog in &self.catalogs {
            let Some(entry) = catalog.get(package_id) else {
                continue;
            };
            let ext = if entry.kind == ZIM_PACKAGE_TYPE {
                "zim"
            } else {
                "zip"
            };
            let langid = entry.langid.as_deref().unwrap_or(package_id);
            let expanded = if entry.kind == ZIM_PACKAGE_TYPE {
                entry.size
            } else {
                (entry.size as f64 * PACKAGE_EXPANSION) as u64
            };
            let descriptor = ContentDescriptor::new(
                entry.url.clone(),
                format!("{langid}.{ext}"),
                Some(entry.sha256sum.clone()),
                entry.size,
                expanded,
                false,
            )?;
            return Ok(Some(descriptor));
        }
        debug!("package '{package_id}' not found in any catalog");
        Ok(None)
    }

    /// All resolvable package ids, in catalog priority order, without
    /// duplicates (a shadowed id is listed once, for its winning catalog).
    pub fn package_ids(&self) -> Vec<String> {
        let mut seen = std::collections::BTreeSet::new();
        let mut ids = Vec::new();
        for catalog in &self.catalogs {
            for id in catalog.package_ids() {
                if seen.insert(id.to_owned()) {
                    ids.push(id.to_owned());
                }
            }
        }
        ids
    }
}
