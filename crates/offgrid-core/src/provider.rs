//! Content providers: one pluggable module per optional feature area.
//!
//! Each provider exposes the artifacts its module needs
//! (`list_contents`) and an optional build-time action hook
//! (`run_actions`). Most modules have no action of their own because their
//! artifacts are downloaded and installed by the generic build step; the
//! hook exists so modules that do need custom cache population can carry it
//! themselves instead of being special-cased by the orchestrator.

use crate::source::from_path_or_url;
use crate::CoreError;
use offgrid_catalog::{ContentCatalog, PackageCatalogSet};
use offgrid_remote::SizeLookup;
use offgrid_schema::{is_remote, ContentDescriptor};
use std::path::Path;
use tracing::{debug, info, warn};

/// A pluggable content module.
///
/// Descriptors are rebuilt on every `list_contents` call; providers hold no
/// listing state between invocations.
pub trait ContentProvider {
    /// Human label for progress display.
    fn display_name(&self) -> &str;

    /// The artifacts this module requires, in a stable order.
    fn list_contents(&self) -> Result<Vec<ContentDescriptor>, CoreError>;

    /// Module-specific cache/mount population, run by the build
    /// orchestrator after downloads. The default is a no-op.
    fn run_actions(&self, cache_folder: &Path, mount_point: &Path) -> Result<(), CoreError> {
        let _ = (cache_folder, mount_point);
        Ok(())
    }
}

/// Ordered set of enabled providers; provider order is the declared module
/// order and is preserved through aggregation.
pub type Collection<'a> = Vec<Box<dyn ContentProvider + 'a>>;

/// EduPi notes app. No large downloads of its own, but the user may supply
/// a resource bundle as a local path or URL.
pub struct EdupiProvider<'a> {
    resources: Option<String>,
    lookup: &'a SizeLookup,
}

impl<'a> EdupiProvider<'a> {
    pub fn new(resources: Option<String>, lookup: &'a SizeLookup) -> Self {
        Self { resources, lookup }
    }
}

impl ContentProvider for EdupiProvider<'_> {
    fn display_name(&self) -> &str {
        "EduPi"
    }

    fn list_contents(&self) -> Result<Vec<ContentDescriptor>, CoreError> {
        match &self.resources {
            Some(path_or_url) => Ok(vec![from_path_or_url(path_or_url, self.lookup)?]),
            None => Ok(Vec::new()),
        }
    }

    fn run_actions(&self, cache_folder: &Path, _mount_point: &Path) -> Result<(), CoreError> {
        // A user-supplied local bundle is outside the download flow, so it
        // must be placed into the cache here.
        let Some(path_or_url) = &self.resources else {
            return Ok(());
        };
        if is_remote(path_or_url) {
            return Ok(());
        }
        let src = Path::new(path_or_url);
        let Some(name) = src.file_name() else {
            return Ok(());
        };
        let dest = cache_folder.join(name);
        info!("copying EduPi resources {} into cache", src.display());
        std::fs::copy(src, &dest)?;
        Ok(())
    }
}

/// A single fixed catalog artifact (APK or ZIP), the shape of most modules.
pub struct CatalogItemProvider<'a> {
    display_name: &'static str,
    content_key: &'static str,
    catalog: &'a ContentCatalog,
}

impl<'a> CatalogItemProvider<'a> {
    pub fn new(
        display_name: &'static str,
        content_key: &'static str,
        catalog: &'a ContentCatalog,
    ) -> Self {
        Self {
            display_name,
            content_key,
            catalog,
        }
    }
}

impl ContentProvider for CatalogItemProvider<'_> {
    fn display_name(&self) -> &str {
        self.display_name
    }

    fn list_contents(&self) -> Result<Vec<ContentDescriptor>, CoreError> {
        Ok(vec![self.catalog.get(self.content_key)?])
    }
}

/// Catalog packages: one ZIM or ZIP per selected package id.
pub struct PackagesProvider<'a> {
    packages: Vec<String>,
    catalogs: &'a PackageCatalogSet,
}

impl<'a> PackagesProvider<'a> {
    pub fn new(packages: Vec<String>, catalogs: &'a PackageCatalogSet) -> Self {
        Self { packages, catalogs }
    }
}

impl ContentProvider for PackagesProvider<'_> {
    fn display_name(&self) -> &str {
        "Packages"
    }

    fn list_contents(&self) -> Result<Vec<ContentDescriptor>, CoreError> {
        let (descriptors, skipped) = resolve_packages(self.catalogs, &self.packages)?;
        for id in &skipped {
            warn!("skipping package '{id}': not found in any catalog");
        }
        Ok(descriptors)
    }
}

/// Resolve package ids against the catalog set, in selection order.
///
/// Ids unknown to every catalog are skipped by design, not failed; they are
/// returned separately so callers can surface a notice.
pub fn resolve_packages(
    catalogs: &PackageCatalogSet,
    packages: &[String],
) -> Result<(Vec<ContentDescriptor>, Vec<String>), CoreError> {
    let mut descriptors = Vec::new();
    let mut skipped = Vec::new();
    for id in packages {
        match catalogs.find(id)? {
            Some(descriptor) => descriptors.push(descriptor),
            None => skipped.push(id.clone()),
        }
    }
    debug!(
        "resolved {} of {} packages",
        descriptors.len(),
        packages.len()
    );
    Ok((descriptors, skipped))
}

/// Wikifundi: one large language pack per selected language.
pub struct WikifundiProvider<'a> {
    languages: Vec<String>,
    catalog: &'a ContentCatalog,
}

impl<'a> WikifundiProvider<'a> {
    pub fn new(languages: Vec<String>, catalog: &'a ContentCatalog) -> Self {
        Self { languages, catalog }
    }
}

impl ContentProvider for WikifundiProvider<'_> {
    fn display_name(&self) -> &str {
        "Wikifundi"
    }

    fn list_contents(&self) -> Result<Vec<ContentDescriptor>, CoreError> {
        self.languages
            .iter()
            .map(|lang| {
                self.catalog
                    .get(&format!("wikifundi_langpack_{lang}"))
                    .map_err(CoreError::from)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn catalog() -> ContentCatalog {
        ContentCatalog::from_json_str(
            r#"{
  "nomad_zip": {"url": "u1", "name": "nomad.zip", "archive_size": 100},
  "wikifundi_langpack_fr": {"url": "u2", "name": "wikifundi_fr.tar.gz", "archive_size": 200},
  "wikifundi_langpack_en": {"url": "u3", "name": "wikifundi_en.tar.gz", "archive_size": 300}
}"#,
        )
        .unwrap()
    }

    #[test]
    fn catalog_item_provider_lists_its_single_artifact() {
        let catalog = catalog();
        let provider = CatalogItemProvider::new("NomadEducation", "nomad_zip", &catalog);
        let contents = provider.list_contents().unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0].name, "nomad.zip");
    }

    #[test]
    fn catalog_item_provider_fails_hard_on_missing_key() {
        let catalog = catalog();
        let provider = CatalogItemProvider::new("MathMathews", "mathews_apk", &catalog);
        assert!(provider.list_contents().is_err());
    }

    #[test]
    fn wikifundi_lists_one_pack_per_language_in_order() {
        let catalog = catalog();
        let provider = WikifundiProvider::new(vec!["fr".to_owned(), "en".to_owned()], &catalog);
        let contents = provider.list_contents().unwrap();
        let names: Vec<&str> = contents.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["wikifundi_fr.tar.gz", "wikifundi_en.tar.gz"]);
    }

    #[test]
    fn wikifundi_unknown_language_aborts_listing() {
        let catalog = catalog();
        let provider = WikifundiProvider::new(vec!["xx".to_owned()], &catalog);
        assert!(provider.list_contents().is_err());
    }

    #[test]
    fn edupi_without_resources_lists_nothing() {
        let lookup = SizeLookup::default();
        let provider = EdupiProvider::new(None, &lookup);
        assert!(provider.list_contents().unwrap().is_empty());
    }

    #[test]
    fn edupi_action_copies_local_resource_into_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = tempfile::tempdir().unwrap();
        let resource = dir.path().join("bundle.zip");
        std::fs::write(&resource, b"payload").unwrap();

        let lookup = SizeLookup::default();
        let provider = EdupiProvider::new(Some(resource.display().to_string()), &lookup);
        provider.run_actions(cache.path(), dir.path()).unwrap();

        assert_eq!(
            std::fs::read(cache.path().join("bundle.zip")).unwrap(),
            b"payload"
        );
    }

    #[test]
    fn default_action_is_a_noop() {
        let catalog = catalog();
        let provider = CatalogItemProvider::new("NomadEducation", "nomad_zip", &catalog);
        let dir = tempfile::tempdir().unwrap();
        provider.run_actions(dir.path(), dir.path()).unwrap();
    }

    #[test]
    fn resolve_packages_reports_skips_without_failing() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "wikipedia_fr_all".to_owned(),
            offgrid_catalog::PackageEntry {
                url: "u".to_owned(),
                kind: "zim".to_owned(),
                size: 50_000_000,
                sha256sum: "s".to_owned(),
                langid: None,
            },
        );
        let set = PackageCatalogSet::new(vec![offgrid_catalog::PackageCatalog::new(entries)]);

        let selected = vec!["wikipedia_fr_all".to_owned(), "ghost_package".to_owned()];
        let (descriptors, skipped) = resolve_packages(&set, &selected).unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].archive_size, 50_000_000);
        assert_eq!(skipped, vec!["ghost_package"]);
    }
}
