//! Provider registry: configuration to ordered provider collection.

use crate::provider::{
    CatalogItemProvider, Collection, EdupiProvider, PackagesProvider, WikifundiProvider,
};
use offgrid_catalog::{ContentCatalog, PackageCatalogSet};
use offgrid_remote::SizeLookup;
use offgrid_schema::ContentsSection;
use tracing::debug;

/// Build the ordered collection of enabled providers for a configuration.
///
/// A provider is included iff its enabling condition holds: boolean flag for
/// single-artifact modules, non-empty selection for packages and language
/// packs. The declared module order below is the presentation order; totals
/// are order-independent.
pub fn build_collection<'a>(
    contents: &ContentsSection,
    catalog: &'a ContentCatalog,
    packages: &'a PackageCatalogSet,
    lookup: &'a SizeLookup,
) -> Collection<'a> {
    let mut collection: Collection<'a> = Vec::new();

    if contents.edupi {
        collection.push(Box::new(EdupiProvider::new(
            contents.edupi_resources.clone(),
            lookup,
        )));
    }
    if contents.nomad {
        collection.push(Box::new(CatalogItemProvider::new(
            "NomadEducation",
            "nomad_zip",
            catalog,
        )));
    }
    if contents.mathews {
        collection.push(Box::new(CatalogItemProvider::new(
            "MathMathews",
            "mathews_apk",
            catalog,
        )));
    }
    if contents.africatik {
        collection.push(Box::new(CatalogItemProvider::new(
            "Africatik Écoles Numériques",
            "africatik_all",
            catalog,
        )));
    }
    if contents.africatik_md {
        collection.push(Box::new(CatalogItemProvider::new(
            "Africatik Maisons Digitales",
            "africatik_md",
            catalog,
        )));
    }
    if !contents.packages.is_empty() {
        collection.push(Box::new(PackagesProvider::new(
            contents.packages.clone(),
            packages,
        )));
    }
    if !contents.wikifundi.is_empty() {
        collection.push(Box::new(WikifundiProvider::new(
            contents.wikifundi.clone(),
            catalog,
        )));
    }

    debug!("collection has {} enabled providers", collection.len());
    collection
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ContentCatalog {
        ContentCatalog::from_json_str(
            r#"{
  "nomad_zip": {"url": "u", "name": "nomad.zip", "archive_size": 1},
  "mathews_apk": {"url": "u", "name": "mathews.apk", "archive_size": 1},
  "africatik_all": {"url": "u", "name": "africatik.zip", "archive_size": 1},
  "africatik_md": {"url": "u", "name": "africatik_md.zip", "archive_size": 1},
  "wikifundi_langpack_fr": {"url": "u", "name": "wikifundi_fr.tar.gz", "archive_size": 1}
}"#,
        )
        .unwrap()
    }

    #[test]
    fn empty_configuration_builds_empty_collection() {
        let catalog = catalog();
        let packages = PackageCatalogSet::default();
        let lookup = SizeLookup::default();
        let collection =
            build_collection(&ContentsSection::default(), &catalog, &packages, &lookup);
        assert!(collection.is_empty());
    }

    #[test]
    fn providers_appear_in_declared_order() {
        let catalog = catalog();
        let packages = PackageCatalogSet::default();
        let lookup = SizeLookup::default();
        let contents = ContentsSection {
            edupi: true,
            nomad: true,
            mathews: true,
            africatik: true,
            africatik_md: true,
            packages: vec!["some_pkg".to_owned()],
            wikifundi: vec!["fr".to_owned()],
            ..Default::default()
        };

        let collection = build_collection(&contents, &catalog, &packages, &lookup);
        let names: Vec<&str> = collection.iter().map(|p| p.display_name()).collect();
        assert_eq!(
            names,
            vec![
                "EduPi",
                "NomadEducation",
                "MathMathews",
                "Africatik Écoles Numériques",
                "Africatik Maisons Digitales",
                "Packages",
                "Wikifundi",
            ]
        );
    }

    #[test]
    fn empty_selections_do_not_enable_multi_artifact_modules() {
        let catalog = catalog();
        let packages = PackageCatalogSet::default();
        let lookup = SizeLookup::default();
        let contents = ContentsSection {
            nomad: true,
            packages: Vec::new(),
            wikifundi: Vec::new(),
            ..Default::default()
        };

        let collection = build_collection(&contents, &catalog, &packages, &lookup);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection[0].display_name(), "NomadEducation");
    }
}
