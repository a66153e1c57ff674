//! Cache-aware aggregation over a provider collection.

use crate::provider::Collection;
use crate::CoreError;
use offgrid_catalog::is_cached;
use offgrid_schema::ContentDescriptor;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Flatten a collection into one ordered descriptor stream: provider order,
/// then each provider's internal order.
///
/// The same artifact may legitimately be listed by two providers; that is
/// kept as-is (the duplicate sums are conservative). Two *different*
/// artifacts resolving to one destination filename would silently share a
/// cache slot, so that is rejected loudly.
pub fn flatten(collection: &Collection<'_>) -> Result<Vec<ContentDescriptor>, CoreError> {
    let mut all = Vec::new();
    for provider in collection {
        let contents = provider.list_contents()?;
        debug!(
            "{}: {} content item(s)",
            provider.display_name(),
            contents.len()
        );
        all.extend(contents);
    }

    let mut by_name: HashMap<&str, &ContentDescriptor> = HashMap::new();
    for descriptor in &all {
        if let Some(previous) = by_name.insert(&descriptor.name, descriptor) {
            if previous.url != descriptor.url || previous.archive_size != descriptor.archive_size {
                return Err(CoreError::NameConflict {
                    name: descriptor.name.clone(),
                    first: previous.url.clone(),
                    second: descriptor.url.clone(),
                });
            }
        }
    }

    Ok(all)
}

/// Data usage to download the entire collection.
pub fn download_size(collection: &Collection<'_>) -> Result<u64, CoreError> {
    Ok(flatten(collection)?.iter().map(|d| d.archive_size).sum())
}

/// Data usage to download only the elements missing from the cache.
/// Cache hits are name+size matches; checksums are not verified here.
pub fn download_size_using_cache(
    collection: &Collection<'_>,
    cache_folder: &Path,
) -> Result<u64, CoreError> {
    let mut total = 0;
    for descriptor in flatten(collection)? {
        if is_cached(&descriptor, cache_folder, false)? {
            debug!("cache hit for '{}'", descriptor.name);
        } else {
            total += descriptor.archive_size;
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ContentProvider;

    /// Fixed-descriptor provider for aggregation tests.
    struct FixedProvider {
        name: &'static str,
        contents: Vec<ContentDescriptor>,
    }

    impl ContentProvider for FixedProvider {
        fn display_name(&self) -> &str {
            self.name
        }

        fn list_contents(&self) -> Result<Vec<ContentDescriptor>, CoreError> {
            Ok(self.contents.clone())
        }
    }

    fn descriptor(name: &str, size: u64) -> ContentDescriptor {
        ContentDescriptor::new(
            format!("https://mirror.example.org/{name}"),
            name,
            None,
            size,
            size,
            false,
        )
        .unwrap()
    }

    fn collection_of(providers: Vec<(&'static str, Vec<ContentDescriptor>)>) -> Collection<'static> {
        providers
            .into_iter()
            .map(|(name, contents)| {
                Box::new(FixedProvider { name, contents }) as Box<dyn ContentProvider>
            })
            .collect()
    }

    #[test]
    fn flatten_preserves_provider_and_internal_order() {
        let collection = collection_of(vec![
            ("A", vec![descriptor("a1.zim", 1), descriptor("a2.zim", 2)]),
            ("B", vec![descriptor("b1.zim", 3)]),
        ]);
        let names: Vec<String> = flatten(&collection)
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["a1.zim", "a2.zim", "b1.zim"]);
    }

    #[test]
    fn identical_duplicates_across_providers_are_allowed() {
        let collection = collection_of(vec![
            ("A", vec![descriptor("shared.zim", 10)]),
            ("B", vec![descriptor("shared.zim", 10)]),
        ]);
        assert_eq!(flatten(&collection).unwrap().len(), 2);
        assert_eq!(download_size(&collection).unwrap(), 20);
    }

    #[test]
    fn conflicting_reuse_of_a_name_is_rejected() {
        let collection = collection_of(vec![
            ("A", vec![descriptor("shared.zim", 10)]),
            ("B", vec![descriptor("shared.zim", 11)]),
        ]);
        assert!(matches!(
            flatten(&collection),
            Err(CoreError::NameConflict { .. })
        ));
    }

    #[test]
    fn download_size_sums_archive_sizes() {
        let collection = collection_of(vec![
            ("A", vec![descriptor("a.zim", 100), descriptor("b.zip", 50)]),
            ("B", vec![descriptor("c.apk", 25)]),
        ]);
        assert_eq!(download_size(&collection).unwrap(), 175);
    }

    #[test]
    fn cached_items_are_excluded_from_download_size() {
        let cache = tempfile::tempdir().unwrap();
        std::fs::write(cache.path().join("a.zim"), vec![0u8; 100]).unwrap();

        let collection = collection_of(vec![(
            "A",
            vec![descriptor("a.zim", 100), descriptor("b.zip", 50)],
        )]);
        assert_eq!(
            download_size_using_cache(&collection, cache.path()).unwrap(),
            50
        );
    }

    #[test]
    fn size_mismatched_cache_file_still_counts_as_download() {
        let cache = tempfile::tempdir().unwrap();
        std::fs::write(cache.path().join("a.zim"), vec![0u8; 99]).unwrap();

        let collection = collection_of(vec![("A", vec![descriptor("a.zim", 100)])]);
        assert_eq!(
            download_size_using_cache(&collection, cache.path()).unwrap(),
            100
        );
    }

    #[test]
    fn full_download_size_bounds_cache_aware_size() {
        let cache = tempfile::tempdir().unwrap();
        std::fs::write(cache.path().join("a.zim"), vec![0u8; 100]).unwrap();

        let collection = collection_of(vec![(
            "A",
            vec![descriptor("a.zim", 100), descriptor("b.zip", 50)],
        )]);
        let all = download_size(&collection).unwrap();
        let missing = download_size_using_cache(&collection, cache.path()).unwrap();
        assert!(all >= missing);

        let empty_cache = tempfile::tempdir().unwrap();
        assert_eq!(
            download_size_using_cache(&collection, empty_cache.path()).unwrap(),
            all
        );
    }
}
