//! Build-space budgeting.
//!
//! A multi-gigabyte build that runs out of disk midway is expensive to
//! recover from, so every stage carries a deterministic safety margin. The
//! margins are two-tier on purpose: the expansion stage uses a percentage
//! with a floor (absorbs per-item rounding error even on tiny collections),
//! the final stage uses a percentage with a ceiling (covers filesystem and
//! temp overhead without ballooning on very large collections).

use crate::aggregate::{download_size, download_size_using_cache, flatten};
use crate::hardware::HardwareMargin;
use crate::provider::Collection;
use crate::CoreError;
use offgrid_catalog::ContentCatalog;
use offgrid_schema::{ONE_GIB, ONE_MIB};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Global margin on the summed expanded sizes.
pub const EXPANSION_MARGIN_RATIO: f64 = 0.02;

/// The expansion margin never goes below this.
pub const EXPANSION_MARGIN_FLOOR: u64 = 512 * ONE_MIB;

/// Free space guaranteed on the final image.
pub const IMAGE_HEADROOM: u64 = 256 * ONE_MIB;

/// Margin on the total temporary build space.
pub const BUILD_MARGIN_RATIO: f64 = 0.20;

/// The build-space margin never exceeds this.
pub const BUILD_MARGIN_CEILING: u64 = 2 * ONE_GIB;

/// Sum of expanded sizes over the flattened collection, doubling items that
/// are kept as archive AND extracted on the destination. With `add_margin`,
/// adds `max(512 MiB, total × 2%)`.
pub fn expanded_size(collection: &Collection<'_>, add_margin: bool) -> Result<u64, CoreError> {
    let total: u64 = flatten(collection)?
        .iter()
        .map(|d| {
            if d.copied_on_destination {
                d.expanded_size * 2
            } else {
                d.expanded_size
            }
        })
        .sum();

    let margin = if add_margin {
        EXPANSION_MARGIN_FLOOR.max((total as f64 * EXPANSION_MARGIN_RATIO) as u64)
    } else {
        0
    };
    Ok(total + margin)
}

/// Size the built image must have: master root partition, expanded contents
/// with margin, fixed headroom, plus the hardware margin computed on that
/// subtotal (not on itself).
pub fn required_image_size(
    collection: &Collection<'_>,
    catalog: &ContentCatalog,
    hardware: &dyn HardwareMargin,
) -> Result<u64, CoreError> {
    let master = catalog.master_image()?;
    let required =
        master.root_partition_size + expanded_size(collection, true)? + IMAGE_HEADROOM;
    Ok(required + hardware.margin(required))
}

/// Total space needed to host downloads and the image while building.
///
/// Counts the master image at its archive size only: it is resized in place
/// and never shrunk, so its expanded size never coexists with the archive.
/// `image_size` may be passed in to reuse a previously computed value.
pub fn required_building_space(
    collection: &Collection<'_>,
    catalog: &ContentCatalog,
    cache_folder: &Path,
    image_size: Option<u64>,
    hardware: &dyn HardwareMargin,
) -> Result<u64, CoreError> {
    let master = catalog.master_image()?;
    let image_size = match image_size {
        Some(size) => size,
        None => required_image_size(collection, catalog, hardware)?,
    };
    let downloads = download_size_using_cache(collection, cache_folder)?;

    let total = master.archive_size + image_size + downloads;
    let margin = BUILD_MARGIN_CEILING.min((total as f64 * BUILD_MARGIN_RATIO) as u64);
    debug!("building space: {total} + {margin} margin");
    Ok(total + margin)
}

/// All derived budget figures for one configuration, computed in one pass.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SpaceBudget {
    /// Bytes to download with an empty cache.
    pub download_size: u64,
    /// Bytes to download given the actual cache contents.
    pub download_size_using_cache: u64,
    /// Summed expanded sizes, no margin.
    pub expanded_size: u64,
    /// Summed expanded sizes plus the expansion margin.
    pub expanded_size_with_margin: u64,
    /// Required size of the final image.
    pub required_image_size: u64,
    /// Required temporary space to run the build.
    pub required_building_space: u64,
}

/// Compute the full budget for a collection against a cache folder.
pub fn compute_budget(
    collection: &Collection<'_>,
    catalog: &ContentCatalog,
    cache_folder: &Path,
    hardware: &dyn HardwareMargin,
) -> Result<SpaceBudget, CoreError> {
    let image = required_image_size(collection, catalog, hardware)?;
    Ok(SpaceBudget {
        download_size: download_size(collection)?,
        download_size_using_cache: download_size_using_cache(collection, cache_folder)?,
        expanded_size: expanded_size(collection, false)?,
        expanded_size_with_margin: expanded_size(collection, true)?,
        required_image_size: image,
        required_building_space: required_building_space(
            collection,
            catalog,
            cache_folder,
            Some(image),
            hardware,
        )?,
    })
}
