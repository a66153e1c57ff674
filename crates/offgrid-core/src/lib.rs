//! Space budgeting pipeline for offgrid image builds.
//!
//! This crate ties catalogs, remote size lookup, and the configuration
//! schema together into the budgeting pipeline: a provider registry turning
//! a configuration into an ordered collection of content providers, a
//! cache-aware aggregator flattening providers into one descriptor stream
//! and summing download costs, and the budgeting engine computing expanded
//! sizes, the required image size, and the total build space with
//! deterministic safety margins.
//!
//! The whole pipeline is a pure computation over an immutable snapshot of
//! configuration and cache state; re-running any operation with unchanged
//! inputs yields identical results.

pub mod aggregate;
pub mod budget;
pub mod hardware;
pub mod provider;
pub mod registry;
pub mod source;

pub use aggregate::{download_size, download_size_using_cache, flatten};
pub use budget::{
    compute_budget, expanded_size, required_building_space, required_image_size, SpaceBudget,
    BUILD_MARGIN_CEILING, BUILD_MARGIN_RATIO, EXPANSION_MARGIN_FLOOR, EXPANSION_MARGIN_RATIO,
    IMAGE_HEADROOM,
};
pub use hardware::{HardwareMargin, MediaAlignMargin, NoMargin};
pub use provider::{resolve_packages, Collection, ContentProvider};
pub use registry::build_collection;
pub use source::{from_local_file, from_path_or_url, from_remote_url};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("catalog error: {0}")]
    Catalog(#[from] offgrid_catalog::CatalogError),
    #[error(transparent)]
    Descriptor(#[from] offgrid_schema::DescriptorError),
    #[error("remote lookup error: {0}")]
    Lookup(#[from] offgrid_remote::LookupError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache name conflict: '{name}' claimed by both {first} and {second}")]
    NameConflict {
        name: String,
        first: String,
        second: String,
    },
}
