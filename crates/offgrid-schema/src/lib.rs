//! Configuration manifest and content descriptor types for offgrid.
//!
//! This crate defines the schema layer: TOML configuration parsing
//! (`ConfigV1`), the `ContentDescriptor` value type describing one
//! downloadable artifact, source classification helpers, and byte-size
//! units and formatting shared by the rest of the workspace.

pub mod config;
pub mod descriptor;
pub mod units;

pub use config::{parse_config_file, parse_config_str, ConfigError, ConfigV1, ContentsSection};
pub use descriptor::{
    classify_archive, is_remote, ContentDescriptor, DescriptorError, ARCHIVE_EXPANSION,
    PACKAGE_EXPANSION,
};
pub use units::{human_size, ONE_GIB, ONE_MIB};
