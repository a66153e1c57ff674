pub mod completions;
pub mod estimate;
pub mod man_pages;
pub mod packages;
pub mod validate;

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;
pub const EXIT_CATALOG_ERROR: u8 = 3;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("valid template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(msg.to_owned());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn spin_ok(pb: &ProgressBar, msg: &str) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("valid template"));
    pb.finish_with_message(format!("✓ {msg}"));
}

pub fn spin_fail(pb: &ProgressBar, msg: &str) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("valid template"));
    pb.finish_with_message(format!("✗ {msg}"));
}

pub fn load_config(path: &Path) -> Result<offgrid_schema::ConfigV1, String> {
    offgrid_schema::parse_config_file(path).map_err(|e| format!("config error: {e}"))
}

pub fn load_contents(path: &Path) -> Result<offgrid_catalog::ContentCatalog, String> {
    offgrid_catalog::ContentCatalog::load(path)
        .map_err(|e| format!("catalog error: {}: {e}", path.display()))
}

pub fn load_package_catalogs(paths: &[std::path::PathBuf]) -> Result<offgrid_catalog::PackageCatalogSet, String> {
    let mut catalogs = Vec::new();
    for path in paths {
        let catalog = offgrid_catalog::PackageCatalog::load(path)
            .map_err(|e| format!("catalog error: {}: {e}", path.display()))?;
        catalogs.push(catalog);
    }
    Ok(offgrid_catalog::PackageCatalogSet::new(catalogs))
}
