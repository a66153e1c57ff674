use super::{json_pretty, load_package_catalogs, EXIT_SUCCESS};
use std::path::PathBuf;

pub fn run(catalog_paths: &[PathBuf], json: bool) -> Result<u8, String> {
    let catalogs = load_package_catalogs(catalog_paths)?;
    let ids = catalogs.package_ids();

    if json {
        println!("{}", json_pretty(&ids)?);
    } else if ids.is_empty() {
        println!("no packages found");
    } else {
        for id in &ids {
            println!("{id}");
        }
    }
    Ok(EXIT_SUCCESS)
}
