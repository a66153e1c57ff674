use super::{
    json_pretty, load_config, load_contents, load_package_catalogs, spin_fail, spin_ok, spinner,
    EXIT_SUCCESS,
};
use console::Style;
use offgrid_core::{
    build_collection, compute_budget, resolve_packages, HardwareMargin, MediaAlignMargin, NoMargin,
};
use offgrid_remote::SizeLookup;
use offgrid_schema::human_size;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn run(
    config_path: &Path,
    contents_path: &Path,
    catalog_paths: &[PathBuf],
    cache: &Path,
    no_media_margin: bool,
    json: bool,
) -> Result<u8, String> {
    let config = load_config(config_path)?;
    let catalog = load_contents(contents_path)?;
    let packages = load_package_catalogs(catalog_paths)?;
    let lookup = SizeLookup::default();

    let (_, skipped) =
        resolve_packages(&packages, &config.contents.packages).map_err(|e| e.to_string())?;

    let media_margin = MediaAlignMargin;
    let no_margin = NoMargin;
    let hardware: &dyn HardwareMargin = if no_media_margin {
        &no_margin
    } else {
        &media_margin
    };

    let collection = build_collection(&config.contents, &catalog, &packages, &lookup);
    debug!("estimating over {} provider(s)", collection.len());

    // Listing may issue blocking HEAD requests for user-supplied URLs.
    let pb = (!json).then(|| spinner("computing space budget"));
    let budget = match compute_budget(&collection, &catalog, cache, hardware) {
        Ok(budget) => {
            if let Some(pb) = &pb {
                spin_ok(pb, "space budget computed");
            }
            budget
        }
        Err(e) => {
            if let Some(pb) = &pb {
                spin_fail(pb, "space budget failed");
            }
            return Err(e.to_string());
        }
    };

    if json {
        let output = serde_json::json!({
            "providers": collection.iter().map(|p| p.display_name()).collect::<Vec<_>>(),
            "skipped_packages": skipped,
            "budget": budget,
        });
        println!("{}", json_pretty(&output)?);
        return Ok(EXIT_SUCCESS);
    }

    if !skipped.is_empty() {
        let dim = Style::new().yellow();
        println!(
            "{}",
            dim.apply_to(format!(
                "note: {} package id(s) not found in any catalog: {}",
                skipped.len(),
                skipped.join(", ")
            ))
        );
    }

    println!("providers: {}", collection.len());
    for provider in &collection {
        println!("  - {}", provider.display_name());
    }

    let bold = Style::new().bold();
    let row = |label: &str, bytes: u64| {
        println!("{:<28} {:>12}", label, human_size(bytes));
    };
    row("download size", budget.download_size);
    row("  missing from cache", budget.download_size_using_cache);
    row("expanded size", budget.expanded_size);
    row("  with margin", budget.expanded_size_with_margin);
    row("required image size", budget.required_image_size);
    println!(
        "{:<28} {:>12}",
        bold.apply_to("required building space"),
        bold.apply_to(human_size(budget.required_building_space))
    );

    Ok(EXIT_SUCCESS)
}
