use super::{json_pretty, load_config, EXIT_SUCCESS};
use std::path::Path;

pub fn run(config_path: &Path, json: bool) -> Result<u8, String> {
    let config = load_config(config_path)?;

    let enabled = [
        ("edupi", config.contents.edupi),
        ("nomad", config.contents.nomad),
        ("mathews", config.contents.mathews),
        ("africatik", config.contents.africatik),
        ("africatik_md", config.contents.africatik_md),
        ("packages", !config.contents.packages.is_empty()),
        ("wikifundi", !config.contents.wikifundi.is_empty()),
    ];
    let modules: Vec<&str> = enabled
        .iter()
        .filter(|(_, on)| *on)
        .map(|(name, _)| *name)
        .collect();

    if json {
        let output = serde_json::json!({
            "valid": true,
            "config": config_path.display().to_string(),
            "enabled_modules": modules,
        });
        println!("{}", json_pretty(&output)?);
    } else if modules.is_empty() {
        println!("{} is valid (no content modules enabled)", config_path.display());
    } else {
        println!(
            "{} is valid, enabled modules: {}",
            config_path.display(),
            modules.join(", ")
        );
    }
    Ok(EXIT_SUCCESS)
}
