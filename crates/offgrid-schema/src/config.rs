use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseToml(#[from] toml::de::Error),
    #[error("unsupported config_version: {0}, expected 1")]
    UnsupportedVersion(u32),
    #[error("contents.edupi_resources requires contents.edupi = true")]
    OrphanEdupiResources,
    #[error("empty entry in contents.{0}")]
    EmptySelection(&'static str),
}

/// A hotspot image configuration: which optional content modules to include.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigV1 {
    pub config_version: u32,
    #[serde(default)]
    pub contents: ContentsSection,
}

/// Module selection. Boolean flags enable single-artifact modules; list
/// fields enable multi-artifact modules when non-empty.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ContentsSection {
    /// EduPi note-taking app.
    #[serde(default)]
    pub edupi: bool,
    /// Optional user-supplied EduPi resource bundle, local path or URL.
    #[serde(default)]
    pub edupi_resources: Option<String>,
    /// Nomad Education APK.
    #[serde(default)]
    pub nomad: bool,
    /// Math Mathews APK.
    #[serde(default)]
    pub mathews: bool,
    /// Africatik Écoles Numériques ZIP.
    #[serde(default)]
    pub africatik: bool,
    /// Africatik Maisons Digitales ZIP.
    #[serde(default)]
    pub africatik_md: bool,
    /// Catalog package identifiers (ZIM files and static sites).
    #[serde(default)]
    pub packages: Vec<String>,
    /// Wikifundi language codes, one language pack each.
    #[serde(default)]
    pub wikifundi: Vec<String>,
}

impl ConfigV1 {
    /// Structural validation beyond what serde enforces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.config_version != 1 {
            return Err(ConfigError::UnsupportedVersion(self.config_version));
        }
        if self.contents.edupi_resources.is_some() && !self.contents.edupi {
            return Err(ConfigError::OrphanEdupiResources);
        }
        if self.contents.packages.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::EmptySelection("packages"));
        }
        if self.contents.wikifundi.iter().any(|l| l.trim().is_empty()) {
            return Err(ConfigError::EmptySelection("wikifundi"));
        }
        Ok(())
    }
}

pub fn parse_config_str(input: &str) -> Result<ConfigV1, ConfigError> {
    let config: ConfigV1 = toml::from_str(input)?;
    config.validate()?;
    Ok(config)
}

pub fn parse_config_file(path: impl AsRef<Path>) -> Result<ConfigV1, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let input = r#"
config_version = 1

[contents]
edupi = true
edupi_resources = "https://example.org/resources.zip"
nomad = true
mathews = false
africatik = true
africatik_md = false
packages = ["wikipedia_fr_all", "vikidia_fr"]
wikifundi = ["fr", "en"]
"#;
        let config = parse_config_str(input).expect("should parse");
        assert!(config.contents.edupi);
        assert!(config.contents.nomad);
        assert!(!config.contents.mathews);
        assert_eq!(config.contents.packages.len(), 2);
        assert_eq!(config.contents.wikifundi, vec!["fr", "en"]);
    }

    #[test]
    fn parses_minimal_config() {
        let config = parse_config_str("config_version = 1\n").expect("should parse");
        assert_eq!(config.contents, ContentsSection::default());
    }

    #[test]
    fn rejects_unknown_fields() {
        let input = r#"
config_version = 1

[contents]
wikipedia = true
"#;
        assert!(parse_config_str(input).is_err());
    }

    #[test]
    fn rejects_wrong_version() {
        let result = parse_config_str("config_version = 2\n");
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(2))));
    }

    #[test]
    fn rejects_resources_without_edupi() {
        let input = r#"
config_version = 1

[contents]
edupi_resources = "/data/resources"
"#;
        assert!(matches!(
            parse_config_str(input),
            Err(ConfigError::OrphanEdupiResources)
        ));
    }

    #[test]
    fn rejects_blank_package_id() {
        let input = r#"
config_version = 1

[contents]
packages = ["wikipedia_fr_all", ""]
"#;
        assert!(matches!(
            parse_config_str(input),
            Err(ConfigError::EmptySelection("packages"))
        ));
    }
}
