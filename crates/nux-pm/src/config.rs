//! Project configuration read from `nux.toml`.
//!
//! ```toml
//! exhaustive = false
//! packages-config = "packages.config"
//!
//! [[sources]]
//! path = "packages"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

pub const CONFIG_FILE_NAME: &str = "nux.toml";

/// The nux configuration file structure (nux.toml)
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct NuxConfig {
    /// Package folders to scan, in priority order
    pub sources: Vec<SourceConfig>,

    /// Keep scanning after the first match
    pub exhaustive: bool,

    /// File name used when persisting the preferred packages
    pub packages_config: String,

    /// Directory containing the config file, set by [`NuxConfig::load`]
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// A package folder to scan
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SourceConfig {
    pub path: PathBuf,
}

impl Default for NuxConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            exhaustive: false,
            packages_config: "packages.config".to_string(),
            base_dir: None,
        }
    }
}

impl NuxConfig {
    /// Parse a config document
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from nux.toml, searching upward from the given directory
    pub fn load(start_dir: &Path) -> Result<Option<Self>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);

            if config_path.is_file() {
                let content = std::fs::read_to_string(&config_path)?;
                let mut config = Self::parse(&content)?;
                log::debug!("Loaded configuration from {}", config_path.display());
                config.base_dir = Some(current);
                return Ok(Some(config));
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Source folders with relative paths resolved against the config directory
    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.sources
            .iter()
            .map(|source| match &self.base_dir {
                Some(base) if source.path.is_relative() => base.join(&source.path),
                _ => source.path.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_config() {
        let config = NuxConfig::parse("").unwrap();
        assert_eq!(config, NuxConfig::default());
        assert_eq!(config.packages_config, "packages.config");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
exhaustive = true
packages-config = "deps.config"

[[sources]]
path = "packages"

[[sources]]
path = "/srv/feed"
"#;
        let config = NuxConfig::parse(toml).unwrap();
        assert!(config.exhaustive);
        assert_eq!(config.packages_config, "deps.config");
        assert_eq!(
            config.sources,
            vec![
                SourceConfig { path: PathBuf::from("packages") },
                SourceConfig { path: PathBuf::from("/srv/feed") },
            ]
        );
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = NuxConfig::parse("exhaustive = \"yes\"").unwrap_err();
        assert!(matches!(err, ResolveError::ConfigParse(_)));
    }

    #[test]
    fn test_load_searches_upward() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[[sources]]\npath = \"packages\"\n",
        )
        .unwrap();
        let nested = temp_dir.path().join("src").join("App");
        std::fs::create_dir_all(&nested).unwrap();

        let config = NuxConfig::load(&nested).unwrap().unwrap();

        assert_eq!(config.base_dir.as_deref(), Some(temp_dir.path()));
        assert_eq!(config.source_paths(), vec![temp_dir.path().join("packages")]);
    }

    #[test]
    fn test_absolute_source_paths_are_kept() {
        let config = NuxConfig {
            sources: vec![SourceConfig { path: PathBuf::from("/srv/feed") }],
            base_dir: Some(PathBuf::from("/project")),
            ..Default::default()
        };
        assert_eq!(config.source_paths(), vec![PathBuf::from("/srv/feed")]);
    }
}
