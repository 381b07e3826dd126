//! `quill.toml` loading

use anyhow::{Context, Result};
use quill_intellisense::IntellisenseConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file name, looked up under the root.
pub const CONFIG_FILE: &str = "quill.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory of reference table files, relative to the root.
    pub tables: Option<PathBuf>,
    /// Include the built-in tables.
    pub builtin: bool,
    pub intellisense: IntellisenseConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tables: None,
            builtin: true,
            intellisense: IntellisenseConfig::default(),
        }
    }
}

impl Settings {
    /// Load `path`, or defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        settings
            .intellisense
            .validate()
            .with_context(|| format!("invalid [intellisense] section in {}", path.display()))?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(settings)
    }

    /// The configured table directory, resolved against `root`.
    pub fn tables_dir(&self, root: &Path) -> Option<PathBuf> {
        self.tables.as_ref().map(|dir| root.join(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load(&temp_dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.builtin);
        assert_eq!(settings.tables_dir(temp_dir.path()), None);
    }

    #[test]
    fn test_load_resolves_tables_and_validates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);

        std::fs::write(&path, "tables = \"refs\"\n[intellisense.tooltip]\nmax_width = 30\n").unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.tables_dir(temp_dir.path()), Some(temp_dir.path().join("refs")));
        assert_eq!(settings.intellisense.tooltip.max_width, 30);

        std::fs::write(&path, "[intellisense]\ndelimiter = \" \"\n").unwrap();
        assert!(Settings::load(&path).is_err());
    }
}
