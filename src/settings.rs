//! Persistent settings
//!
//! Settings are saved to `~/.config/meshport/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use meshport_ffi::ProcessingFlags;

/// All meshport settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub import: ImportSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("meshport"))
    }

    /// Load settings from disk. A missing file yields the defaults.
    pub fn load() -> anyhow::Result<Self> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };
        Self::load_from(&dir.join("settings.toml"))
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let path = dir.join("settings.toml");
        fs::write(&path, toml::to_string_pretty(self)?)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// How models are imported
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Post-processing step names, e.g. `triangulate`
    pub flags: Vec<String>,
    /// Directory relative model paths are resolved against
    pub asset_root: Option<PathBuf>,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            flags: ["triangulate", "gen-normals", "pretransform-vertices", "flip-winding-order"]
                .map(String::from)
                .to_vec(),
            asset_root: None,
        }
    }
}

impl ImportSettings {
    /// Combine the configured step names into one flag set.
    pub fn processing_flags(&self) -> anyhow::Result<ProcessingFlags> {
        self.flags
            .iter()
            .map(|name| {
                ProcessingFlags::from_kebab_name(name)
                    .with_context(|| format!("unknown processing flag '{}'", name))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map(ProcessingFlags::union_all)
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_request_render_ready_geometry() {
        let flags = Settings::default().import.processing_flags().unwrap();
        assert_eq!(
            flags,
            ProcessingFlags::TRIANGULATE
                | ProcessingFlags::GEN_NORMALS
                | ProcessingFlags::PRETRANSFORM_VERTICES
                | ProcessingFlags::FLIP_WINDING_ORDER
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings: Settings = toml::from_str("[import]\nflags = [\"debone\"]\n").unwrap();
        assert_eq!(
            settings.import.processing_flags().unwrap(),
            ProcessingFlags::DEBONE
        );
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn unknown_flag_is_an_error() {
        let import = ImportSettings {
            flags: vec!["triangulate".into(), "sharpen".into()],
            asset_root: None,
        };
        let err = import.processing_flags().unwrap_err();
        assert!(err.to_string().contains("sharpen"));
    }

    #[test]
    fn constant_style_flag_names_are_rejected() {
        let import = ImportSettings {
            flags: vec!["triangulate".into(), "TRIANGULATE".into()],
            asset_root: None,
        };
        let err = import.processing_flags().unwrap_err();
        assert!(err.to_string().contains("'TRIANGULATE'"));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/settings.toml")).unwrap();
        assert!(settings.import.asset_root.is_none());
    }

    #[test]
    fn round_trips_through_toml() {
        let mut settings = Settings::default();
        settings.import.asset_root = Some(PathBuf::from("/models"));
        let text = toml::to_string_pretty(&settings).unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back.import.flags, settings.import.flags);
        assert_eq!(back.import.asset_root, settings.import.asset_root);
    }
}
