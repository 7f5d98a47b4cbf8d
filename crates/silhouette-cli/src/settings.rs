use std::path::{Path, PathBuf};

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use silhouette_core::{ConstraintSet, ForbiddenCombo};
use silhouette_generate::GenerateOptions;
use silhouette_render::ExportFormat;

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "silhouette.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExportChoice {
    /// No lookbook.
    #[default]
    None,
    /// Paginated A4 HTML with inline SVG.
    Html,
    /// Not built in; always reported as unavailable.
    Pdf,
}

impl ExportChoice {
    pub fn format(self) -> Option<ExportFormat> {
        match self {
            ExportChoice::None => None,
            ExportChoice::Html => Some(ExportFormat::Html),
            ExportChoice::Pdf => Some(ExportFormat::Pdf),
        }
    }
}

/// Output toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Lookbook format written after generation.
    pub export: ExportChoice,
    /// Draw the stats chart.
    pub chart: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            export: ExportChoice::None,
            chart: true,
        }
    }
}

/// Contents of `silhouette.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct SilhouetteSettings {
    pub generation: GenerateOptions,
    /// Replaces the built-in forbidden combinations when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forbidden: Option<Vec<ForbiddenCombo>>,
    pub output: OutputSettings,
}

impl SilhouetteSettings {
    pub fn constraints(&self) -> ConstraintSet {
        match &self.forbidden {
            Some(combos) => ConstraintSet::new(combos.clone()),
            None => ConstraintSet::default(),
        }
    }
}

/// Load settings from `explicit`, else `silhouette.toml` if present, else defaults.
///
/// An explicit path that does not exist is an error.
pub fn load_settings(explicit: Option<&Path>) -> Result<SilhouetteSettings, SettingsError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_SETTINGS_FILE);
            if !fallback.exists() {
                return Ok(SilhouetteSettings::default());
            }
            fallback
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|source| SettingsError::Read {
        path: path.clone(),
        source,
    })?;
    parse_settings(&content).map_err(|source| SettingsError::Parse { path, source })
}

pub fn parse_settings(content: &str) -> Result<SilhouetteSettings, toml::de::Error> {
    toml::from_str(content)
}
