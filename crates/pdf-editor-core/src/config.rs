use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::pages::Rotation;

/// PDF header versions we are willing to write
pub const SUPPORTED_PDF_VERSIONS: &[&str] = &["1.4", "1.5", "1.6", "1.7", "2.0"];

/// Options for encoding a page collection back into a PDF
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// PDF header version of written files
    #[serde(default = "default_pdf_version")]
    pub pdf_version: String,

    /// Compress content streams
    #[serde(default = "default_true")]
    pub compress: bool,

    /// Drop objects that no remaining page references (e.g. deleted pages' content)
    #[serde(default = "default_true")]
    pub prune_unused: bool,

    /// File name used for merge output when none is given
    #[serde(default = "default_merged_filename")]
    pub merged_filename: String,
}

fn default_pdf_version() -> String {
    "1.5".to_string()
}

const fn default_true() -> bool {
    true
}

fn default_merged_filename() -> String {
    "merged_pdfs.pdf".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pdf_version: default_pdf_version(),
            compress: true,
            prune_unused: true,
            merged_filename: default_merged_filename(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Output encoding options
    #[serde(default)]
    pub output: OutputConfig,

    /// Rotation applied when none is requested explicitly (degrees)
    #[serde(default = "default_rotation")]
    pub default_rotation: i64,
}

const fn default_rotation() -> i64 {
    90
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            default_rotation: default_rotation(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::ConfigLoad(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::ConfigLoad(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations (~/.config/pdf-editor/config.toml, ./config.toml)
    pub fn load() -> Self {
        // Try user config
        if let Some(config_dir) = crate::util::config_dir() {
            let user_config = config_dir.join("pdf-editor").join("config.toml");
            if user_config.exists() {
                match Self::from_file(&user_config) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {}", user_config.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // Try local config
        let local_config = std::path::PathBuf::from("config.toml");
        if local_config.exists() {
            match Self::from_file(&local_config) {
                Ok(config) => {
                    tracing::debug!("Loaded config from ./config.toml");
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Failed to load ./config.toml: {}", e);
                }
            }
        }

        // Return defaults
        tracing::debug!("No config file found, using defaults");
        Self::default()
    }

    /// Check values that serde cannot check on its own
    pub fn validate(&self) -> Result<(), Error> {
        if !SUPPORTED_PDF_VERSIONS.contains(&self.output.pdf_version.as_str()) {
            return Err(Error::ConfigInvalid {
                field: "output.pdf_version".to_string(),
                reason: format!(
                    "'{}' is not one of {}",
                    self.output.pdf_version,
                    SUPPORTED_PDF_VERSIONS.join(", ")
                ),
            });
        }

        let rotation = self.default_rotation().map_err(|_| Error::ConfigInvalid {
            field: "default_rotation".to_string(),
            reason: format!("{} is not a multiple of 90", self.default_rotation),
        })?;
        if rotation.is_none() {
            return Err(Error::ConfigInvalid {
                field: "default_rotation".to_string(),
                reason: format!("{} does not turn the page", self.default_rotation),
            });
        }

        if self.output.merged_filename.trim().is_empty() {
            return Err(Error::ConfigInvalid {
                field: "output.merged_filename".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// The configured default rotation
    pub fn default_rotation(&self) -> Result<Rotation, Error> {
        Rotation::from_degrees(self.default_rotation)
    }
}
