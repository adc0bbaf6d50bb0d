use serde::Deserialize;
use spectra_dither::{DitherAlgorithm, DitherOptions};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable naming the YAML config file when `--config` is absent
pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";

/// Conversion settings loaded from a YAML file
///
/// ```yaml
/// algorithm: atkinson
/// saturation_boost: 1.3
/// boost_enabled: true
/// serpentine: true
/// workers: 4
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RenderConfig {
    /// Diffusion kernel name (`floyd-steinberg` or `atkinson`)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// HSL saturation multiplier applied before dithering
    #[serde(default = "default_saturation_boost")]
    pub saturation_boost: f32,

    /// Master switch for the saturation pre-pass
    #[serde(default = "default_true")]
    pub boost_enabled: bool,

    /// Alternate scan direction on every other row
    #[serde(default = "default_true")]
    pub serpentine: bool,

    /// Maximum number of images converted at once (default: available parallelism)
    #[serde(default)]
    pub workers: Option<usize>,
}

fn default_algorithm() -> String {
    DitherAlgorithm::default().as_str().to_string()
}

fn default_saturation_boost() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            saturation_boost: default_saturation_boost(),
            boost_enabled: true,
            serpentine: true,
            workers: None,
        }
    }
}

impl RenderConfig {
    /// Parse and validate a YAML document.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.dither_options()?;
        Ok(config)
    }

    /// Read and validate a YAML file.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from `path`, or from `CONFIG_FILE` when `path` is `None`.
    ///
    /// Never fails: an unreadable or invalid file is logged and the defaults
    /// are used instead.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from));

        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };

        match Self::read(&path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    algorithm = %config.algorithm,
                    saturation_boost = config.saturation_boost,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Engine options described by this config.
    pub fn dither_options(&self) -> Result<DitherOptions, ConfigError> {
        let algorithm: DitherAlgorithm = self.algorithm.parse()?;
        Ok(DitherOptions::new()
            .algorithm(algorithm)
            .saturation_boost(self.saturation_boost)
            .boost_enabled(self.boost_enabled)
            .serpentine(self.serpentine))
    }

    /// Effective batch concurrency, never below one.
    pub fn worker_count(&self) -> usize {
        self.workers
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            })
            .max(1)
    }
}
