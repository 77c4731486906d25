//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use hexplanet_sphere::{FanApex, GenerationParams, RenderMode};
use serde::{Deserialize, Serialize};

use crate::error::ConfigFileError;

/// Name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Per-user config directory (`<platform config dir>/hexplanet`), if the
/// platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hexplanet"))
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Sphere generation settings.
    pub planet: PlanetConfig,
    /// Render buffer and metadata export settings.
    pub export: ExportConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Sphere generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Sphere radius in world units.
    pub radius: f64,
    /// Subdivision frequency. The sphere gets `10 * frequency^2 + 2` tiles.
    pub frequency: u32,
    /// Distance below which two points count as equal. `None` scales with
    /// the radius.
    pub epsilon: Option<f64>,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            radius: params.radius,
            frequency: params.frequency,
            epsilon: params.epsilon,
        }
    }
}

impl PlanetConfig {
    /// Generation parameters for these settings. Not validated here;
    /// [`hexplanet_sphere::generate`] rejects invalid values.
    pub fn to_params(&self) -> GenerationParams {
        GenerationParams {
            radius: self.radius,
            frequency: self.frequency,
            epsilon: self.epsilon,
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Tile fans or the raw geodesic triangles.
    pub mode: RenderMode,
    /// Placement of the fan apex in tile mode.
    pub fan_apex: FanApex,
    /// Write tile metadata as JSON to this path.
    pub tiles_out: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Run the extra whole-sphere checks after generation.
    pub validate: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            validate: cfg!(debug_assertions),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigFileError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigFileError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigFileError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigFileError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigFileError::WriteError)?;
        Ok(())
    }

    /// Re-read the file. Returns `Some(new_config)` if it differs from
    /// `self`, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigFileError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigFileError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigFileError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigFileError::ParseError)
    }
}
