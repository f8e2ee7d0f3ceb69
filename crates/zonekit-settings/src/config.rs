//! Configuration management.
//!
//! Settings are grouped in sections that each provide a `Default`, so a
//! partial file only overrides what it names. Files are read and written as
//! JSON or TOML depending on their extension.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use zonekit_core::constants::{
    AUTO_CLOSE_CLICKS, DEFAULT_BASE_URL, DEFAULT_STROKE_WIDTH, FETCH_TIMEOUT_MS,
    GUIDE_STROKE_COLOR, GUIDE_STROKE_WIDTH, MAP_FILL_OPACITY, MAP_FIT_PADDING,
    POLYGONS_GEOJSON_PATH,
};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Environment variable naming an explicit configuration file.
pub const ENV_CONFIG_PATH: &str = "ZONEKIT_CONFIG";

/// Environment variable overriding `remote.base_url`.
pub const ENV_BASE_URL: &str = "ZONEKIT_BASE_URL";

/// Application directory name under the platform config directory.
const APP_DIR: &str = "zonekit";

/// Default configuration file name.
const CONFIG_FILE: &str = "config.toml";

/// Zone service connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// Service root, e.g. `http://localhost:42001`.
    pub base_url: String,
    /// Path of the feature collection endpoint.
    pub polygons_path: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            polygons_path: POLYGONS_GEOJSON_PATH.to_string(),
            timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

impl RemoteSettings {
    /// Full URL of the feature collection endpoint.
    pub fn polygons_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.polygons_path.starts_with('/') {
            format!("{}{}", base, self.polygons_path)
        } else {
            format!("{}/{}", base, self.polygons_path)
        }
    }
}

/// Drawing behavior and guide appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingSettings {
    /// Click count that closes a zone being drawn.
    pub auto_close_clicks: usize,
    pub stroke_width: f64,
    pub guide_stroke_width: f64,
    pub guide_color: String,
}

impl Default for DrawingSettings {
    fn default() -> Self {
        Self {
            auto_close_clicks: AUTO_CLOSE_CLICKS,
            stroke_width: DEFAULT_STROKE_WIDTH,
            guide_stroke_width: GUIDE_STROKE_WIDTH,
            guide_color: GUIDE_STROKE_COLOR.to_string(),
        }
    }
}

/// Map overlay appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Opacity of zone fill layers, 0.0 to 1.0.
    pub fill_opacity: f64,
    /// Padding in pixels when fitting the map to a zone.
    pub fit_padding: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            fill_opacity: MAP_FILL_OPACITY,
            fit_padding: MAP_FIT_PADDING,
        }
    }
}

/// Displayed and natural size of the backing raster image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    pub client_width: u32,
    pub client_height: u32,
    pub natural_width: u32,
    pub natural_height: u32,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            client_width: 1280,
            client_height: 720,
            natural_width: 1280,
            natural_height: 720,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteSettings,
    pub drawing: DrawingSettings,
    pub map: MapSettings,
    pub image: ImageSettings,
}

impl Config {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a `.json` or `.toml` file.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Config = match extension(path)?.as_str() {
            "json" => serde_json::from_str(&content)?,
            "toml" => toml::from_str(&content)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string()).into()),
        };

        config.validate()?;
        debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file, creating parent
    /// directories as needed.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        let content = match extension(path)?.as_str() {
            "json" => serde_json::to_string_pretty(self)?,
            "toml" => toml::to_string_pretty(self)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string()).into()),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// Default configuration file location under the platform config
    /// directory.
    pub fn default_config_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config or home directory".to_string())
            })?;
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        Ok(path)
    }

    /// Loads from `path` when the file exists, otherwise falls back to
    /// defaults. A file that exists but fails to parse or validate is an
    /// error.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            info!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies environment overrides through `lookup`, which is normally
    /// `|key| std::env::var(key).ok()`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            debug!(url = %url, "Base URL overridden from environment");
            self.remote.base_url = url.trim().to_string();
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> SettingsResult<()> {
        let url = self.remote.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SettingsError::InvalidSetting {
                key: "remote.base_url".to_string(),
                reason: "must start with http:// or https://".to_string(),
            });
        }

        if self.remote.timeout_ms == 0 {
            return Err(out_of_range("remote.timeout_ms", self.remote.timeout_ms));
        }

        if self.drawing.auto_close_clicks < 4 {
            return Err(out_of_range(
                "drawing.auto_close_clicks",
                self.drawing.auto_close_clicks,
            ));
        }

        if !(self.drawing.stroke_width > 0.0) {
            return Err(out_of_range("drawing.stroke_width", self.drawing.stroke_width));
        }

        if !(self.drawing.guide_stroke_width > 0.0) {
            return Err(out_of_range(
                "drawing.guide_stroke_width",
                self.drawing.guide_stroke_width,
            ));
        }

        if !(0.0..=1.0).contains(&self.map.fill_opacity) {
            return Err(out_of_range("map.fill_opacity", self.map.fill_opacity));
        }

        if !(self.map.fit_padding >= 0.0) {
            return Err(out_of_range("map.fit_padding", self.map.fit_padding));
        }

        let image = &self.image;
        for (key, value) in [
            ("image.client_width", image.client_width),
            ("image.client_height", image.client_height),
            ("image.natural_width", image.natural_width),
            ("image.natural_height", image.natural_height),
        ] {
            if value == 0 {
                return Err(out_of_range(key, value));
            }
        }

        Ok(())
    }
}

fn extension(path: &Path) -> SettingsResult<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()).into())
}

fn out_of_range(key: &str, value: impl ToString) -> SettingsError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}
