//! # ZoneKit
//!
//! Draw, edit and delete polygonal zones over a georeferenced raster image,
//! and keep every zone consistent across the drawing canvas, the in-memory
//! feature store and the map overlay.
//!
//! ## Architecture
//!
//! ZoneKit is organized as a workspace with multiple crates:
//!
//! 1. **zonekit-core** - Points, identifiers, colors, the feature model, errors
//! 2. **zonekit-designer** - Interaction state machine, vertex editing, sync engine
//! 3. **zonekit-communication** - Remote feature fetch over HTTP
//! 4. **zonekit-settings** - Configuration persistence and validation
//! 5. **zonekit** - Main binary that integrates all crates

pub use zonekit_communication as communication;
pub use zonekit_designer as designer;
pub use zonekit_settings as settings;

pub use zonekit_communication::{FeatureSource, FetchError, PolygonClient};
pub use zonekit_core::{
    Error, FeatureCollection, GeoFeature, GeometryError, Point, PolygonId, Result, Rgb,
};
pub use zonekit_designer::{
    DrawingRules, EditorOptions, ImageScale, InMemoryCanvas, InMemoryMap, MapOverlay, Mode,
    RenderingSurface, ZoneEditor, ZoneStyle,
};
pub use zonekit_settings::{Config, SettingsError, SettingsResult};

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Console output, `RUST_LOG` support, INFO when nothing else is requested.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Resolves the configuration file: `ZONEKIT_CONFIG` when set, otherwise
/// the platform default.
pub fn config_path() -> SettingsResult<PathBuf> {
    match std::env::var_os(zonekit_settings::ENV_CONFIG_PATH) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Config::default_config_path(),
    }
}

/// Loads the configuration from [`config_path`] (defaults when the file is
/// absent) and applies environment overrides.
pub fn load_config() -> SettingsResult<Config> {
    let path = config_path()?;
    debug!(path = %path.display(), "Resolving configuration");
    let mut config = Config::load_or_default(&path)?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

/// Editor tunables from the drawing and map sections.
pub fn editor_options(config: &Config) -> EditorOptions {
    EditorOptions {
        rules: DrawingRules {
            auto_close_clicks: config.drawing.auto_close_clicks,
        },
        style: ZoneStyle {
            stroke_width: config.drawing.stroke_width,
            guide_stroke_width: config.drawing.guide_stroke_width,
            guide_color: config.drawing.guide_color.clone(),
            fill_opacity: config.map.fill_opacity,
            fit_padding: config.map.fit_padding,
        },
    }
}

/// Displayed-to-natural image scale from the image section.
pub fn image_scale(config: &Config) -> std::result::Result<ImageScale, GeometryError> {
    let image = &config.image;
    ImageScale::from_dimensions(
        f64::from(image.client_width),
        f64::from(image.client_height),
        f64::from(image.natural_width),
        f64::from(image.natural_height),
    )
}

/// Zone service client from the remote section.
pub fn polygon_client(config: &Config) -> std::result::Result<PolygonClient, FetchError> {
    PolygonClient::from_parts(
        &config.remote.base_url,
        &config.remote.polygons_path,
        Duration::from_millis(config.remote.timeout_ms),
    )
}
