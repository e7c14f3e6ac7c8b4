//! # Viewer Configuration
//!
//! Loaded once at startup from TOML. Every section is optional; missing
//! sections and fields take their defaults.
//!
//! ```toml
//! log_filter = "info,lifeview_networking=debug"
//!
//! [window]
//! title = "LIFEVIEW"
//! width = 1280
//! height = 720
//!
//! [grid]
//! wire_format = "headered"   # or "raw"
//! side = 1024                # raw frames only; headers carry their own
//!
//! [render]
//! target_fps = 60
//!
//! [transport]
//! url = "ws://localhost:80"
//! reconnect = true
//!
//! [zoom]
//! initial_scale = 10.0
//! ```
//!
//! Lookup order: first CLI argument, then `LIFEVIEW_CONFIG`, then defaults.

use std::path::{Path, PathBuf};

use lifeview_networking::TransportConfig;
use lifeview_shared::{WireFormat, MAX_SCALE, MIN_SCALE, TARGET_FPS};
use lifeview_ui::ZoomConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "LIFEVIEW_CONFIG";

/// Default tracing filter when neither `RUST_LOG` nor the config sets one.
const DEFAULT_LOG_FILTER: &str = "info";

/// Window settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Initial inner width in pixels.
    pub width: u32,
    /// Initial inner height in pixels.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "LIFEVIEW".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Grid and framing settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// How inbound messages are framed.
    pub wire_format: WireFormat,
    /// Side length for raw frames. Unset means the smallest covering square.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<u32>,
}

/// Render loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Animation ticks per second.
    pub target_fps: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
        }
    }
}

/// Complete viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub log_filter: String,
    /// Window settings.
    pub window: WindowConfig,
    /// Grid and framing.
    pub grid: GridConfig,
    /// Render loop.
    pub render: RenderConfig,
    /// Server connection.
    pub transport: TransportConfig,
    /// Zoom tuning.
    pub zoom: ZoomConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            window: WindowConfig::default(),
            grid: GridConfig::default(),
            render: RenderConfig::default(),
            transport: TransportConfig::default(),
            zoom: ZoomConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads a config file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Loads from the first CLI argument, then `LIFEVIEW_CONFIG`, then
    /// defaults. Returns the config and the path it came from.
    ///
    /// # Errors
    ///
    /// Fails if a named file cannot be loaded.
    pub fn resolve(arg: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let path = arg.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.side == Some(0) {
            return Err(invalid("grid.side must be at least 1"));
        }
        if self.render.target_fps == 0 {
            return Err(invalid("render.target_fps must be at least 1"));
        }

        let zoom = &self.zoom;
        if !(zoom.min_scale >= MIN_SCALE && zoom.max_scale <= MAX_SCALE) {
            return Err(ConfigError::Invalid(format!(
                "zoom bounds must lie within [{MIN_SCALE}, {MAX_SCALE}]"
            )));
        }
        if zoom.min_scale > zoom.max_scale {
            return Err(invalid("zoom.min_scale must be <= zoom.max_scale"));
        }
        if !(zoom.ease > 0.0 && zoom.ease <= 1.0) {
            return Err(invalid("zoom.ease must be in (0, 1]"));
        }
        if !(zoom.step > 0.0 && zoom.step < 1.0) {
            return Err(invalid("zoom.step must be in (0, 1)"));
        }
        if zoom.settle_threshold < 0.0 {
            return Err(invalid("zoom.settle_threshold must not be negative"));
        }

        self.transport
            .validate()
            .map_err(|error| ConfigError::Invalid(error.to_string()))
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = ViewerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = ViewerConfig::from_toml_str(
            r#"
            [grid]
            wire_format = "headered"

            [transport]
            url = "ws://10.0.0.5:9000"
            "#,
        )
        .unwrap();

        assert_eq!(config.grid.wire_format, WireFormat::Headered);
        assert_eq!(config.grid.side, None);
        assert_eq!(config.transport.url, "ws://10.0.0.5:9000");
        assert!(config.transport.reconnect);
        assert_eq!(config.window, WindowConfig::default());
        assert_eq!(config.render.target_fps, 60);
    }

    #[test]
    fn test_round_trip() {
        let mut config = ViewerConfig::default();
        config.log_filter = "debug".to_string();
        config.grid.side = Some(512);
        config.zoom.initial_scale = 4.0;

        let text = config.to_toml_string().unwrap();
        let parsed = ViewerConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            ViewerConfig::from_toml_str("[grid]\nside = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ViewerConfig::from_toml_str("[render]\ntarget_fps = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ViewerConfig::from_toml_str("[zoom]\nmin_scale = 50.0\nmax_scale = 10.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ViewerConfig::from_toml_str("[transport]\nurl = \"tcp://x\""),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_zoom_bounds_outside_scale_range() {
        assert!(matches!(
            ViewerConfig::from_toml_str("[zoom]\nmin_scale = 0.25\ninitial_scale = 0.5"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ViewerConfig::from_toml_str("[zoom]\nmax_scale = 400.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(ViewerConfig::from_toml_str("[zoom]\nmin_scale = 2.0\nmax_scale = 50.0").is_ok());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            ViewerConfig::from_toml_str("[grid\nside = 4"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = ViewerConfig::load(Path::new("/nonexistent/lifeview.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_resolve_prefers_argument() {
        let path = std::env::temp_dir().join("lifeview_resolve_test.toml");
        std::fs::write(&path, "[window]\nwidth = 640").unwrap();

        let (config, source) = ViewerConfig::resolve(Some(path.clone())).unwrap();
        assert_eq!(config.window.width, 640);
        assert_eq!(source, Some(path.clone()));

        std::fs::remove_file(path).unwrap();
    }
}
