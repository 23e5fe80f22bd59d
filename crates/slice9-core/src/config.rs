//! Application configuration loaded from TOML.
//!
//! Every key is optional. Missing keys take the defaults below, which
//! reproduce the stock demo: a 640x320 window showing `ui.png` with
//! insets top 24, bottom 5, left 17, right 17.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use slice9_types::color::Color;
use slice9_types::error::{Result, Slice9Error};

use crate::insets::BorderInsets;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "SLICE9_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub skin: SkinConfig,
}

/// Window and frame-loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Sleep between event-loop iterations.
    pub frame_delay_ms: u64,
    /// `#RRGGBB` or `#RRGGBBAA`.
    pub background: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "SDL2 9 Slice".to_string(),
            width: 640,
            height: 320,
            frame_delay_ms: 100,
            background: "#000000".to_string(),
        }
    }
}

/// Source image and its border insets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinConfig {
    pub image: PathBuf,
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Default for SkinConfig {
    fn default() -> Self {
        Self {
            image: PathBuf::from("ui.png"),
            top: 24,
            bottom: 5,
            left: 17,
            right: 17,
        }
    }
}

impl SkinConfig {
    pub fn insets(&self) -> BorderInsets {
        BorderInsets::new(self.top, self.bottom, self.left, self.right)
    }
}

impl AppConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    ///
    /// A relative skin image path is resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        if config.skin.image.is_relative()
            && let Some(dir) = path.parent()
        {
            config.skin.image = dir.join(&config.skin.image);
        }
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve the config from a CLI argument, the `SLICE9_CONFIG`
    /// environment variable, or built-in defaults, in that order.
    pub fn resolve(arg: Option<String>) -> Result<Self> {
        match arg.or_else(|| std::env::var(CONFIG_ENV).ok()) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                log::info!("No config given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check values that deserialization alone can't.
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(Slice9Error::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        self.background_color()?;
        Ok(())
    }

    /// The parsed background color.
    pub fn background_color(&self) -> Result<Color> {
        Color::parse_hex(&self.window.background).ok_or_else(|| {
            Slice9Error::Config(format!("invalid background color: {}", self.window.background))
        })
    }
}
