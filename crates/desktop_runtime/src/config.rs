//! Desktop configuration embedded from `desktop.toml` at build time.
//!
//! `build.rs` validates the TOML and emits it as JSON; [`DesktopConfig::load_or_default`] parses
//! that JSON once at provider startup and falls back to compiled defaults on failure.

use leptos::logging;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{WindowPosition, WindowSize};

include!(concat!(env!("OUT_DIR"), "/desktop_config_generated.rs"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("desktop configuration is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("window minimum size must be positive, found {width}x{height}")]
    InvalidMinimum { width: i32, height: i32 },
    #[error("cascade wrap must be positive, found {0}")]
    InvalidCascade(i32),
    #[error("boot progress step must be in 1..=100, found {0}")]
    InvalidProgressStep(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowLayout {
    pub base: i32,
    pub step: i32,
    pub wrap: i32,
    pub min_width: i32,
    pub min_height: i32,
    pub default_width: i32,
    pub default_height: i32,
    pub active_z_index: u32,
    pub inactive_z_index: u32,
}

impl Default for WindowLayout {
    fn default() -> Self {
        Self {
            base: 100,
            step: 30,
            wrap: 150,
            min_width: 300,
            min_height: 200,
            default_width: 600,
            default_height: 400,
            active_z_index: 50,
            inactive_z_index: 10,
        }
    }
}

impl WindowLayout {
    /// Initial position for a window opened while `open_count` windows already exist.
    ///
    /// The offset is `(open_count * step) mod wrap`, so the sixth window lands back on the base.
    pub fn cascade_position(&self, open_count: usize) -> WindowPosition {
        let wrap = i64::from(self.wrap.max(1));
        let count = i64::try_from(open_count).unwrap_or(i64::MAX) % wrap;
        let offset = (count * i64::from(self.step)).rem_euclid(wrap) as i32;
        WindowPosition {
            x: self.base + offset,
            y: self.base + offset,
        }
    }

    pub fn default_size(&self) -> WindowSize {
        WindowSize {
            width: self.default_width,
            height: self.default_height,
        }
    }

    pub fn clamp_size(&self, size: WindowSize) -> WindowSize {
        size.clamped_min(self.min_width, self.min_height)
    }

    pub fn z_index(&self, is_active: bool) -> u32 {
        if is_active {
            self.active_z_index
        } else {
            self.inactive_z_index
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootTimings {
    pub logo_ms: u64,
    pub progress_tick_ms: u64,
    pub progress_step: u8,
    pub progress_settle_ms: u64,
    pub welcome_ms: u64,
    pub saving_settings_ms: u64,
    pub shutting_down_ms: u64,
    #[serde(default)]
    pub skip_startup: bool,
}

impl Default for BootTimings {
    fn default() -> Self {
        Self {
            logo_ms: 2000,
            progress_tick_ms: 60,
            progress_step: 2,
            progress_settle_ms: 500,
            welcome_ms: 1000,
            saving_settings_ms: 2000,
            shutting_down_ms: 3000,
            skip_startup: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundDefaults {
    pub volume_percent: u8,
    #[serde(default)]
    pub muted: bool,
    pub asset_root: String,
}

impl Default for SoundDefaults {
    fn default() -> Self {
        Self {
            volume_percent: 75,
            muted: false,
            asset_root: "/sounds".to_string(),
        }
    }
}

/// Start menu column an app entry is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LauncherSection {
    Pinned,
    Programs,
    Places,
    Computer,
    System,
}

impl LauncherSection {
    /// Heading shown above the group, if the section has one.
    pub fn heading(self) -> Option<&'static str> {
        match self {
            Self::Pinned | Self::Programs => None,
            Self::Places => Some("My Documents"),
            Self::Computer => Some("My Computer"),
            Self::System => Some("System"),
        }
    }
}

fn default_launchable() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    pub title: String,
    pub icon_ref: String,
    #[serde(default)]
    pub desktop: bool,
    #[serde(default)]
    pub launcher: Option<LauncherSection>,
    /// Entries that are listed but open nothing when chosen.
    #[serde(default = "default_launchable")]
    pub launchable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopConfig {
    pub window: WindowLayout,
    pub boot: BootTimings,
    pub sound: SoundDefaults,
    #[serde(default)]
    pub apps: Vec<AppEntry>,
}

impl DesktopConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses the configuration embedded at build time.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json(DESKTOP_CONFIG_JSON)
    }

    pub fn load_or_default() -> Self {
        Self::builtin().unwrap_or_else(|err| {
            logging::warn!("falling back to default desktop configuration: {err}");
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.min_width <= 0 || self.window.min_height <= 0 {
            return Err(ConfigError::InvalidMinimum {
                width: self.window.min_width,
                height: self.window.min_height,
            });
        }
        if self.window.wrap <= 0 {
            return Err(ConfigError::InvalidCascade(self.window.wrap));
        }
        if self.boot.progress_step == 0 || self.boot.progress_step > 100 {
            return Err(ConfigError::InvalidProgressStep(self.boot.progress_step));
        }
        Ok(())
    }

    pub fn desktop_icons(&self) -> impl Iterator<Item = &AppEntry> {
        self.apps.iter().filter(|app| app.desktop)
    }

    pub fn launcher_entries(&self, section: LauncherSection) -> impl Iterator<Item = &AppEntry> {
        self.apps
            .iter()
            .filter(move |app| app.launcher == Some(section))
    }

    pub fn icon_for(&self, title: &str) -> Option<&str> {
        self.apps
            .iter()
            .find(|app| app.title == title)
            .map(|app| app.icon_ref.as_str())
    }
}
