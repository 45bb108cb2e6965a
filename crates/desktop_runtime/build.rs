use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const LAUNCHER_SECTIONS: [&str; 5] = ["pinned", "programs", "places", "computer", "system"];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowLayout {
    base: i32,
    step: i32,
    wrap: i32,
    min_width: i32,
    min_height: i32,
    default_width: i32,
    default_height: i32,
    active_z_index: u32,
    inactive_z_index: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BootTimings {
    logo_ms: u64,
    progress_tick_ms: u64,
    progress_step: u8,
    progress_settle_ms: u64,
    welcome_ms: u64,
    saving_settings_ms: u64,
    shutting_down_ms: u64,
    #[serde(default)]
    skip_startup: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SoundDefaults {
    volume_percent: u8,
    #[serde(default)]
    muted: bool,
    asset_root: String,
}

fn default_launchable() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppEntry {
    title: String,
    icon_ref: String,
    #[serde(default)]
    desktop: bool,
    #[serde(default)]
    launcher: Option<String>,
    #[serde(default = "default_launchable")]
    launchable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DesktopManifest {
    window: WindowLayout,
    boot: BootTimings,
    sound: SoundDefaults,
    #[serde(default)]
    apps: Vec<AppEntry>,
}

fn validate(manifest: &DesktopManifest) -> Result<(), String> {
    let window = &manifest.window;
    if window.min_width <= 0 || window.min_height <= 0 {
        return Err(format!(
            "window minimum must be positive, found {}x{}",
            window.min_width, window.min_height
        ));
    }
    if window.default_width < window.min_width || window.default_height < window.min_height {
        return Err("window default size is below the minimum".to_string());
    }
    if window.wrap <= 0 || window.step < 0 || window.base < 0 {
        return Err("cascade base/step must be non-negative and wrap positive".to_string());
    }
    if window.active_z_index <= window.inactive_z_index {
        return Err("active z-index must stack above inactive windows".to_string());
    }
    if manifest.boot.progress_step == 0 || manifest.boot.progress_step > 100 {
        return Err(format!(
            "boot progress_step must be in 1..=100, found {}",
            manifest.boot.progress_step
        ));
    }
    if manifest.sound.volume_percent > 100 {
        return Err(format!(
            "sound volume_percent must be <= 100, found {}",
            manifest.sound.volume_percent
        ));
    }

    let mut titles = BTreeSet::new();
    for app in &manifest.apps {
        if app.title.trim().is_empty() {
            return Err("app entry with empty title".to_string());
        }
        if !titles.insert(app.title.as_str()) {
            return Err(format!("duplicate app title `{}`", app.title));
        }
        if let Some(section) = app.launcher.as_deref() {
            if !LAUNCHER_SECTIONS.contains(&section) {
                return Err(format!(
                    "app `{}` names unknown launcher section `{section}`",
                    app.title
                ));
            }
        }
        if app.desktop && !app.launchable {
            return Err(format!(
                "desktop icon `{}` must be launchable",
                app.title
            ));
        }
    }
    Ok(())
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("desktop.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let manifest: DesktopManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if let Err(problem) = validate(&manifest) {
        panic!("invalid desktop configuration in {}: {problem}", path.display());
    }

    let json = serde_json::to_string_pretty(&manifest).expect("serialize desktop configuration");
    let generated = format!(
        "/// Build-time generated desktop configuration JSON.\n\
pub const DESKTOP_CONFIG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("desktop_config_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
