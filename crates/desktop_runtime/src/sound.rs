//! System sound cues with a synthesized fallback.
//!
//! Playback never blocks the shell: [`SoundPlayer::play_system`] spawns the attempt and returns.
//! A clip that fails to load or start is replaced by a short sine tone; if that fails too the cue
//! is dropped with a warning.

use std::cell::Cell;
use std::rc::Rc;

use leptos::logging;
use platform_host::{AudioService, PrefsError, PrefsStore, ToneSpec};

use crate::config::SoundDefaults;
use crate::event_bus::{DesktopEvent, DesktopTopic, EventBus, Subscription};

/// Preference key holding the global sound switch. The value `"disabled"` turns cues off.
pub const SOUNDS_PREF_KEY: &str = "windowsXpSounds";
const SOUNDS_DISABLED: &str = "disabled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundKind {
    Startup,
    Shutdown,
    Error,
    Notification,
    Warning,
    Critical,
    Question,
    Exclamation,
    Asterisk,
    WindowOpen,
    WindowClose,
    NavigationStart,
    NavigationComplete,
}

impl SoundKind {
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Startup => "startup.mp3",
            Self::Shutdown => "shutdown.mp3",
            Self::Error => "error.mp3",
            Self::Notification => "notification.mp3",
            Self::Warning => "warning.mp3",
            Self::Critical => "critical.mp3",
            Self::Question => "question.mp3",
            Self::Exclamation => "exclamation.mp3",
            Self::Asterisk => "asterisk.mp3",
            Self::WindowOpen => "windowOpen.mp3",
            Self::WindowClose => "windowClose.mp3",
            Self::NavigationStart => "navigation-start.mp3",
            Self::NavigationComplete => "navigation-complete.mp3",
        }
    }

    pub fn asset_url(self, asset_root: &str) -> String {
        format!("{}/{}", asset_root.trim_end_matches('/'), self.file_name())
    }

    pub const fn fallback_tone(self) -> ToneSpec {
        match self {
            Self::Startup => ToneSpec::new(440.0, 3.0),
            Self::Shutdown => ToneSpec::new(440.0, 2.5),
            Self::Error => ToneSpec::new(800.0, 0.8),
            Self::Notification => ToneSpec::new(600.0, 0.6),
            Self::NavigationStart => ToneSpec::new(350.0, 0.3),
            Self::NavigationComplete => ToneSpec::new(550.0, 0.4),
            Self::WindowOpen => ToneSpec::new(440.0, 0.4),
            Self::WindowClose => ToneSpec::new(300.0, 0.5),
            Self::Warning
            | Self::Critical
            | Self::Question
            | Self::Exclamation
            | Self::Asterisk => ToneSpec::new(440.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundSettings {
    /// Linear gain in `0.0..=1.0`.
    pub volume: f32,
    pub muted: bool,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            volume: 0.75,
            muted: false,
        }
    }
}

impl SoundSettings {
    pub fn from_defaults(defaults: &SoundDefaults) -> Self {
        Self {
            volume: percent_to_gain(defaults.volume_percent),
            muted: defaults.muted,
        }
    }

    pub fn volume_percent(&self) -> u8 {
        (self.volume * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

fn percent_to_gain(percent: u8) -> f32 {
    f32::from(percent.min(100)) / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Muted,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Clip,
    FallbackTone,
    /// Both the clip and the fallback tone failed.
    Silent,
    Skipped(SkipReason),
}

#[derive(Clone)]
pub struct SoundPlayer {
    audio: Rc<dyn AudioService>,
    prefs: Rc<dyn PrefsStore>,
    settings: Rc<Cell<SoundSettings>>,
    asset_root: Rc<str>,
}

impl SoundPlayer {
    pub fn new(
        audio: Rc<dyn AudioService>,
        prefs: Rc<dyn PrefsStore>,
        defaults: &SoundDefaults,
    ) -> Self {
        Self {
            audio,
            prefs,
            settings: Rc::new(Cell::new(SoundSettings::from_defaults(defaults))),
            asset_root: Rc::from(defaults.asset_root.as_str()),
        }
    }

    pub fn settings(&self) -> SoundSettings {
        self.settings.get()
    }

    pub fn set_volume_percent(&self, percent: u8) {
        let mut settings = self.settings.get();
        settings.volume = percent_to_gain(percent);
        self.settings.set(settings);
    }

    pub fn set_muted(&self, muted: bool) {
        let mut settings = self.settings.get();
        settings.muted = muted;
        self.settings.set(settings);
    }

    /// Reads the persisted sound switch. Unreadable preferences count as enabled.
    pub fn sounds_enabled(&self) -> bool {
        match self.prefs.load_raw(SOUNDS_PREF_KEY) {
            Ok(value) => value.as_deref() != Some(SOUNDS_DISABLED),
            Err(err) => {
                logging::warn!("sound preference unreadable, assuming enabled: {err}");
                true
            }
        }
    }

    /// Disabling stores the `"disabled"` marker; enabling removes the key.
    pub fn set_sounds_enabled(&self, enabled: bool) -> Result<(), PrefsError> {
        if enabled {
            self.prefs.delete(SOUNDS_PREF_KEY)
        } else {
            self.prefs.save_raw(SOUNDS_PREF_KEY, SOUNDS_DISABLED)
        }
    }

    /// Keeps volume and mute in sync with `volumeChange` / `muteChange` broadcasts.
    pub fn attach(&self, bus: &EventBus) -> [Subscription; 2] {
        let player = self.clone();
        let volume = bus.subscribe(DesktopTopic::VolumeChange, move |event| {
            if let DesktopEvent::VolumeChange { volume } = event {
                player.set_volume_percent(*volume);
            }
        });
        let player = self.clone();
        let mute = bus.subscribe(DesktopTopic::MuteChange, move |event| {
            if let DesktopEvent::MuteChange { muted } = event {
                player.set_muted(*muted);
            }
        });
        [volume, mute]
    }

    /// Fire-and-forget playback used by the shell.
    pub fn play_system(&self, kind: SoundKind) {
        let player = self.clone();
        leptos::spawn_local(async move {
            player.play(kind).await;
        });
    }

    pub async fn play(&self, kind: SoundKind) -> PlaybackOutcome {
        let settings = self.settings.get();
        if settings.muted {
            return PlaybackOutcome::Skipped(SkipReason::Muted);
        }
        if !self.sounds_enabled() {
            return PlaybackOutcome::Skipped(SkipReason::Disabled);
        }

        let url = kind.asset_url(&self.asset_root);
        match self.audio.play_clip(&url, settings.volume).await {
            Ok(()) => PlaybackOutcome::Clip,
            Err(clip_err) => {
                logging::warn!("sound {kind:?} unavailable, using fallback tone: {clip_err}");
                match self.audio.play_tone(kind.fallback_tone()) {
                    Ok(()) => PlaybackOutcome::FallbackTone,
                    Err(tone_err) => {
                        logging::warn!("fallback tone for {kind:?} failed: {tone_err}");
                        PlaybackOutcome::Silent
                    }
                }
            }
        }
    }
}
