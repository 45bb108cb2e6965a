//! Audio playback contracts and adapters.
//!
//! Playback is fire-and-forget from the shell's point of view: callers await the returned future
//! only to learn whether a clip started, so they can fall back to a synthesized tone.

use std::{
    cell::{Cell, RefCell},
    future::Future,
    pin::Pin,
    rc::Rc,
};

use thiserror::Error;

/// Object-safe boxed future used by [`AudioService`] async methods.
pub type AudioFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A synthesized sine tone with a short linear attack and a linear release to silence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    /// Oscillator frequency in hertz.
    pub frequency_hz: f32,
    /// Total tone length in seconds, release included.
    pub duration_secs: f32,
}

impl ToneSpec {
    /// Time taken to ramp from silence to [`Self::PEAK_GAIN`].
    pub const ATTACK_SECS: f32 = 0.1;
    /// Gain reached at the end of the attack.
    pub const PEAK_GAIN: f32 = 0.7;

    /// Builds a tone description.
    pub const fn new(frequency_hz: f32, duration_secs: f32) -> Self {
        Self {
            frequency_hz,
            duration_secs,
        }
    }
}

/// Failure reported by an [`AudioService`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The clip could not be loaded or the host refused to start playback.
    #[error("audio clip `{url}` failed to play: {reason}")]
    Clip {
        /// Clip location that failed.
        url: String,
        /// Host-provided failure description.
        reason: String,
    },
    /// The host could not synthesize a tone.
    #[error("tone synthesis failed: {0}")]
    Tone(String),
    /// No audio output exists on this host.
    #[error("audio output unavailable")]
    Unavailable,
}

/// Host service that plays audio clips and synthesized tones.
pub trait AudioService {
    /// Starts playing the clip at `url` with `volume` in `0.0..=1.0`.
    ///
    /// Resolves once playback has started or failed. Restarting a clip that is already playing
    /// rewinds it.
    fn play_clip<'a>(&'a self, url: &'a str, volume: f32)
        -> AudioFuture<'a, Result<(), AudioError>>;

    /// Schedules a synthesized tone. Tones ignore the system volume.
    fn play_tone(&self, tone: ToneSpec) -> Result<(), AudioError>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Silent audio service for non-browser targets. Every request succeeds without output.
pub struct NoopAudioService;

impl AudioService for NoopAudioService {
    fn play_clip<'a>(
        &'a self,
        _url: &'a str,
        _volume: f32,
    ) -> AudioFuture<'a, Result<(), AudioError>> {
        Box::pin(async { Ok(()) })
    }

    fn play_tone(&self, _tone: ToneSpec) -> Result<(), AudioError> {
        Ok(())
    }
}

/// One request observed by [`RecordingAudioService`].
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCall {
    /// A clip request.
    Clip {
        /// Requested clip location.
        url: String,
        /// Requested volume.
        volume: f32,
    },
    /// A tone request.
    Tone(ToneSpec),
}

#[derive(Debug, Clone, Default)]
/// In-memory audio service that records requests and can simulate failures.
///
/// Clones share the same call log.
pub struct RecordingAudioService {
    calls: Rc<RefCell<Vec<AudioCall>>>,
    fail_clips: Rc<Cell<bool>>,
    fail_tones: Rc<Cell<bool>>,
}

impl RecordingAudioService {
    /// Makes every subsequent clip request fail.
    pub fn fail_clips(&self, fail: bool) {
        self.fail_clips.set(fail);
    }

    /// Makes every subsequent tone request fail.
    pub fn fail_tones(&self, fail: bool) {
        self.fail_tones.set(fail);
    }

    /// Returns a copy of every request observed so far, in order.
    pub fn calls(&self) -> Vec<AudioCall> {
        self.calls.borrow().clone()
    }
}

impl AudioService for RecordingAudioService {
    fn play_clip<'a>(
        &'a self,
        url: &'a str,
        volume: f32,
    ) -> AudioFuture<'a, Result<(), AudioError>> {
        Box::pin(async move {
            self.calls.borrow_mut().push(AudioCall::Clip {
                url: url.to_string(),
                volume,
            });
            if self.fail_clips.get() {
                return Err(AudioError::Clip {
                    url: url.to_string(),
                    reason: "simulated failure".to_string(),
                });
            }
            Ok(())
        })
    }

    fn play_tone(&self, tone: ToneSpec) -> Result<(), AudioError> {
        self.calls.borrow_mut().push(AudioCall::Tone(tone));
        if self.fail_tones.get() {
            return Err(AudioError::Tone("simulated failure".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn recording_service_logs_clips_and_tones_in_order() {
        let audio = RecordingAudioService::default();
        let audio_obj: &dyn AudioService = &audio;

        block_on(audio_obj.play_clip("/sounds/startup.mp3", 0.5)).expect("clip");
        audio_obj
            .play_tone(ToneSpec::new(440.0, 0.4))
            .expect("tone");

        assert_eq!(
            audio.calls(),
            vec![
                AudioCall::Clip {
                    url: "/sounds/startup.mp3".to_string(),
                    volume: 0.5,
                },
                AudioCall::Tone(ToneSpec::new(440.0, 0.4)),
            ]
        );
    }

    #[test]
    fn recording_service_simulates_failures() {
        let audio = RecordingAudioService::default();
        audio.fail_clips(true);
        audio.fail_tones(true);

        let clip = block_on(audio.play_clip("/sounds/error.mp3", 1.0));
        assert_eq!(
            clip,
            Err(AudioError::Clip {
                url: "/sounds/error.mp3".to_string(),
                reason: "simulated failure".to_string(),
            })
        );
        assert!(audio.play_tone(ToneSpec::new(800.0, 0.8)).is_err());
        assert_eq!(audio.calls().len(), 2);
    }

    #[test]
    fn noop_service_always_succeeds() {
        let audio = NoopAudioService;
        block_on(audio.play_clip("/missing.mp3", 1.0)).expect("noop clip");
        audio.play_tone(ToneSpec::new(300.0, 0.5)).expect("noop tone");
    }
}
