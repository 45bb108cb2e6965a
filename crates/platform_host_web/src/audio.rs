//! Web Audio adapter for [`platform_host::AudioService`].

use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::{collections::HashMap, rc::Rc};

use platform_host::{AudioError, AudioFuture, AudioService, ToneSpec};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, Default)]
/// Browser audio service.
///
/// Clip elements are created lazily and cached per URL so repeated cues reuse one element.
/// Fallback tones share a single `AudioContext`, created on the first tone.
pub struct WebAudioService {
    #[cfg(target_arch = "wasm32")]
    clips: Rc<RefCell<HashMap<String, web_sys::HtmlAudioElement>>>,
    #[cfg(target_arch = "wasm32")]
    tone_context: Rc<RefCell<Option<web_sys::AudioContext>>>,
}

/// Returns the value held in `slot`, filling it with `init` on first use.
///
/// A failed `init` leaves the slot empty so a later call can retry.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn cached_or_init<T: Clone, E>(
    slot: &RefCell<Option<T>>,
    init: impl FnOnce() -> Result<T, E>,
) -> Result<T, E> {
    if let Some(value) = slot.borrow().as_ref() {
        return Ok(value.clone());
    }
    let value = init()?;
    *slot.borrow_mut() = Some(value.clone());
    Ok(value)
}

impl WebAudioService {
    #[cfg(target_arch = "wasm32")]
    fn tone_context(&self) -> Result<web_sys::AudioContext, JsValue> {
        cached_or_init(&self.tone_context, web_sys::AudioContext::new)
    }

    #[cfg(target_arch = "wasm32")]
    fn clip_element(&self, url: &str) -> Result<web_sys::HtmlAudioElement, AudioError> {
        if let Some(element) = self.clips.borrow().get(url) {
            return Ok(element.clone());
        }
        let element = web_sys::HtmlAudioElement::new_with_src(url)
            .map_err(|err| clip_error(url, &err))?;
        self.clips
            .borrow_mut()
            .insert(url.to_string(), element.clone());
        Ok(element)
    }

    async fn start_clip(&self, url: &str, volume: f32) -> Result<(), AudioError> {
        #[cfg(target_arch = "wasm32")]
        {
            let element = self.clip_element(url)?;
            let _ = element.pause();
            element.set_current_time(0.0);
            element.set_volume(f64::from(volume.clamp(0.0, 1.0)));
            let promise = element.play().map_err(|err| clip_error(url, &err))?;
            wasm_bindgen_futures::JsFuture::from(promise)
                .await
                .map_err(|err| clip_error(url, &err))?;
            Ok(())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (url, volume);
            Err(AudioError::Unavailable)
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn clip_error(url: &str, err: &JsValue) -> AudioError {
    AudioError::Clip {
        url: url.to_string(),
        reason: format!("{err:?}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn synthesize_tone(ctx: &web_sys::AudioContext, tone: ToneSpec) -> Result<(), JsValue> {
    let now = ctx.current_time();
    let end = now + f64::from(tone.duration_secs);

    let oscillator = ctx.create_oscillator()?;
    oscillator.set_type(web_sys::OscillatorType::Sine);
    oscillator.frequency().set_value_at_time(tone.frequency_hz, now)?;

    let gain = ctx.create_gain()?;
    let envelope = gain.gain();
    envelope.set_value_at_time(0.0, now)?;
    envelope.linear_ramp_to_value_at_time(
        ToneSpec::PEAK_GAIN,
        now + f64::from(ToneSpec::ATTACK_SECS),
    )?;
    envelope.linear_ramp_to_value_at_time(0.0, end)?;

    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;

    let source: &web_sys::AudioScheduledSourceNode = oscillator.as_ref();
    source.start()?;
    source.stop_with_when(end)?;
    Ok(())
}

impl AudioService for WebAudioService {
    fn play_clip<'a>(
        &'a self,
        url: &'a str,
        volume: f32,
    ) -> AudioFuture<'a, Result<(), AudioError>> {
        Box::pin(self.start_clip(url, volume))
    }

    fn play_tone(&self, tone: ToneSpec) -> Result<(), AudioError> {
        #[cfg(target_arch = "wasm32")]
        {
            return self
                .tone_context()
                .and_then(|ctx| synthesize_tone(&ctx, tone))
                .map_err(|err| AudioError::Tone(format!("{err:?}")));
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = tone;
            Err(AudioError::Unavailable)
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn native_build_reports_audio_unavailable() {
        let audio = WebAudioService::default();
        assert_eq!(
            block_on(audio.play_clip("/sounds/startup.mp3", 0.75)),
            Err(AudioError::Unavailable)
        );
        assert_eq!(
            audio.play_tone(ToneSpec::new(440.0, 3.0)),
            Err(AudioError::Unavailable)
        );
    }

    #[test]
    fn tone_context_is_created_once_and_reused() {
        let slot = RefCell::new(None);
        let mut created = 0;
        for _ in 0..3 {
            let value = cached_or_init(&slot, || {
                created += 1;
                Ok::<_, ()>(created)
            });
            assert_eq!(value, Ok(1));
        }
        assert_eq!(created, 1);
    }

    #[test]
    fn failed_context_creation_is_retried() {
        let slot = RefCell::new(None);
        assert_eq!(cached_or_init(&slot, || Err::<u8, _>("blocked")), Err("blocked"));
        assert_eq!(cached_or_init(&slot, || Ok::<_, &str>(7)), Ok(7));
        assert_eq!(*slot.borrow(), Some(7));
    }
}
