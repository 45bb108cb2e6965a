//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Preferences are backed by `window.localStorage`; audio clips play through cached
//! `HtmlAudioElement`s and fallback tones are synthesized with the Web Audio API. On non-wasm
//! targets every adapter compiles to an inert stub so the runtime can be unit-tested natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Concrete adapter factories used by the entry layer.
pub mod adapters;
pub mod audio;
pub mod storage;

pub use adapters::{audio_service, build_host_services, prefs_store};
pub use audio::WebAudioService;
pub use storage::local_prefs::WebPrefsStore;
