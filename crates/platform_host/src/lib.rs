//! Typed host-service contracts shared by the desktop runtime and its browser adapters.
//!
//! This crate is the boundary between the shell and whatever environment it runs in. It exposes
//! the preference-store and audio-playback traits, their error types, and in-memory or no-op
//! adapters for tests and non-browser targets. Concrete browser adapters live in
//! `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod audio;
pub mod host;
pub mod storage;

pub use audio::{
    AudioCall, AudioError, AudioFuture, AudioService, NoopAudioService, RecordingAudioService,
    ToneSpec,
};
pub use host::HostServices;
pub use storage::prefs::{MemoryPrefsStore, NoopPrefsStore, PrefsError, PrefsStore};
