//! Host-service bundle handed to the desktop runtime by the entry layer.

use std::rc::Rc;

use crate::{AudioService, MemoryPrefsStore, NoopAudioService, PrefsStore};

#[derive(Clone)]
/// Concrete host services selected by the entry layer and injected into the runtime.
pub struct HostServices {
    prefs: Rc<dyn PrefsStore>,
    audio: Rc<dyn AudioService>,
}

impl HostServices {
    /// Bundles the given service implementations.
    pub fn new(prefs: Rc<dyn PrefsStore>, audio: Rc<dyn AudioService>) -> Self {
        Self { prefs, audio }
    }

    /// Host bundle with in-memory prefs and silent audio, for tests and non-browser targets.
    pub fn in_memory() -> Self {
        Self::new(
            Rc::new(MemoryPrefsStore::default()),
            Rc::new(NoopAudioService),
        )
    }

    /// Returns the configured preference store.
    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.prefs.clone()
    }

    /// Returns the configured audio service.
    pub fn audio_service(&self) -> Rc<dyn AudioService> {
        self.audio.clone()
    }
}

impl Default for HostServices {
    fn default() -> Self {
        Self::in_memory()
    }
}
