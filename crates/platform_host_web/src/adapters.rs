use std::rc::Rc;

use platform_host::HostServices;

use crate::{WebAudioService, WebPrefsStore};

/// Returns the browser preference store.
pub fn prefs_store() -> WebPrefsStore {
    WebPrefsStore
}

/// Returns a fresh browser audio service with an empty clip cache.
pub fn audio_service() -> WebAudioService {
    WebAudioService::default()
}

/// Assembles the browser host bundle injected into `DesktopProvider`.
pub fn build_host_services() -> HostServices {
    HostServices::new(Rc::new(prefs_store()), Rc::new(audio_service()))
}
