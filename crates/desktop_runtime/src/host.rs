//! Host-side runtime helpers for executing reducer effects and driving the session lifecycle.
//!
//! Reducer semantics stay pure; anything that touches the DOM, timers, or host services runs
//! behind [`DesktopHostContext`].

mod host_ui;
mod session;

use std::rc::Rc;

use platform_host::{AudioService, HostServices, PrefsStore};

use crate::{model::WindowId, reducer::RuntimeEffect, runtime_context::DesktopRuntimeContext};

pub(crate) use session::enter_session_phase;

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    services: HostServices,
}

impl DesktopHostContext {
    /// Wraps an injected host service bundle.
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.services.prefs_store()
    }

    pub fn audio_service(&self) -> Rc<dyn AudioService> {
        self.services.audio_service()
    }

    /// Schedules boot and shutdown stage transitions for the lifetime of the provider.
    pub fn install_session_timers(&self, runtime: DesktopRuntimeContext) {
        session::install_session_timers(runtime);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::FocusWindow(window_id) => self.focus_window(window_id),
        }
    }

    /// Moves keyboard focus to a window surface once the current render settles.
    pub fn focus_window(&self, window_id: WindowId) {
        host_ui::focus_window_surface(window_id);
    }
}
