use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::*;

use crate::{
    boot::{next_transition, SessionPhase},
    model::DesktopState,
    runtime_context::DesktopRuntimeContext,
};

pub(super) fn install_session_timers(runtime: DesktopRuntimeContext) {
    let pending = store_value(None::<TimeoutHandle>);

    create_effect(move |_| {
        let phase = runtime.session.get();
        cancel_pending(pending);

        let timings = runtime.config.with_value(|config| config.boot.clone());
        let Some((delay, next)) = next_transition(phase, &timings) else {
            return;
        };
        match set_timeout_with_handle(move || enter_session_phase(runtime, next), delay) {
            Ok(handle) => pending.set_value(Some(handle)),
            Err(err) => logging::warn!("session timer for {next:?} failed: {err:?}"),
        }
    });

    on_cleanup(move || cancel_pending(pending));
}

fn cancel_pending(pending: StoredValue<Option<TimeoutHandle>>) {
    if let Some(Some(handle)) = pending.try_update_value(Option::take) {
        handle.clear();
    }
}

/// Switches the session to `phase`, running its entry side effects first.
pub(crate) fn enter_session_phase(runtime: DesktopRuntimeContext, phase: SessionPhase) {
    if phase.resets_registry() {
        runtime.effects.set(Vec::new());
        runtime.state.set(DesktopState::default());
    }
    if let Some(kind) = phase.entry_sound() {
        runtime.play_sound(kind);
    }
    runtime.session.set(phase);
}
