//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the runtime effect queue, the session phase,
//! and the broadcast wiring between the event bus, the reducer, and the sound player. UI
//! composition stays in [`crate::components`].

use leptos::*;
use platform_host::HostServices;

use crate::{
    boot::{initial_phase, request_shutdown, SessionPhase},
    config::DesktopConfig,
    effect_executor,
    event_bus::{DesktopEvent, DesktopTopic, EventBus},
    host::{enter_session_phase, DesktopHostContext},
    model::DesktopState,
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
    sound::{SoundKind, SoundPlayer},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects.
    pub host: StoredValue<DesktopHostContext>,
    /// Configuration embedded at build time.
    pub config: StoredValue<DesktopConfig>,
    /// Reactive window registry.
    pub state: RwSignal<DesktopState>,
    /// Boot / running / shutdown phase.
    pub session: RwSignal<SessionPhase>,
    /// Queue of runtime effects emitted by the reducer and processed by the shell.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Desktop-wide broadcast channel.
    pub bus: StoredValue<EventBus>,
    pub sound: StoredValue<SoundPlayer>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Publishes `event` on the desktop bus and returns how many handlers saw it.
    pub fn publish(&self, event: DesktopEvent) -> usize {
        self.bus.get_value().publish(event)
    }

    /// Plays a system cue without waiting for it. A no-op once the provider is gone.
    pub fn play_sound(&self, kind: SoundKind) {
        if let Some(sound) = self.sound.try_get_value() {
            sound.play_system(kind);
        }
    }
}

fn subscribe_shell_topics(runtime: DesktopRuntimeContext) {
    let bus = runtime.bus.get_value();

    bus.subscribe(DesktopTopic::OpenWindow, move |event| {
        let DesktopEvent::OpenWindow(request) = event else {
            return;
        };
        if runtime.session.get_untracked().desktop_mounted() {
            runtime.dispatch_action(DesktopAction::OpenWindow(request.clone()));
        } else {
            logging::log!("ignoring open request for `{}` while the desktop is down", request.title);
        }
    });

    bus.subscribe(DesktopTopic::Shutdown, move |_| {
        match request_shutdown(runtime.session.get_untracked()) {
            Some(next) => enter_session_phase(runtime, next),
            None => logging::log!("ignoring shutdown request outside the running desktop"),
        }
    });
}

fn install_runtime_orchestration(runtime: DesktopRuntimeContext, initial: SessionPhase) {
    subscribe_shell_topics(runtime);
    if let Some(kind) = initial.entry_sound() {
        runtime.play_sound(kind);
    }
    runtime.host.get_value().install_session_timers(runtime);
    effect_executor::install(runtime);
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and starts the boot sequence.
pub fn DesktopProvider(
    /// Injected host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let host_context = DesktopHostContext::new(host_services);
    let desktop_config = DesktopConfig::load_or_default();
    let initial = initial_phase(&desktop_config.boot);

    let event_bus = EventBus::new();
    let sound_player = SoundPlayer::new(
        host_context.audio_service(),
        host_context.prefs_store(),
        &desktop_config.sound,
    );
    sound_player.attach(&event_bus);

    let host = store_value(host_context);
    let config = store_value(desktop_config);
    let state = create_rw_signal(DesktopState::default());
    let session = create_rw_signal(initial);
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let bus = store_value(event_bus);
    let sound = store_value(sound_player);

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let previous = desktop.clone();

        let new_effects = config.with_value(|config| reduce_desktop(&mut desktop, config, action));

        if desktop != previous {
            state.set(desktop);
        }
        if !new_effects.is_empty() {
            let mut queue = effects.get_untracked();
            queue.extend(new_effects);
            effects.set(queue);
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        config,
        state,
        session,
        effects,
        bus,
        sound,
        dispatch,
    };

    provide_context(runtime);

    install_runtime_orchestration(runtime, initial);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
