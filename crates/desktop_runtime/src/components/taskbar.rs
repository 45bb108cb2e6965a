use super::*;
use crate::event_bus::clamp_volume_percent;

const CLOSE_ALL_PROMPT: &str =
    "Are you sure you want to close all open windows? This action cannot be undone.";

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    view! {
        <footer
            class="taskbar"
            role="toolbar"
            aria-label="Taskbar"
            on:mousedown=move |ev| ev.stop_propagation()
        >
            <button
                id="taskbar-start-button"
                type="button"
                class=move || {
                    if state.with(|desktop| desktop.start_menu_open) {
                        "taskbar-start pressed"
                    } else {
                        "taskbar-start"
                    }
                }
                aria-haspopup="menu"
                aria-expanded=move || state.with(|desktop| desktop.start_menu_open)
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    runtime.dispatch_action(DesktopAction::ToggleStartMenu);
                }
            >
                <img src=WINDOWS_LOGO_ICON alt="" width="20" height="20" />
                <span>"start"</span>
            </button>

            <div class="taskbar-running-strip" role="group" aria-label="Running windows">
                <For
                    each=move || {
                        state.with(|desktop| {
                            desktop
                                .windows
                                .iter()
                                .map(|win| (win.id, win.title.clone(), win.icon_ref.clone()))
                                .collect::<Vec<_>>()
                        })
                    }
                    key=|(window_id, _, _)| window_id.0
                    children=|(window_id, title, icon_ref)| {
                        view! { <TaskbarWindowButton window_id title icon_ref /> }
                    }
                />
            </div>

            <SystemTray />
        </footer>
    }
}

#[component]
fn TaskbarWindowButton(window_id: WindowId, title: String, icon_ref: String) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let highlighted = create_memo(move |_| {
        state.with(|desktop| {
            desktop
                .window(window_id)
                .is_some_and(|win| win.is_active && !win.is_minimized)
        })
    });
    let tooltip = title.clone();

    view! {
        <button
            id=taskbar_window_button_dom_id(window_id)
            type="button"
            class=move || {
                if highlighted.get() {
                    "taskbar-window-button active"
                } else {
                    "taskbar-window-button"
                }
            }
            aria-pressed=move || highlighted.get()
            title=tooltip
            on:click=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(DesktopAction::SelectTaskbarWindow { window_id });
            }
        >
            <img class="taskbar-app-icon" src=icon_ref alt="" width="16" height="16" />
            <span class="taskbar-app-label">{title}</span>
        </button>
    }
}

#[component]
fn SystemTray() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let initial = runtime.sound.with_value(|sound| sound.settings());
    let volume = create_rw_signal(initial.volume_percent());
    let muted = create_rw_signal(initial.muted);
    let volume_open = create_rw_signal(false);
    let confirm_close_all = create_rw_signal(false);
    let clock_now = create_rw_signal(TaskbarClockSnapshot::now());

    let bus = runtime.bus.get_value();
    let subscriptions = [
        bus.subscribe(DesktopTopic::VolumeChange, move |event| {
            if let DesktopEvent::VolumeChange { volume: next } = event {
                volume.set(*next);
            }
        }),
        bus.subscribe(DesktopTopic::MuteChange, move |event| {
            if let DesktopEvent::MuteChange { muted: next } = event {
                muted.set(*next);
            }
        }),
    ];
    on_cleanup(move || {
        for subscription in &subscriptions {
            bus.unsubscribe(subscription);
        }
    });

    match set_interval_with_handle(
        move || clock_now.set(TaskbarClockSnapshot::now()),
        Duration::from_secs(1),
    ) {
        Ok(interval) => on_cleanup(move || interval.clear()),
        Err(err) => logging::warn!("taskbar clock interval unavailable: {err:?}"),
    }

    let on_slider = move |ev: web_sys::Event| {
        let Ok(raw) = event_target_value(&ev).parse::<f64>() else {
            return;
        };
        for event in volume_change_events(clamp_volume_percent(raw), muted.get_untracked()) {
            runtime.publish(event);
        }
    };

    view! {
        <div class="taskbar-tray" role="group" aria-label="System tray">
            <button
                type="button"
                class="taskbar-close-all"
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    confirm_close_all.set(true);
                }
            >
                "Close All Windows"
            </button>

            <div class="taskbar-volume-wrap">
                <button
                    type="button"
                    class="taskbar-volume"
                    aria-haspopup="dialog"
                    aria-expanded=move || volume_open.get()
                    on:click=move |ev| {
                        stop_mouse_event(&ev);
                        volume_open.update(|open| *open = !*open);
                    }
                >
                    {move || {
                        if muted.get() {
                            "Muted".to_string()
                        } else {
                            format!("{}%", volume.get())
                        }
                    }}
                </button>
                <Show when=move || volume_open.get() fallback=|| ()>
                    <div class="taskbar-volume-popover" role="dialog" aria-label="Volume">
                        <input
                            type="range"
                            min="0"
                            max="100"
                            step="1"
                            aria-label="Volume"
                            prop:value=move || volume.get().to_string()
                            on:input=on_slider
                        />
                        <label class="taskbar-mute">
                            <input
                                type="checkbox"
                                prop:checked=move || muted.get()
                                on:change=move |_| {
                                    runtime.publish(DesktopEvent::MuteChange {
                                        muted: !muted.get_untracked(),
                                    });
                                }
                            />
                            "Mute"
                        </label>
                    </div>
                </Show>
            </div>

            <span class="taskbar-clock" aria-live="off">
                {move || format_taskbar_clock_time(clock_now.get())}
            </span>

            <Show when=move || confirm_close_all.get() fallback=|| ()>
                <div class="taskbar-confirm" role="alertdialog" aria-label="Close All Windows">
                    <p>{CLOSE_ALL_PROMPT}</p>
                    <div class="taskbar-confirm-actions">
                        <button
                            type="button"
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                confirm_close_all.set(false);
                            }
                        >
                            "Cancel"
                        </button>
                        <button
                            type="button"
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                confirm_close_all.set(false);
                                runtime.dispatch_action(DesktopAction::CloseAllWindows);
                            }
                        >
                            "OK"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
