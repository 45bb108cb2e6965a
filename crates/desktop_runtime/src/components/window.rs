use leptos::leptos_dom::helpers::WindowListenerHandle;

use super::*;
use crate::{
    apps::{mount_app, AppMountContext},
    gesture::{DragGesture, ResizeGesture},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowControl {
    Minimize,
    Close,
}

/// Actions a chrome button press dispatches, in order. A background window is activated first.
fn control_actions(
    window_id: WindowId,
    control: WindowControl,
    is_active: bool,
) -> Vec<DesktopAction> {
    let mut actions = Vec::with_capacity(2);
    if !is_active {
        actions.push(DesktopAction::ActivateWindow { window_id });
    }
    actions.push(match control {
        WindowControl::Minimize => DesktopAction::MinimizeWindow { window_id },
        WindowControl::Close => DesktopAction::CloseWindow { window_id },
    });
    actions
}

/// Window-level listeners that live for the duration of one drag or resize.
struct GestureListeners {
    moving: WindowListenerHandle,
    release: WindowListenerHandle,
}

impl GestureListeners {
    fn remove(self) {
        self.moving.remove();
        self.release.remove();
    }
}

fn end_gesture(slot: StoredValue<Option<GestureListeners>>) {
    if let Some(Some(listeners)) = slot.try_update_value(Option::take) {
        listeners.remove();
    }
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let window = create_memo(move |_| state.with(|desktop| desktop.window(window_id).cloned()));
    let layout = runtime.config.with_value(|config| config.window);
    let maximized = create_rw_signal(false);
    let drag = store_value(None::<GestureListeners>);
    let resize = store_value(None::<GestureListeners>);

    runtime.play_sound(SoundKind::WindowOpen);
    on_cleanup(move || {
        end_gesture(drag);
        end_gesture(resize);
        runtime.play_sound(SoundKind::WindowClose);
    });

    let activate = move || {
        if state.with_untracked(|desktop| desktop.start_menu_open) {
            runtime.dispatch_action(DesktopAction::CloseStartMenu);
        }
        let inactive = window.with_untracked(|win| win.as_ref().is_some_and(|win| !win.is_active));
        if inactive {
            runtime.dispatch_action(DesktopAction::ActivateWindow { window_id });
        }
    };

    let begin_move = move |event: web_sys::PointerEvent| {
        if event.button() != 0 || maximized.get_untracked() {
            return;
        }
        let Some(origin) = window.with_untracked(|win| win.as_ref().map(|win| win.position)) else {
            return;
        };
        event.prevent_default();
        activate();
        end_gesture(drag);

        let gesture = DragGesture::begin(window_id, pointer_from_pointer_event(&event), origin);
        let moving = window_event_listener(ev::pointermove, move |event| {
            runtime.dispatch_action(DesktopAction::MoveWindow {
                window_id,
                position: gesture.position_at(pointer_from_pointer_event(&event)),
            });
        });
        let release = window_event_listener(ev::pointerup, move |_| end_gesture(drag));
        drag.set_value(Some(GestureListeners { moving, release }));
    };

    let begin_resize = move |event: web_sys::PointerEvent| {
        if event.button() != 0 || maximized.get_untracked() {
            return;
        }
        let Some(origin) = window.with_untracked(|win| win.as_ref().map(|win| win.size)) else {
            return;
        };
        event.prevent_default();
        event.stop_propagation();
        activate();
        end_gesture(resize);

        let gesture = ResizeGesture::begin(window_id, pointer_from_pointer_event(&event), origin);
        let moving = window_event_listener(ev::pointermove, move |event| {
            runtime.dispatch_action(DesktopAction::ResizeWindow {
                window_id,
                size: gesture.size_at(pointer_from_pointer_event(&event)),
            });
        });
        let release = window_event_listener(ev::pointerup, move |_| end_gesture(resize));
        resize.set_value(Some(GestureListeners { moving, release }));
    };

    let press_control = move |control: WindowControl| {
        if state.with_untracked(|desktop| desktop.start_menu_open) {
            runtime.dispatch_action(DesktopAction::CloseStartMenu);
        }
        let is_active = window.with_untracked(|win| win.as_ref().is_some_and(|win| win.is_active));
        for action in control_actions(window_id, control, is_active) {
            runtime.dispatch_action(action);
        }
    };

    let toggle_maximize = move || {
        end_gesture(drag);
        end_gesture(resize);
        maximized.update(|maximized| *maximized = !*maximized);
    };

    let (title, icon_ref, app_id) = window
        .get_untracked()
        .map(|win| (win.title, win.icon_ref, Some(win.app_id)))
        .unwrap_or_default();
    let body = app_id.map(|app_id| {
        mount_app(
            app_id,
            AppMountContext {
                window_id,
                title: title.clone(),
                on_close: Callback::new(move |_| {
                    runtime.dispatch_action(DesktopAction::CloseWindow { window_id })
                }),
                bus: runtime.bus.get_value(),
            },
        )
    });

    let aria_label = title.clone();

    view! {
        <section
            id=window_id.dom_id()
            class=move || {
                let mut class = String::from("desktop-window");
                if window.with(|win| win.as_ref().is_some_and(|win| win.is_active)) {
                    class.push_str(" active");
                }
                if maximized.get() {
                    class.push_str(" maximized");
                }
                class
            }
            style=move || {
                window.with(|win| {
                    win.as_ref()
                        .map(|win| {
                            window_surface_style(win, layout.z_index(win.is_active), maximized.get())
                        })
                        .unwrap_or_default()
                })
            }
            tabindex="-1"
            role="dialog"
            aria-label=aria_label
            on:pointerdown=move |_| activate()
        >
            <header
                class="window-titlebar"
                on:pointerdown=begin_move
                on:dblclick=move |_| toggle_maximize()
            >
                <img class="window-icon" src=icon_ref alt="" width="16" height="16" />
                <span class="window-title">{title}</span>
                <div class="window-controls">
                    <button
                        type="button"
                        class="window-control window-control-minimize"
                        aria-label="Minimize"
                        on:pointerdown=|ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            press_control(WindowControl::Minimize);
                        }
                    ></button>
                    <button
                        type="button"
                        class="window-control window-control-maximize"
                        aria-label=move || if maximized.get() { "Restore" } else { "Maximize" }
                        on:pointerdown=|ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            activate();
                            toggle_maximize();
                        }
                    ></button>
                    <button
                        type="button"
                        class="window-control window-control-close"
                        aria-label="Close"
                        on:pointerdown=|ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            press_control(WindowControl::Close);
                        }
                    ></button>
                </div>
            </header>
            <div class="window-body">{body}</div>
            <Show when=move || !maximized.get() fallback=|| ()>
                <div
                    class="window-resize-handle"
                    aria-hidden="true"
                    on:pointerdown=begin_resize
                ></div>
            </Show>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{config::DesktopConfig, model::DesktopState, reducer::reduce_desktop};

    fn open_three() -> (DesktopConfig, DesktopState, [WindowId; 3]) {
        let config = DesktopConfig::builtin().expect("embedded config");
        let mut state = DesktopState::default();
        let ids = ["A", "B", "C"].map(|title| {
            reduce_desktop(
                &mut state,
                &config,
                DesktopAction::OpenWindow(OpenWindowRequest::new(title)),
            );
            state.windows.last().expect("opened").id
        });
        (config, state, ids)
    }

    #[test]
    fn background_window_controls_activate_before_acting() {
        let [_, b, _] = open_three().2;
        assert_eq!(
            control_actions(b, WindowControl::Minimize, false),
            vec![
                DesktopAction::ActivateWindow { window_id: b },
                DesktopAction::MinimizeWindow { window_id: b },
            ]
        );
        assert_eq!(
            control_actions(b, WindowControl::Close, true),
            vec![DesktopAction::CloseWindow { window_id: b }]
        );
    }

    #[test]
    fn minimizing_a_background_window_hands_focus_to_the_last_survivor() {
        let (config, mut state, [a, b, c]) = open_three();
        reduce_desktop(&mut state, &config, DesktopAction::ActivateWindow { window_id: a });

        let is_active = state.window(b).expect("b").is_active;
        for action in control_actions(b, WindowControl::Minimize, is_active) {
            reduce_desktop(&mut state, &config, action);
        }
        assert!(state.window(b).expect("b").is_minimized);
        assert_eq!(state.active_window_id(), Some(c));
    }
}
