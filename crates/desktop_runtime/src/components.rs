//! Desktop shell UI composition and interaction surfaces.

mod menus;
mod session;
mod taskbar;
mod window;

use std::time::Duration;

use leptos::*;

use self::{
    menus::{DesktopContextMenu, StartMenu},
    session::SessionScreen,
    taskbar::Taskbar,
    window::DesktopWindow,
};

use crate::{
    config::{AppEntry, LauncherSection},
    event_bus::{DesktopEvent, DesktopTopic},
    model::{OpenWindowRequest, PointerPosition, WindowId, WindowRecord},
    reducer::DesktopAction,
    sound::SoundKind,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

const TASKBAR_HEIGHT_PX: i32 = 30;
const WINDOWS_LOGO_ICON: &str = "/images/1e1aaff4-1c6b-4e96-abd5-1b10acf84ef4.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DesktopContextMenuState {
    x: i32,
    y: i32,
}

fn taskbar_window_button_dom_id(window_id: WindowId) -> String {
    format!("taskbar-window-button-{}", window_id.0)
}

fn open_request_for(app: &AppEntry) -> OpenWindowRequest {
    OpenWindowRequest::new(app.title.clone()).with_icon(app.icon_ref.clone())
}

#[component]
/// Top-level shell: session screens while booting or shutting down, the desktop while running.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();

    view! {
        <Show
            when=move || runtime.session.get().desktop_mounted()
            fallback=|| view! { <SessionScreen /> }
        >
            <Desktop />
        </Show>
    }
}

#[component]
fn Desktop() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let desktop_context_menu = create_rw_signal(None::<DesktopContextMenuState>);
    let desktop_icons: Vec<AppEntry> = runtime
        .config
        .with_value(|config| config.desktop_icons().cloned().collect());

    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() || ev.key() != "Escape" {
            return;
        }
        if desktop_context_menu.get_untracked().is_some() {
            ev.prevent_default();
            desktop_context_menu.set(None);
        }
        if state.with_untracked(|desktop| desktop.start_menu_open) {
            ev.prevent_default();
            runtime.dispatch_action(DesktopAction::CloseStartMenu);
        }
    });
    on_cleanup(move || escape_listener.remove());

    view! {
        <div id="desktop-shell-root" class="desktop-shell" tabindex="-1">
            <div
                class="desktop-backdrop"
                aria-hidden="true"
                on:mousedown=move |_| {
                    desktop_context_menu.set(None);
                    if state.with_untracked(|desktop| desktop.start_menu_open) {
                        runtime.dispatch_action(DesktopAction::CloseStartMenu);
                    }
                }
                on:contextmenu=move |ev: web_sys::MouseEvent| {
                    stop_mouse_event(&ev);
                    runtime.dispatch_action(DesktopAction::CloseStartMenu);
                    desktop_context_menu.set(Some(DesktopContextMenuState {
                        x: ev.client_x(),
                        y: ev.client_y(),
                    }));
                }
            ></div>

            <ul class="desktop-icon-grid" aria-label="Desktop">
                {desktop_icons
                    .into_iter()
                    .map(|app| {
                        let request = open_request_for(&app);
                        view! {
                            <li>
                                <button
                                    type="button"
                                    class="desktop-icon"
                                    on:click=move |ev| {
                                        stop_mouse_event(&ev);
                                        desktop_context_menu.set(None);
                                        runtime.publish(DesktopEvent::OpenWindow(request.clone()));
                                    }
                                >
                                    <img src=app.icon_ref alt="" width="32" height="32" />
                                    <span>{app.title}</span>
                                </button>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>

            <div class="desktop-window-layer">
                <For
                    each=move || {
                        state.with(|desktop| {
                            desktop.visible_windows().map(|win| win.id).collect::<Vec<_>>()
                        })
                    }
                    key=|window_id| window_id.0
                    let:window_id
                >
                    <DesktopWindow window_id />
                </For>
            </div>

            <DesktopContextMenu runtime desktop_context_menu />
            <StartMenu runtime />
            <Taskbar />
        </div>
    }
}

/// Inline style placing a window surface. Maximized windows fill the area above the taskbar.
fn window_surface_style(win: &WindowRecord, z_index: u32, maximized: bool) -> String {
    if maximized {
        format!(
            "left:0;top:0;width:100%;height:calc(100% - {TASKBAR_HEIGHT_PX}px);z-index:{z_index};"
        )
    } else {
        format!(
            "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{z_index};",
            win.position.x, win.position.y, win.size.width, win.size.height
        )
    }
}

/// Events published when the tray slider moves to `volume`.
///
/// Dragging to zero also mutes; dragging up from zero while muted unmutes.
fn volume_change_events(volume: u8, muted: bool) -> Vec<DesktopEvent> {
    let mut events = vec![DesktopEvent::VolumeChange { volume }];
    if volume == 0 && !muted {
        events.push(DesktopEvent::MuteChange { muted: true });
    } else if volume > 0 && muted {
        events.push(DesktopEvent::MuteChange { muted: false });
    }
    events
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TaskbarClockSnapshot {
    hour: u32,
    minute: u32,
}

impl TaskbarClockSnapshot {
    fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            return Self {
                hour: date.get_hours(),
                minute: date.get_minutes(),
            };
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self { hour: 0, minute: 0 }
        }
    }
}

fn format_taskbar_clock_time(snapshot: TaskbarClockSnapshot) -> String {
    let mut hour = snapshot.hour % 12;
    if hour == 0 {
        hour = 12;
    }
    let suffix = if snapshot.hour >= 12 { "PM" } else { "AM" };
    format!("{}:{:02} {}", hour, snapshot.minute, suffix)
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}
