//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use leptos::logging;

use crate::config::DesktopConfig;
use crate::model::{
    DesktopState, OpenWindowRequest, WindowId, WindowPosition, WindowSize, DEFAULT_ICON_REF,
};
use crate::window_manager;

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a new window using the supplied request.
    OpenWindow(OpenWindowRequest),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Restore a minimized window and make it active.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Make a window the single active window.
    ActivateWindow {
        /// Window to activate.
        window_id: WindowId,
    },
    /// Move a window to an absolute desktop position.
    MoveWindow {
        /// Window being dragged.
        window_id: WindowId,
        /// Requested top-left corner before clamping.
        position: WindowPosition,
    },
    /// Resize a window from its bottom-right corner.
    ResizeWindow {
        /// Window being resized.
        window_id: WindowId,
        /// Requested size before clamping.
        size: WindowSize,
    },
    /// Close every window at once.
    CloseAllWindows,
    /// Taskbar button press: restore when minimized, otherwise activate.
    SelectTaskbarWindow {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu if open.
    CloseStartMenu,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Move keyboard focus onto a window surface after it became active.
    FocusWindow(WindowId),
}

fn ignore_unknown(operation: &str, window_id: WindowId) {
    logging::log!("ignoring {operation} for unknown window {}", window_id.0);
}

/// Applies `action` to `state` and returns the effects the shell should run.
///
/// Unknown window ids are ignored.
pub fn reduce_desktop(
    state: &mut DesktopState,
    config: &DesktopConfig,
    action: DesktopAction,
) -> Vec<RuntimeEffect> {
    let previous_active = state.active_window_id();
    let mut effects = Vec::new();

    match action {
        DesktopAction::OpenWindow(req) => {
            let icon_ref = req
                .icon_ref
                .or_else(|| config.icon_for(&req.title).map(str::to_string))
                .unwrap_or_else(|| DEFAULT_ICON_REF.to_string());
            window_manager::open_window(state, &config.window, req.title, icon_ref);
            state.start_menu_open = false;
        }
        DesktopAction::CloseWindow { window_id } => {
            if !window_manager::close_window(state, window_id) {
                ignore_unknown("close", window_id);
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            if !window_manager::minimize_window(state, window_id) {
                ignore_unknown("minimize", window_id);
            }
        }
        DesktopAction::RestoreWindow { window_id } => {
            if !window_manager::restore_window(state, window_id) {
                ignore_unknown("restore", window_id);
            }
        }
        DesktopAction::ActivateWindow { window_id } => {
            if !window_manager::activate_window(state, window_id) {
                ignore_unknown("activate", window_id);
            }
        }
        DesktopAction::MoveWindow {
            window_id,
            position,
        } => {
            if !window_manager::move_window(state, window_id, position) {
                ignore_unknown("move", window_id);
            }
        }
        DesktopAction::ResizeWindow { window_id, size } => {
            if !window_manager::resize_window(state, &config.window, window_id, size) {
                ignore_unknown("resize", window_id);
            }
        }
        DesktopAction::CloseAllWindows => {
            window_manager::close_all_windows(state);
        }
        DesktopAction::SelectTaskbarWindow { window_id } => {
            match state.window(window_id).map(|w| w.is_minimized) {
                Some(true) => {
                    window_manager::restore_window(state, window_id);
                }
                Some(false) => {
                    window_manager::activate_window(state, window_id);
                }
                None => ignore_unknown("taskbar select", window_id),
            }
            state.start_menu_open = false;
        }
        DesktopAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
        }
        DesktopAction::CloseStartMenu => {
            state.start_menu_open = false;
        }
    }

    let active = state.active_window_id();
    if active != previous_active {
        if let Some(window_id) = active {
            effects.push(RuntimeEffect::FocusWindow(window_id));
        }
    }

    effects
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::AppId;

    fn config() -> DesktopConfig {
        DesktopConfig::builtin().expect("embedded config")
    }

    fn open(state: &mut DesktopState, config: &DesktopConfig, title: &str) -> WindowId {
        reduce_desktop(
            state,
            config,
            DesktopAction::OpenWindow(OpenWindowRequest::new(title)),
        );
        state.windows.last().expect("opened window").id
    }

    #[test]
    fn open_fills_icon_from_catalog_then_default() {
        let config = config();
        let mut state = DesktopState::default();
        open(&mut state, &config, "Calculator");
        open(&mut state, &config, "Solitaire");
        reduce_desktop(
            &mut state,
            &config,
            DesktopAction::OpenWindow(OpenWindowRequest::new("Notepad").with_icon("/custom.png")),
        );

        assert_eq!(state.windows[0].icon_ref, "/images/calculator-icon.png");
        assert_eq!(state.windows[1].icon_ref, DEFAULT_ICON_REF);
        assert_eq!(state.windows[1].app_id, AppId::Generic);
        assert_eq!(state.windows[2].icon_ref, "/custom.png");
    }

    #[test]
    fn open_emits_focus_for_new_window_and_closes_start_menu() {
        let config = config();
        let mut state = DesktopState::default();
        reduce_desktop(&mut state, &config, DesktopAction::ToggleStartMenu);
        assert!(state.start_menu_open);

        let effects = reduce_desktop(
            &mut state,
            &config,
            DesktopAction::OpenWindow(OpenWindowRequest::new("Notepad")),
        );
        assert_eq!(effects, vec![RuntimeEffect::FocusWindow(WindowId(1))]);
        assert!(!state.start_menu_open);
    }

    #[test]
    fn taskbar_select_restores_minimized_or_activates() {
        let config = config();
        let mut state = DesktopState::default();
        let a = open(&mut state, &config, "A");
        let b = open(&mut state, &config, "B");

        reduce_desktop(&mut state, &config, DesktopAction::MinimizeWindow { window_id: a });
        assert!(state.window(a).expect("a").is_minimized);
        assert_eq!(state.active_window_id(), Some(b));

        let effects = reduce_desktop(
            &mut state,
            &config,
            DesktopAction::SelectTaskbarWindow { window_id: a },
        );
        assert_eq!(effects, vec![RuntimeEffect::FocusWindow(a)]);
        assert!(!state.window(a).expect("a").is_minimized);
        assert_eq!(state.active_window_id(), Some(a));

        let effects = reduce_desktop(
            &mut state,
            &config,
            DesktopAction::SelectTaskbarWindow { window_id: b },
        );
        assert_eq!(effects, vec![RuntimeEffect::FocusWindow(b)]);
    }

    #[test]
    fn reactivating_the_active_window_emits_nothing() {
        let config = config();
        let mut state = DesktopState::default();
        let a = open(&mut state, &config, "A");
        let effects = reduce_desktop(
            &mut state,
            &config,
            DesktopAction::ActivateWindow { window_id: a },
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn unknown_window_ids_are_ignored() {
        let config = config();
        let mut state = DesktopState::default();
        open(&mut state, &config, "A");
        let before = state.clone();
        for action in [
            DesktopAction::CloseWindow {
                window_id: WindowId(42),
            },
            DesktopAction::MinimizeWindow {
                window_id: WindowId(42),
            },
            DesktopAction::RestoreWindow {
                window_id: WindowId(42),
            },
            DesktopAction::SelectTaskbarWindow {
                window_id: WindowId(42),
            },
            DesktopAction::MoveWindow {
                window_id: WindowId(42),
                position: WindowPosition { x: 5, y: 5 },
            },
        ] {
            assert!(reduce_desktop(&mut state, &config, action).is_empty());
        }
        assert_eq!(state, before);
    }

    #[test]
    fn close_all_then_open_starts_cascade_over() {
        let config = config();
        let mut state = DesktopState::default();
        open(&mut state, &config, "A");
        open(&mut state, &config, "B");
        let effects = reduce_desktop(&mut state, &config, DesktopAction::CloseAllWindows);
        assert!(effects.is_empty());
        assert!(state.windows.is_empty());

        let c = open(&mut state, &config, "C");
        assert_eq!(c, WindowId(3));
        assert_eq!(state.windows[0].position, WindowPosition { x: 100, y: 100 });
    }

    #[test]
    fn resize_is_clamped_to_configured_minimum() {
        let config = config();
        let mut state = DesktopState::default();
        let a = open(&mut state, &config, "A");
        reduce_desktop(
            &mut state,
            &config,
            DesktopAction::ResizeWindow {
                window_id: a,
                size: WindowSize {
                    width: 10,
                    height: 900,
                },
            },
        );
        assert_eq!(
            state.window(a).expect("a").size,
            WindowSize {
                width: 300,
                height: 900
            }
        );
    }
}
