//! Window registry transitions used by the desktop reducer.
//!
//! Every function here is total: operations that name an unknown window leave the state untouched
//! and report `false`.

use crate::activation::next_active_window;
use crate::config::WindowLayout;
use crate::model::{
    AppId, DesktopState, WindowId, WindowPosition, WindowRecord, WindowSize,
};

fn next_window_id(state: &mut DesktopState) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    id
}

fn find_window_mut(state: &mut DesktopState, window_id: WindowId) -> Option<&mut WindowRecord> {
    state.windows.iter_mut().find(|w| w.id == window_id)
}

fn set_exclusive_active(state: &mut DesktopState, active: Option<WindowId>) {
    for window in &mut state.windows {
        window.is_active = Some(window.id) == active;
    }
}

fn hand_off_activation(state: &mut DesktopState, unavailable: WindowId) {
    let next = next_active_window(&state.windows, unavailable);
    set_exclusive_active(state, next);
}

/// Appends a new active window at the cascade position and returns its id.
pub fn open_window(
    state: &mut DesktopState,
    layout: &WindowLayout,
    title: String,
    icon_ref: String,
) -> WindowId {
    let window_id = next_window_id(state);
    let position = layout.cascade_position(state.windows.len());
    set_exclusive_active(state, None);
    state.windows.push(WindowRecord {
        id: window_id,
        app_id: AppId::from_title(&title),
        title,
        icon_ref,
        position,
        size: layout.default_size(),
        is_active: true,
        is_minimized: false,
    });
    window_id
}

/// Removes a window. Closing the active window hands activation to the last remaining visible one.
pub fn close_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(index) = state.windows.iter().position(|w| w.id == window_id) else {
        return false;
    };
    let removed = state.windows.remove(index);
    if removed.is_active {
        hand_off_activation(state, window_id);
    }
    true
}

/// Minimizes a window, then hands activation to the last visible window that remains, whether or
/// not the target was the active one.
pub fn minimize_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(window) = find_window_mut(state, window_id) else {
        return false;
    };
    window.is_minimized = true;
    window.is_active = false;
    hand_off_activation(state, window_id);
    true
}

/// Makes `window_id` the only active window, un-minimizing it if needed.
pub fn activate_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(window) = find_window_mut(state, window_id) else {
        return false;
    };
    window.is_minimized = false;
    set_exclusive_active(state, Some(window_id));
    true
}

pub fn restore_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    activate_window(state, window_id)
}

/// Moves a window; coordinates are clamped to the non-negative quadrant.
pub fn move_window(state: &mut DesktopState, window_id: WindowId, position: WindowPosition) -> bool {
    let Some(window) = find_window_mut(state, window_id) else {
        return false;
    };
    window.position = position.clamped();
    true
}

pub fn resize_window(
    state: &mut DesktopState,
    layout: &WindowLayout,
    window_id: WindowId,
    size: WindowSize,
) -> bool {
    let Some(window) = find_window_mut(state, window_id) else {
        return false;
    };
    window.size = layout.clamp_size(size);
    true
}

/// Drops every window. The id counter keeps counting.
pub fn close_all_windows(state: &mut DesktopState) -> usize {
    let closed = state.windows.len();
    state.windows.clear();
    closed
}
