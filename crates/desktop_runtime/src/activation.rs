//! Successor selection when the active window closes or minimizes.

use crate::model::{WindowId, WindowRecord};

/// Picks the window that should become active once `unavailable` stops being eligible.
///
/// The choice is the last non-minimized window in opening order other than `unavailable`.
/// Focus history is not consulted, so the most recently *opened* survivor wins.
pub fn next_active_window(windows: &[WindowRecord], unavailable: WindowId) -> Option<WindowId> {
    windows
        .iter()
        .rev()
        .find(|w| w.id != unavailable && !w.is_minimized)
        .map(|w| w.id)
}
