//! Browser desktop shell: a window registry driven by a pure reducer, a session lifecycle, a
//! desktop-wide event bus, and the Leptos components that render them.

pub mod activation;
pub mod apps;
pub mod boot;
pub mod components;
pub mod config;
pub mod event_bus;
pub mod gesture;
pub mod model;
pub mod reducer;
pub mod sound;
pub mod window_manager;

mod effect_executor;
mod host;
mod runtime_context;

pub use components::{DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
