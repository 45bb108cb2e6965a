#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

use crate::model::WindowId;

/// Builds the deferred focus job for `window_id`. The element id is only resolved when the job runs.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn focus_job(window_id: WindowId, focus_by_id: impl FnOnce(&str)) -> impl FnOnce() {
    move || focus_by_id(&window_id.dom_id())
}

/// Focuses the window surface element on the next macrotask, after the view has rendered.
pub(super) fn focus_window_surface(window_id: WindowId) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let job = focus_job(window_id, |dom_id| {
            let Some(element) = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(dom_id))
            else {
                return;
            };
            if let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() {
                let _ = element.focus();
            }
        });
        let callback = Closure::once_into_js(job);
        let _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = window_id;
}
