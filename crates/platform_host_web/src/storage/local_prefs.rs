//! `localStorage`-backed preference store implementation.

use platform_host::{PrefsError, PrefsStore};

#[derive(Debug, Clone, Copy, Default)]
/// Browser preference store backed by `window.localStorage`.
///
/// On non-wasm targets every key reads as absent and writes are discarded.
pub struct WebPrefsStore;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, PrefsError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(PrefsError::Unavailable)
}

impl PrefsStore for WebPrefsStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, PrefsError> {
        #[cfg(target_arch = "wasm32")]
        {
            return local_storage()?
                .get_item(key)
                .map_err(|err| PrefsError::Read {
                    key: key.to_string(),
                    reason: format!("{err:?}"),
                });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn save_raw(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        #[cfg(target_arch = "wasm32")]
        {
            return local_storage()?
                .set_item(key, value)
                .map_err(|err| PrefsError::Write {
                    key: key.to_string(),
                    reason: format!("localStorage set_item failed: {err:?}"),
                });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }

    fn delete(&self, key: &str) -> Result<(), PrefsError> {
        #[cfg(target_arch = "wasm32")]
        {
            return local_storage()?
                .remove_item(key)
                .map_err(|err| PrefsError::Write {
                    key: key.to_string(),
                    reason: format!("localStorage remove_item failed: {err:?}"),
                });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}
