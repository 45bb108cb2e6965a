//! Lightweight key/value preference contracts and adapters.
//!
//! Preferences are raw strings keyed by name, mirroring the browser `localStorage` model. The
//! shell only keeps trivial flags here; anything richer belongs to the application that owns it.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use thiserror::Error;

/// Failure reported by a [`PrefsStore`] implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrefsError {
    /// The backing store does not exist on this host (private mode, non-browser target, ...).
    #[error("preference storage unavailable")]
    Unavailable,
    /// Reading a key failed.
    #[error("preference `{key}` could not be read: {reason}")]
    Read {
        /// Key being read.
        key: String,
        /// Host-provided failure description.
        reason: String,
    },
    /// Writing or deleting a key failed.
    #[error("preference `{key}` could not be written: {reason}")]
    Write {
        /// Key being written.
        key: String,
        /// Host-provided failure description.
        reason: String,
    },
}

/// Host service for lightweight preference values.
pub trait PrefsStore {
    /// Loads the raw value stored under `key`, if any.
    fn load_raw(&self, key: &str) -> Result<Option<String>, PrefsError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn save_raw(&self, key: &str, value: &str) -> Result<(), PrefsError>;

    /// Removes `key`. Removing a missing key succeeds.
    fn delete(&self, key: &str) -> Result<(), PrefsError>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op preference store for unsupported targets. Every key reads as absent.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_raw(&self, _key: &str) -> Result<Option<String>, PrefsError> {
        Ok(None)
    }

    fn save_raw(&self, _key: &str, _value: &str) -> Result<(), PrefsError> {
        Ok(())
    }

    fn delete(&self, _key: &str) -> Result<(), PrefsError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store. Clones share the same map.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` when no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, PrefsError> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save_raw(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), PrefsError> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn memory_store_saves_overwrites_and_deletes() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;

        store_obj.save_raw("sounds", "disabled").expect("save");
        store_obj.save_raw("sounds", "enabled").expect("overwrite");
        assert_eq!(
            store_obj.load_raw("sounds").expect("load"),
            Some("enabled".to_string())
        );
        assert_eq!(store.len(), 1);

        store_obj.delete("sounds").expect("delete");
        assert_eq!(store_obj.load_raw("sounds").expect("load"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn memory_store_clones_share_state() {
        let store = MemoryPrefsStore::default();
        let clone = store.clone();

        clone.save_raw("k", "v").expect("save through clone");

        assert_eq!(store.load_raw("k").expect("load"), Some("v".to_string()));
    }

    #[test]
    fn deleting_missing_key_succeeds() {
        let store = MemoryPrefsStore::default();
        store.delete("never-written").expect("delete missing");
    }

    #[test]
    fn noop_store_reads_nothing_and_accepts_writes() {
        let store = NoopPrefsStore;
        store.save_raw("k", "v").expect("save");
        assert_eq!(store.load_raw("k").expect("load"), None);
        store.delete("k").expect("delete");
    }

    #[test]
    fn errors_render_key_and_reason() {
        let err = PrefsError::Write {
            key: "windowsXpSounds".to_string(),
            reason: "quota exceeded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "preference `windowsXpSounds` could not be written: quota exceeded"
        );
    }
}
