//! # Browser local storage
//!
//! [`LocalStore`] is the [`KeyValueStore`] used on the web platform. It reads
//! `window.localStorage` on every call instead of caching a handle, since
//! `web_sys::Storage` is not `Send` and the lookup is cheap.
//!
//! Storage can be unavailable (private browsing, disabled by policy). Every
//! method treats that as an empty store.

use crate::kv::KeyValueStore;

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
