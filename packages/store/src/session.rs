//! # Session identity
//!
//! Every backend call carries two headers that identify the browser and the
//! signed-in account. [`Session`] owns those values and the storage they
//! persist in, so callers never read storage keys directly.
//!
//! | Key | Set by | Cleared by |
//! |-----|--------|------------|
//! | [`DEVICE_ID_KEY`] | [`Session::init`] (random UUID v4, once per device) | never |
//! | [`USERNAME_KEY`] | [`Session::set_username`] after sign-in or sign-up | [`Session::clear`] |
//!
//! The device id survives sign-out so the backend keeps recognising the
//! device across accounts.

use crate::kv::KeyValueStore;

pub const DEVICE_ID_KEY: &str = "X-GatorPool-Device-Id";
pub const USERNAME_KEY: &str = "X-GatorPool-Username";

/// Snapshot of the identity headers. Empty strings mean "not set".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionInfo {
    pub device_id: String,
    pub username: String,
}

impl SessionInfo {
    pub fn is_signed_in(&self) -> bool {
        !self.username.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Session<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Ensure a device id exists, generating one on first use.
    pub fn init(&self) -> SessionInfo {
        let has_device = self
            .store
            .get(DEVICE_ID_KEY)
            .is_some_and(|id| !id.is_empty());
        if !has_device {
            self.store
                .set(DEVICE_ID_KEY, &uuid::Uuid::new_v4().to_string());
        }
        self.current()
    }

    pub fn current(&self) -> SessionInfo {
        SessionInfo {
            device_id: self.store.get(DEVICE_ID_KEY).unwrap_or_default(),
            username: self.store.get(USERNAME_KEY).unwrap_or_default(),
        }
    }

    pub fn set_username(&self, username: &str) {
        self.store.set(USERNAME_KEY, username.trim());
    }

    /// Forget the signed-in account. The device id is kept.
    pub fn clear(&self) {
        self.store.remove(USERNAME_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_init_generates_device_id_once() {
        let store = MemoryStore::new();
        let session = Session::new(store.clone());

        let first = session.init();
        assert_eq!(first.device_id.len(), 36);
        assert!(first.username.is_empty());

        let second = session.init();
        assert_eq!(first.device_id, second.device_id);
        assert_eq!(store.get(DEVICE_ID_KEY), Some(first.device_id));
    }

    #[test]
    fn test_init_keeps_existing_device_id() {
        let store = MemoryStore::new();
        store.set(DEVICE_ID_KEY, "existing-device");
        let session = Session::new(store);
        assert_eq!(session.init().device_id, "existing-device");
    }

    #[test]
    fn test_clear_removes_username_only() {
        let session = Session::new(MemoryStore::new());
        let info = session.init();
        session.set_username("  albert@ufl.edu ");
        assert_eq!(session.current().username, "albert@ufl.edu");
        assert!(session.current().is_signed_in());

        session.clear();
        let after = session.current();
        assert!(!after.is_signed_in());
        assert_eq!(after.device_id, info.device_id);
    }
}
