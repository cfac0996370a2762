use crate::models::{Identity, Session};
use serde::{Deserialize, Serialize};
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

pub(crate) const TOKEN_KEY: &str = "token";
pub(crate) const USER_KEY: &str = "user";

/// Durable key/value store for the persisted session.
pub(crate) trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// `window.localStorage`. Every operation is best-effort: an unavailable
/// storage behaves as empty.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SessionStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage write failed for {key}");
            }
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            if storage.remove_item(key).is_err() {
                log::warn!("localStorage remove failed for {key}");
            }
        }
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

#[cfg(test)]
impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

pub(crate) fn load_json<S, T>(storage: &S, key: &str) -> Option<T>
where
    S: SessionStorage + ?Sized,
    T: for<'de> Deserialize<'de>,
{
    let json = storage.get_item(key)?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json<S, T>(storage: &S, key: &str, value: &T)
where
    S: SessionStorage + ?Sized,
    T: Serialize,
{
    match serde_json::to_string(value) {
        Ok(json) => storage.set_item(key, &json),
        Err(e) => log::error!("failed to serialize {key}: {e}"),
    }
}

/// Reads the persisted token + identity. Anything partial or invalid reads as `None`.
pub(crate) fn load_session<S: SessionStorage + ?Sized>(storage: &S) -> Option<Session> {
    let token = storage.get_item(TOKEN_KEY)?;
    let identity: Identity = load_json(storage, USER_KEY)?;
    Session::new(identity, token)
}

pub(crate) fn save_session<S: SessionStorage + ?Sized>(storage: &S, session: &Session) {
    storage.set_item(TOKEN_KEY, session.token());
    save_json(storage, USER_KEY, session.identity());
}

pub(crate) fn clear_session<S: SessionStorage + ?Sized>(storage: &S) {
    storage.remove_item(TOKEN_KEY);
    storage.remove_item(USER_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn alice() -> Session {
        Session::new(
            Identity {
                username: "alice".to_string(),
                role: Role::User,
            },
            "tok-1".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_session_roundtrip() {
        let storage = MemoryStorage::default();
        save_session(&storage, &alice());

        assert_eq!(storage.get_item(TOKEN_KEY).as_deref(), Some("tok-1"));
        assert_eq!(load_session(&storage), Some(alice()));
    }

    #[test]
    fn test_identity_is_stored_as_json() {
        let storage = MemoryStorage::default();
        save_session(&storage, &alice());

        let raw = storage.get_item(USER_KEY).unwrap();
        let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(v["username"], "alice");
        assert_eq!(v["role"], "user");
    }

    #[test]
    fn test_partial_session_is_absent() {
        let storage = MemoryStorage::default();
        storage.set_item(TOKEN_KEY, "tok-1");
        assert!(load_session(&storage).is_none());

        let storage = MemoryStorage::default();
        storage.set_item(USER_KEY, r#"{"username":"alice","role":"user"}"#);
        assert!(load_session(&storage).is_none());
    }

    #[test]
    fn test_corrupt_identity_is_absent() {
        let storage = MemoryStorage::default();
        storage.set_item(TOKEN_KEY, "tok-1");
        storage.set_item(USER_KEY, "not json");
        assert!(load_session(&storage).is_none());
    }

    #[test]
    fn test_admin_identity_survives_reload() {
        let storage = MemoryStorage::default();
        let admin = Session::new(
            Identity {
                username: "root".to_string(),
                role: Role::Admin,
            },
            "tok-root".to_string(),
        )
        .unwrap();
        save_session(&storage, &admin);

        let loaded = load_session(&storage).expect("admin session should load");
        assert!(loaded.identity().is_admin());
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let storage = MemoryStorage::default();
        save_session(&storage, &alice());
        clear_session(&storage);

        assert!(storage.get_item(TOKEN_KEY).is_none());
        assert!(storage.get_item(USER_KEY).is_none());
    }
}
