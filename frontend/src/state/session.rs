//! Persisted identity: the active token and user, plus the original slot kept
//! while a super admin acts as a tenant administrator.

use std::rc::Rc;

use crate::api::{AuthResponse, User};
use crate::utils::storage::{KeyValueStore, MemoryStore, StorageError};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const ORIGINAL_TOKEN_KEY: &str = "original_token";
pub const ORIGINAL_USER_KEY: &str = "original_user";
pub const IMPERSONATING_KEY: &str = "isImpersonating";

#[derive(Debug, Clone, PartialEq)]
pub enum StoredUser {
    Missing,
    Valid(User),
    Malformed(String),
}

impl StoredUser {
    fn parse(raw: Option<String>) -> Self {
        match raw {
            None => StoredUser::Missing,
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => StoredUser::Valid(user),
                Err(err) => StoredUser::Malformed(err.to_string()),
            },
        }
    }

    pub fn into_user(self) -> Option<User> {
        match self {
            StoredUser::Valid(user) => Some(user),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpersonationState {
    Normal,
    Impersonating,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OriginalSession {
    pub token: String,
    pub user: StoredUser,
}

#[derive(Clone)]
pub struct SessionStore {
    cookies: Rc<dyn KeyValueStore>,
    local: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(cookies: Rc<dyn KeyValueStore>, local: Rc<dyn KeyValueStore>) -> Self {
        Self { cookies, local }
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::new()), Rc::new(MemoryStore::new()))
    }

    /// Cookie jar plus `localStorage`; falls back to memory for whichever one
    /// the browser refuses to hand out.
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        use crate::utils::storage::{BrowserCookies, BrowserLocalStorage};

        let cookies: Rc<dyn KeyValueStore> = match BrowserCookies::open() {
            Ok(jar) => Rc::new(jar),
            Err(err) => {
                log::warn!("cookie storage unavailable, using memory: {}", err);
                Rc::new(MemoryStore::new())
            }
        };
        let local: Rc<dyn KeyValueStore> = match BrowserLocalStorage::open() {
            Ok(storage) => Rc::new(storage),
            Err(err) => {
                log::warn!("local storage unavailable, using memory: {}", err);
                Rc::new(MemoryStore::new())
            }
        };
        Self::new(cookies, local)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn browser() -> Self {
        Self::in_memory()
    }

    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.cookies.set(TOKEN_KEY, token)?;
        self.local.set(TOKEN_KEY, token)
    }

    pub fn get_token(&self) -> Option<String> {
        non_empty(self.cookies.get(TOKEN_KEY)).or_else(|| non_empty(self.local.get(TOKEN_KEY)))
    }

    pub fn set_current_user(&self, user: &User) -> Result<(), StorageError> {
        self.local.set(USER_KEY, &user_json(user)?)
    }

    pub fn read_current_user(&self) -> StoredUser {
        StoredUser::parse(self.local.get(USER_KEY))
    }

    pub fn current_user(&self) -> Option<User> {
        match self.read_current_user() {
            StoredUser::Valid(user) => Some(user),
            StoredUser::Missing => None,
            StoredUser::Malformed(reason) => {
                log::warn!("ignoring malformed stored user: {}", reason);
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some() && self.current_user().is_some()
    }

    pub fn save_session(&self, response: &AuthResponse) -> Result<(), StorageError> {
        self.set_token(&response.token)?;
        self.set_current_user(&response.user)
    }

    pub fn impersonation_state(&self) -> ImpersonationState {
        let flagged = self.local.get(IMPERSONATING_KEY).as_deref() == Some("true");
        if flagged && self.original_token().is_some() {
            ImpersonationState::Impersonating
        } else {
            ImpersonationState::Normal
        }
    }

    /// True when half of the original slot survived without the other half.
    pub fn has_stale_original(&self) -> bool {
        self.impersonation_state() == ImpersonationState::Normal
            && (self.original_token().is_some() || self.local.get(IMPERSONATING_KEY).is_some())
    }

    fn original_token(&self) -> Option<String> {
        non_empty(self.local.get(ORIGINAL_TOKEN_KEY))
    }

    /// Saves the original identity unless one is already saved. Returns
    /// whether anything was written.
    pub fn save_original(&self, token: &str, user: Option<&User>) -> Result<bool, StorageError> {
        if self.original_token().is_some() {
            return Ok(false);
        }
        self.local.set(ORIGINAL_TOKEN_KEY, token)?;
        match user {
            Some(user) => self.local.set(ORIGINAL_USER_KEY, &user_json(user)?)?,
            None => self.local.remove(ORIGINAL_USER_KEY)?,
        }
        Ok(true)
    }

    pub fn original_session(&self) -> Option<OriginalSession> {
        let token = self.original_token()?;
        Some(OriginalSession {
            token,
            user: StoredUser::parse(self.local.get(ORIGINAL_USER_KEY)),
        })
    }

    pub fn mark_impersonating(&self) -> Result<(), StorageError> {
        self.local.set(IMPERSONATING_KEY, "true")
    }

    pub fn clear_original(&self) -> Result<(), StorageError> {
        self.local.remove(ORIGINAL_TOKEN_KEY)?;
        self.local.remove(ORIGINAL_USER_KEY)?;
        self.local.remove(IMPERSONATING_KEY)
    }

    /// Drops the active session. A saved original slot survives the clear.
    pub fn logout(&self) -> Result<(), StorageError> {
        let preserved = [ORIGINAL_TOKEN_KEY, ORIGINAL_USER_KEY, IMPERSONATING_KEY]
            .map(|key| (key, self.local.get(key)));
        let keep_original = self.original_token().is_some();

        self.cookies.remove(TOKEN_KEY)?;
        self.local.remove(TOKEN_KEY)?;
        self.local.clear()?;

        if keep_original {
            for (key, value) in preserved {
                if let Some(value) = value {
                    self.local.set(key, &value)?;
                }
            }
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn user_json(user: &User) -> Result<String, StorageError> {
    serde_json::to_string(user).map_err(|_| StorageError::Write {
        key: USER_KEY.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{admin_user, super_admin_user};

    fn split_store() -> (SessionStore, MemoryStore, MemoryStore) {
        let cookies = MemoryStore::new();
        let local = MemoryStore::new();
        let store = SessionStore::new(Rc::new(cookies.clone()), Rc::new(local.clone()));
        (store, cookies, local)
    }

    #[test]
    fn token_round_trips_through_cookie_alone() {
        let (store, _cookies, local) = split_store();
        store.set_token("A").unwrap();
        local.clear().unwrap();
        assert_eq!(store.get_token().as_deref(), Some("A"));
    }

    #[test]
    fn token_round_trips_through_local_storage_alone() {
        let (store, cookies, _local) = split_store();
        store.set_token("A").unwrap();
        cookies.clear().unwrap();
        assert_eq!(store.get_token().as_deref(), Some("A"));
    }

    #[test]
    fn cookie_wins_over_local_storage() {
        let (store, cookies, local) = split_store();
        cookies.set(TOKEN_KEY, "cookie").unwrap();
        local.set(TOKEN_KEY, "local").unwrap();
        assert_eq!(store.get_token().as_deref(), Some("cookie"));
    }

    #[test]
    fn get_token_is_none_when_nothing_stored() {
        let store = SessionStore::in_memory();
        assert!(store.get_token().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn malformed_user_reads_as_absent() {
        let (store, _cookies, local) = split_store();
        local.set(USER_KEY, "not json{").unwrap();
        assert!(matches!(store.read_current_user(), StoredUser::Malformed(_)));
        assert!(store.current_user().is_none());

        store.set_token("A").unwrap();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn authenticated_needs_token_and_user() {
        let store = SessionStore::in_memory();
        store.set_current_user(&admin_user(7)).unwrap();
        assert!(!store.is_authenticated());
        store.set_token("A").unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.current_user(), Some(admin_user(7)));
    }

    #[test]
    fn save_original_does_not_overwrite_existing_slot() {
        let store = SessionStore::in_memory();
        let sa = super_admin_user();
        assert!(store.save_original("A", Some(&sa)).unwrap());
        assert!(!store.save_original("B", Some(&admin_user(7))).unwrap());

        let original = store.original_session().unwrap();
        assert_eq!(original.token, "A");
        assert_eq!(original.user, StoredUser::Valid(sa));
    }

    #[test]
    fn impersonation_state_requires_flag_and_token() {
        let (store, _cookies, local) = split_store();
        assert_eq!(store.impersonation_state(), ImpersonationState::Normal);

        local.set(IMPERSONATING_KEY, "true").unwrap();
        assert_eq!(store.impersonation_state(), ImpersonationState::Normal);
        assert!(store.has_stale_original());

        store.save_original("A", None).unwrap();
        assert_eq!(store.impersonation_state(), ImpersonationState::Impersonating);
        assert!(!store.has_stale_original());

        store.clear_original().unwrap();
        assert_eq!(store.impersonation_state(), ImpersonationState::Normal);
        assert!(store.original_session().is_none());
        assert!(!store.has_stale_original());
    }

    #[test]
    fn logout_clears_active_session() {
        let (store, cookies, local) = split_store();
        store
            .save_session(&AuthResponse {
                token: "A".into(),
                user: super_admin_user(),
            })
            .unwrap();
        local.set("theme", "dark").unwrap();

        store.logout().unwrap();
        assert!(store.get_token().is_none());
        assert!(store.current_user().is_none());
        assert!(cookies.is_empty());
        assert!(local.is_empty());
    }

    #[test]
    fn logout_keeps_the_original_slot() {
        let store = SessionStore::in_memory();
        store.save_original("A", Some(&super_admin_user())).unwrap();
        store.mark_impersonating().unwrap();
        store
            .save_session(&AuthResponse {
                token: "B".into(),
                user: admin_user(7),
            })
            .unwrap();

        store.logout().unwrap();
        assert!(store.get_token().is_none());
        assert_eq!(store.impersonation_state(), ImpersonationState::Impersonating);
        assert_eq!(store.original_session().unwrap().token, "A");
    }
}
