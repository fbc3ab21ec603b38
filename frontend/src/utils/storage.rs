use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use thiserror::Error;

/// Seconds a session cookie stays valid.
pub const COOKIE_MAX_AGE_SECS: u32 = 60 * 60 * 24;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("{0} is not available")]
    Unavailable(&'static str),
    #[error("failed to write `{key}`")]
    Write { key: String },
    #[error("failed to remove `{key}`")]
    Remove { key: String },
    #[error("failed to clear storage")]
    Clear,
}

/// String key/value persistence shared by the cookie jar and local storage.
///
/// Reads never fail: an unreadable entry is reported as absent.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.entries.borrow_mut().clear();
        Ok(())
    }
}

pub fn format_cookie(name: &str, value: &str, max_age_secs: u32) -> String {
    format!(
        "{}={}; path=/; max-age={}; SameSite=Lax",
        name,
        utf8_percent_encode(value, NON_ALPHANUMERIC),
        max_age_secs
    )
}

/// Looks up `name` in a `document.cookie` style string.
pub fn parse_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| percent_decode_str(value).decode_utf8().ok())
        .map(|value| value.into_owned())
}

pub fn cookie_names(header: &str) -> Vec<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .map(|(key, _)| key.to_string())
        .filter(|key| !key.is_empty())
        .collect()
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{
        cookie_names, format_cookie, parse_cookie, KeyValueStore, StorageError,
        COOKIE_MAX_AGE_SECS,
    };
    use wasm_bindgen::JsCast;
    use web_sys::{HtmlDocument, Storage, Window};

    fn window() -> Result<Window, StorageError> {
        web_sys::window().ok_or(StorageError::Unavailable("window"))
    }

    fn local_storage() -> Result<Storage, StorageError> {
        window()?
            .local_storage()
            .map_err(|_| StorageError::Unavailable("localStorage"))?
            .ok_or(StorageError::Unavailable("localStorage"))
    }

    fn html_document() -> Result<HtmlDocument, StorageError> {
        window()?
            .document()
            .and_then(|doc| doc.dyn_into::<HtmlDocument>().ok())
            .ok_or(StorageError::Unavailable("document"))
    }

    pub struct BrowserLocalStorage {
        storage: Storage,
    }

    impl BrowserLocalStorage {
        pub fn open() -> Result<Self, StorageError> {
            Ok(Self {
                storage: local_storage()?,
            })
        }
    }

    impl KeyValueStore for BrowserLocalStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.storage.get_item(key).ok().flatten()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.storage
                .set_item(key, value)
                .map_err(|_| StorageError::Write { key: key.into() })
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.storage
                .remove_item(key)
                .map_err(|_| StorageError::Remove { key: key.into() })
        }

        fn clear(&self) -> Result<(), StorageError> {
            self.storage.clear().map_err(|_| StorageError::Clear)
        }
    }

    pub struct BrowserCookies {
        document: HtmlDocument,
    }

    impl BrowserCookies {
        pub fn open() -> Result<Self, StorageError> {
            Ok(Self {
                document: html_document()?,
            })
        }

        fn header(&self) -> String {
            self.document.cookie().unwrap_or_default()
        }
    }

    impl KeyValueStore for BrowserCookies {
        fn get(&self, key: &str) -> Option<String> {
            parse_cookie(&self.header(), key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.document
                .set_cookie(&format_cookie(key, value, COOKIE_MAX_AGE_SECS))
                .map_err(|_| StorageError::Write { key: key.into() })
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.document
                .set_cookie(&format_cookie(key, "", 0))
                .map_err(|_| StorageError::Remove { key: key.into() })
        }

        fn clear(&self) -> Result<(), StorageError> {
            for name in cookie_names(&self.header()) {
                self.remove(&name)?;
            }
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserCookies, BrowserLocalStorage};
