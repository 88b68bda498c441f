//! `window.localStorage` slot storage (browser)

use super::{StorageError, StorageResult};
use wasm_bindgen::JsValue;

#[derive(Clone, Debug, Default)]
pub struct LocalStorage;

fn js_err(e: JsValue) -> StorageError {
    StorageError::Other(format!("{:?}", e))
}

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    // Private browsing modes may throw or return null here.
    fn storage(&self) -> StorageResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        window
            .local_storage()
            .map_err(js_err)?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))
    }

    pub fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage()?.get_item(key).map_err(js_err)
    }

    pub fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage()?.set_item(key, value).map_err(js_err)
    }

    pub fn remove(&self, key: &str) -> StorageResult<()> {
        self.storage()?.remove_item(key).map_err(js_err)
    }
}
