//! WalletSelection: the store exposed to JavaScript
//!
//! Wallets and accounts cross the boundary as plain objects:
//! `{ name, accounts: [{ address, label? }], features: [...] }`.
//! `select` takes an account object `{ wallet?, address, label? }`,
//! `null`/`undefined` to disconnect, or a function `(previous) => next`.
//! An account without `wallet` is owned by the known wallet exposing its
//! address.

use super::log;
use crate::account::{Wallet, WalletAccount};
use crate::config::SelectionConfig;
use crate::storage::{LocalStorage, Storage};
use crate::store::{SessionMode, WalletSelectionStore};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

fn js_error(message: impl ToString) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn from_js<T: for<'de> Deserialize<'de>>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(js_error)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(js_error)
}

fn account_from_js(value: JsValue, wallets: &[Wallet]) -> Result<Option<WalletAccount>, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    let account: WalletAccount = from_js(value)?;
    Ok(Some(account.with_owner_from(wallets)))
}

fn wallets_from_js(value: JsValue) -> Result<Vec<Wallet>, JsValue> {
    let wallets: Vec<Wallet> = from_js(value)?;
    Ok(wallets.into_iter().map(Wallet::normalized).collect())
}

#[wasm_bindgen]
pub struct WalletSelection {
    store: WalletSelectionStore,
}

#[wasm_bindgen]
impl WalletSelection {
    /// Create a selection backed by `localStorage`, hydrated against the
    /// wallets known at startup (may be empty).
    #[wasm_bindgen(constructor)]
    pub fn new(wallets: JsValue, storage_key: Option<String>) -> Result<WalletSelection, JsValue> {
        let mut config = SelectionConfig::default();
        if let Some(key) = storage_key {
            config = config.with_storage_key(key);
        }
        let wallets = if wallets.is_null() || wallets.is_undefined() {
            Vec::new()
        } else {
            wallets_from_js(wallets)?
        };
        log!("[WalletSelection] storage key {}", config.storage_key);
        let store = WalletSelectionStore::new(Storage::Local(LocalStorage::new()), &config, wallets);
        Ok(Self { store })
    }

    /// Wallet registry changed (wallet connected/disconnected).
    #[wasm_bindgen(js_name = "setWallets")]
    pub fn set_wallets(&mut self, wallets: JsValue) -> Result<(), JsValue> {
        let wallets = wallets_from_js(wallets)?;
        self.store.set_wallets(wallets);
        Ok(())
    }

    /// Explicit selection: account object, null, or `(previous) => next`.
    #[wasm_bindgen]
    pub fn select(&mut self, next: JsValue) -> Result<JsValue, JsValue> {
        let account = if next.is_function() {
            let update: js_sys::Function = next.unchecked_into();
            let previous = to_js(&self.store.selection())?;
            account_from_js(update.call1(&JsValue::NULL, &previous)?, self.store.wallets())?
        } else {
            account_from_js(next, self.store.wallets())?
        };
        self.store.select(account);
        self.current()
    }

    /// Resolved live account, or null.
    #[wasm_bindgen]
    pub fn current(&self) -> Result<JsValue, JsValue> {
        match self.store.current() {
            Some(account) => to_js(&account),
            None => Ok(JsValue::NULL),
        }
    }

    /// Raw last-set selection, or null.
    #[wasm_bindgen]
    pub fn selection(&self) -> Result<JsValue, JsValue> {
        match self.store.selection() {
            Some(account) => to_js(account),
            None => Ok(JsValue::NULL),
        }
    }

    /// Name of the wallet holding the current account, or null.
    #[wasm_bindgen(js_name = "selectedWallet")]
    pub fn selected_wallet(&self) -> Option<String> {
        self.store.selected_wallet().map(|w| w.name.clone())
    }

    #[wasm_bindgen(js_name = "disconnectWallet")]
    pub fn disconnect_wallet(&mut self, wallet_name: &str) -> bool {
        self.store.disconnect_wallet(wallet_name)
    }

    /// What the persisted slot would restore among `wallets`, or null.
    #[wasm_bindgen]
    pub fn restore(&self, wallets: JsValue) -> Result<JsValue, JsValue> {
        let wallets = wallets_from_js(wallets)?;
        match self.store.restore(&wallets) {
            Some(account) => to_js(&account),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = "isExplicit")]
    pub fn is_explicit(&self) -> bool {
        self.store.mode() == SessionMode::ExplicitChoiceMade
    }

    /// Connectable wallet names (support connect + disconnect).
    #[wasm_bindgen(js_name = "connectableWallets")]
    pub fn connectable_wallets(&self) -> Result<JsValue, JsValue> {
        let (connectable, _) = crate::account::connectable_wallets(self.store.wallets());
        let names: Vec<String> = connectable.into_iter().map(|w| w.name).collect();
        to_js(&names)
    }
}
