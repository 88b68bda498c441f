//! Wallet selection: which wallet account is connected, across page sessions.
//!
//! # Architecture
//!
//! ```text
//! Wallet discovery (external)
//!   │  Vec<Wallet> on every connect/disconnect
//!   ▼
//! WalletSelectionStore
//!   ├── restore()         persisted "{wallet}:{address}" → live account
//!   ├── select()          explicit choice → persisted slot
//!   ├── resolve_current() stale selection + live wallets → live account
//!   └── reconcile         wallet gone → clear selection + slot
//!   │
//!   ▼
//! Storage (one slot)
//!   ├── Memory
//!   ├── File   (native)
//!   └── Local  (wasm, window.localStorage)
//! ```
//!
//! # Features
//!
//! - `native` - JSON file slot, tracing subscriber, CLI
//! - `wasm` - localStorage slot, JS bindings via wasm-bindgen
//!
//! # Usage
//!
//! ```
//! use wallet_selection::{MemoryStorage, SelectionConfig, Wallet, WalletAccount, WalletSelectionStore};
//!
//! let storage = MemoryStorage::new();
//! let wallets = vec![Wallet::new("Phantom").with_account("A1")];
//! let mut store = WalletSelectionStore::new(storage.clone(), &SelectionConfig::default(), wallets);
//!
//! store.select(Some(WalletAccount::new("Phantom", "A1")));
//! assert_eq!(store.current().map(|a| a.address), Some("A1".to_string()));
//!
//! // Wallet disconnects
//! store.set_wallets(vec![]);
//! assert!(store.current().is_none());
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod account;
pub mod config;
pub mod persisted;
pub mod storage;
pub mod store;

// =============================================================================
// Native-only modules
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;

// =============================================================================
// WASM-only modules (browser, wasm-bindgen)
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

// =============================================================================
// Re-exports
// =============================================================================
pub use account::{connectable_wallets, Wallet, WalletAccount};
pub use config::SelectionConfig;
pub use persisted::{KeyError, PersistedKey};
pub use storage::{MemoryStorage, Storage, StorageError, StorageResult};
pub use store::{resolve_current, SessionMode, WalletSelectionStore};

#[cfg(feature = "native")]
pub use storage::FileStorage;

#[cfg(feature = "wasm")]
pub use storage::LocalStorage;
#[cfg(feature = "wasm")]
pub use wasm::WalletSelection;
