//! WalletSelectionStore: the selected account, kept in step with wallet discovery
//!
//! # Session modes
//!
//! ```text
//! AutoRestoreEligible ──select()──▶ ExplicitChoiceMade
//!   │ every set_wallets()              │ restore() never consulted again
//!   └─ re-attempts restore()           └─ persisted slot follows select()
//! ```
//!
//! Every mutation ends with a reconcile: if the selection no longer resolves
//! against the live wallet list (its wallet disconnected), the selection and
//! the persisted slot are both cleared. That clearing is not an explicit
//! choice and leaves the session mode alone.

use crate::account::{wallet_for_address, Wallet, WalletAccount};
use crate::config::SelectionConfig;
use crate::persisted::PersistedKey;
use crate::storage::Storage;
use futures::channel::mpsc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    AutoRestoreEligible,
    ExplicitChoiceMade,
}

impl Default for SessionMode {
    fn default() -> Self { Self::AutoRestoreEligible }
}

impl SessionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionMode::AutoRestoreEligible => "auto-restore",
            SessionMode::ExplicitChoiceMade => "explicit",
        }
    }
}

/// Map a possibly stale selection onto the live wallet list.
///
/// Wallets are walked in order. An account that is the same as the selection
/// wins; failing that, if the selection belongs to the wallet being visited,
/// that wallet's first account is used. No match yields `None`.
pub fn resolve_current(selection: Option<&WalletAccount>, wallets: &[Wallet]) -> Option<WalletAccount> {
    let selected = selection?;
    for wallet in wallets {
        if let Some(account) = wallet.accounts.iter().find(|a| a.is_same(selected)) {
            return Some(account.clone());
        }
        if selected.belongs_to(wallet) {
            if let Some(first) = wallet.first_account() {
                return Some(first.clone());
            }
        }
    }
    None
}

pub struct WalletSelectionStore {
    storage: Storage,
    storage_key: String,
    wallets: Vec<Wallet>,
    selection: Option<WalletAccount>,
    mode: SessionMode,
    last_resolved: Option<WalletAccount>,
    watchers: Vec<mpsc::UnboundedSender<Option<WalletAccount>>>,
}

impl WalletSelectionStore {
    /// Create a store and hydrate it from the persisted slot against the
    /// wallets known right now.
    pub fn new(storage: impl Into<Storage>, config: &SelectionConfig, wallets: Vec<Wallet>) -> Self {
        let mut store = Self {
            storage: storage.into(),
            storage_key: config.storage_key.clone(),
            wallets,
            selection: None,
            mode: SessionMode::default(),
            last_resolved: None,
            watchers: Vec::new(),
        };
        let restored = store.restore(&store.wallets);
        debug!(
            storage = store.storage.kind(),
            restored = restored.is_some(),
            "selection store created"
        );
        store.selection = restored;
        store.reconcile();
        store
    }

    /// Look up the persisted account among `wallets`.
    ///
    /// Returns `None` when nothing is stored, the stored value is malformed,
    /// storage is unreadable, the account is not present, or an explicit
    /// choice has already been made in this session.
    pub fn restore(&self, wallets: &[Wallet]) -> Option<WalletAccount> {
        if self.mode == SessionMode::ExplicitChoiceMade {
            return None;
        }
        let raw = match self.storage.get(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "reading persisted selection failed");
                return None;
            }
        };
        let key = match PersistedKey::parse(&raw) {
            Ok(key) => key,
            Err(e) => {
                debug!(error = %e, "ignoring malformed persisted selection");
                return None;
            }
        };
        wallets
            .iter()
            .filter(|w| w.name == key.wallet)
            .find_map(|w| w.find_account(&key.address))
            .cloned()
    }

    /// Explicitly set the selection. `None` means disconnect.
    pub fn select(&mut self, next: Option<WalletAccount>) {
        self.select_with(move |_| next)
    }

    /// Explicitly set the selection from the previous one.
    pub fn select_with<F>(&mut self, update: F)
    where
        F: FnOnce(Option<&WalletAccount>) -> Option<WalletAccount>,
    {
        let next = update(self.selection.as_ref());
        if self.mode == SessionMode::AutoRestoreEligible {
            debug!("explicit selection made, auto-restore disabled");
            self.mode = SessionMode::ExplicitChoiceMade;
        }
        self.persist(next.as_ref());
        debug!(account = ?next.as_ref().map(|a| a.storage_key()), "selection set");
        self.selection = next;
        self.reconcile();
    }

    /// Wallet-list change from discovery.
    pub fn set_wallets(&mut self, wallets: Vec<Wallet>) {
        self.wallets = wallets;
        if let Some(restored) = self.restore(&self.wallets) {
            debug!(account = %restored.storage_key(), "restored persisted selection");
            self.selection = Some(restored);
        }
        self.reconcile();
    }

    /// The user disconnected `wallet_name` from the menu. Clears the
    /// selection (as an explicit choice) only when it belongs to that wallet.
    pub fn disconnect_wallet(&mut self, wallet_name: &str) -> bool {
        let owned = self
            .current()
            .map(|a| a.wallet == wallet_name)
            .unwrap_or(false);
        if owned {
            self.select(None);
        }
        owned
    }

    /// Resolved live account, or `None`.
    pub fn current(&self) -> Option<WalletAccount> {
        resolve_current(self.selection.as_ref(), &self.wallets)
    }

    /// Raw last-set selection; may hold a stale account object.
    pub fn selection(&self) -> Option<&WalletAccount> {
        self.selection.as_ref()
    }

    /// The wallet exposing the current account's address.
    pub fn selected_wallet(&self) -> Option<&Wallet> {
        let current = self.current()?;
        wallet_for_address(&self.wallets, &current.address)
    }

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Receive the resolved account each time it changes.
    pub fn watch(&mut self) -> mpsc::UnboundedReceiver<Option<WalletAccount>> {
        let (tx, rx) = mpsc::unbounded();
        self.watchers.push(tx);
        rx
    }

    fn persist(&self, account: Option<&WalletAccount>) {
        let result = match account {
            Some(account) => self.storage.set(&self.storage_key, &account.storage_key()),
            None => self.storage.remove(&self.storage_key),
        };
        if let Err(e) = result {
            warn!(error = %e, "writing persisted selection failed");
        }
    }

    fn reconcile(&mut self) {
        let resolved = resolve_current(self.selection.as_ref(), &self.wallets);
        if self.selection.is_some() && resolved.is_none() {
            debug!("selected wallet is gone, clearing selection");
            self.selection = None;
            self.persist(None);
        }
        self.notify(resolved);
    }

    fn notify(&mut self, resolved: Option<WalletAccount>) {
        if resolved == self.last_resolved {
            return;
        }
        self.last_resolved = resolved.clone();
        self.watchers.retain(|tx| tx.unbounded_send(resolved.clone()).is_ok());
    }
}
