//! Wallet and account model
//!
//! Wallets are discovered by an external registry and may come and go at any
//! time. Accounts are identified by `(wallet name, address)`; the storage key
//! is derived from that pair and is what ends up in the persisted slot.

use crate::persisted::PersistedKey;
use serde::{Deserialize, Serialize};

/// Wallet feature identifiers used to decide whether a wallet can be
/// connected and disconnected from the menu.
pub mod features {
    pub const CONNECT: &str = "standard:connect";
    pub const DISCONNECT: &str = "standard:disconnect";
}

/// An address-identified signer exposed by a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    /// Name of the wallet that owns this account
    #[serde(default)]
    pub wallet: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chains: Vec<String>,
}

impl WalletAccount {
    pub fn new(wallet: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            wallet: wallet.into(),
            address: address.into(),
            label: None,
            chains: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self { self.label = Some(label.into()); self }

    /// Fill in a missing owner from the wallet exposing this address.
    pub fn with_owner_from(mut self, wallets: &[Wallet]) -> Self {
        if self.wallet.is_empty() {
            if let Some(wallet) = wallet_for_address(wallets, &self.address) {
                self.wallet = wallet.name.clone();
            }
        }
        self
    }

    /// Deterministic storage key: `"{wallet}:{address}"`
    pub fn storage_key(&self) -> String {
        self.persisted_key().to_string()
    }

    /// The persisted form of this account.
    pub fn persisted_key(&self) -> PersistedKey {
        PersistedKey::new(&self.wallet, &self.address)
    }

    /// Same account: same owning wallet and same address.
    pub fn is_same(&self, other: &WalletAccount) -> bool {
        self.wallet == other.wallet && self.address == other.address
    }

    /// Whether this account was issued by `wallet`.
    pub fn belongs_to(&self, wallet: &Wallet) -> bool {
        self.wallet == wallet.name
    }
}

/// A named provider exposing zero or more accounts, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<WalletAccount>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Wallet {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), accounts: Vec::new(), features: Vec::new() }
    }

    /// Add an account by address. The account's owner is set to this wallet.
    pub fn with_account(mut self, address: impl Into<String>) -> Self {
        let account = WalletAccount::new(self.name.clone(), address);
        self.accounts.push(account);
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features.extend(features.into_iter().map(Into::into));
        self
    }

    /// Wallet that supports both connect and disconnect.
    pub fn standard(name: impl Into<String>) -> Self {
        Self::new(name).with_features([features::CONNECT, features::DISCONNECT])
    }

    pub fn first_account(&self) -> Option<&WalletAccount> {
        self.accounts.first()
    }

    pub fn find_account(&self, address: &str) -> Option<&WalletAccount> {
        self.accounts.iter().find(|a| a.address == address)
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Wallet can be driven from the connect menu.
    pub fn is_connectable(&self) -> bool {
        self.has_feature(features::CONNECT) && self.has_feature(features::DISCONNECT)
    }

    /// Accounts deserialized from outside may carry a stale or empty owner name.
    pub fn normalized(mut self) -> Self {
        for account in &mut self.accounts {
            if account.wallet != self.name {
                account.wallet = self.name.clone();
            }
        }
        self
    }
}

/// Split wallets into (connectable, unconnectable), preserving order.
pub fn connectable_wallets(wallets: &[Wallet]) -> (Vec<Wallet>, Vec<Wallet>) {
    wallets.iter().cloned().partition(Wallet::is_connectable)
}

/// Find the wallet whose accounts include `address`.
pub fn wallet_for_address<'a>(wallets: &'a [Wallet], address: &str) -> Option<&'a Wallet> {
    wallets.iter().find(|w| w.accounts.iter().any(|a| a.address == address))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_joins_wallet_and_address() {
        let account = WalletAccount::new("Phantom", "ABC123");
        assert_eq!(account.storage_key(), "Phantom:ABC123");
    }

    #[test]
    fn owner_filled_from_wallet_list() {
        let wallets = vec![
            Wallet::new("Phantom").with_account("A1"),
            Wallet::new("Solflare").with_account("B1"),
        ];
        let bare = WalletAccount::new("", "B1").with_owner_from(&wallets);
        assert_eq!(bare.wallet, "Solflare");

        // An explicit owner is never rewritten.
        let owned = WalletAccount::new("Backpack", "B1").with_owner_from(&wallets);
        assert_eq!(owned.wallet, "Backpack");

        let unknown = WalletAccount::new("", "Z9").with_owner_from(&wallets);
        assert_eq!(unknown.wallet, "");
    }

    #[test]
    fn same_account_ignores_display_fields() {
        let a = WalletAccount::new("Phantom", "A1").with_label("main");
        let b = WalletAccount::new("Phantom", "A1");
        let c = WalletAccount::new("Solflare", "A1");
        assert!(a.is_same(&b));
        assert!(!a.is_same(&c));
    }

    #[test]
    fn with_account_sets_owner() {
        let wallet = Wallet::new("Backpack").with_account("X").with_account("Y");
        assert_eq!(wallet.accounts.len(), 2);
        assert!(wallet.accounts.iter().all(|a| a.belongs_to(&wallet)));
        assert_eq!(wallet.first_account().map(|a| a.address.as_str()), Some("X"));
    }

    #[test]
    fn partition_by_connect_features() {
        let wallets = vec![
            Wallet::standard("Phantom"),
            Wallet::new("ReadOnly").with_features([features::CONNECT]),
            Wallet::standard("Solflare"),
        ];
        let (ok, rest) = connectable_wallets(&wallets);
        assert_eq!(ok.iter().map(|w| w.name.as_str()).collect::<Vec<_>>(), ["Phantom", "Solflare"]);
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].name, "ReadOnly");
    }

    #[test]
    fn wallet_lookup_by_address() {
        let wallets = vec![
            Wallet::new("Phantom").with_account("A1"),
            Wallet::new("Solflare").with_account("B1"),
        ];
        assert_eq!(wallet_for_address(&wallets, "B1").map(|w| w.name.as_str()), Some("Solflare"));
        assert!(wallet_for_address(&wallets, "nope").is_none());
    }

    #[test]
    fn normalized_rewrites_owner() {
        let mut wallet = Wallet::new("Phantom");
        wallet.accounts.push(WalletAccount::new("", "A1"));
        let wallet = wallet.normalized();
        assert_eq!(wallet.accounts[0].wallet, "Phantom");
    }
}
