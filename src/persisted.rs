//! PersistedKey: the durable encoding of a selection
//!
//! One opaque string, `"{walletName}:{address}"`. Only the first two
//! colon-separated fields are read back; anything after them is ignored.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const KEY_DELIMITER: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("persisted key has no wallet name")]
    MissingWallet,
    #[error("persisted key has no address")]
    MissingAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedKey {
    pub wallet: String,
    pub address: String,
}

impl PersistedKey {
    pub fn new(wallet: impl Into<String>, address: impl Into<String>) -> Self {
        Self { wallet: wallet.into(), address: address.into() }
    }

    /// Parse a stored value. Empty fields count as missing.
    pub fn parse(raw: &str) -> Result<Self, KeyError> {
        let mut parts = raw.split(KEY_DELIMITER);
        let wallet = parts.next().filter(|s| !s.is_empty()).ok_or(KeyError::MissingWallet)?;
        let address = parts.next().filter(|s| !s.is_empty()).ok_or(KeyError::MissingAddress)?;
        Ok(Self::new(wallet, address))
    }
}

impl fmt::Display for PersistedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.wallet, KEY_DELIMITER, self.address)
    }
}

impl FromStr for PersistedKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
