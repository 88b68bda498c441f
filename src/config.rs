//! Selection configuration - passed from higher layers

use std::path::PathBuf;

/// Storage identifier used by the wallet-standard React example; kept so an
/// existing browser profile restores the same slot.
pub const DEFAULT_STORAGE_KEY: &str = "solana-wallet-standard-example-react:selected-wallet-and-address";

pub const DEFAULT_APP: &str = "wallet-selection";

/// Overrides the native data root (tests, portable installs).
pub const ROOT_ENV: &str = "WALLET_SELECTION_ROOT";

#[derive(Debug, Clone)]
pub struct SelectionConfig {
    pub app: String,
    pub storage_key: String,
    pub root: Option<PathBuf>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            app: DEFAULT_APP.into(),
            storage_key: DEFAULT_STORAGE_KEY.into(),
            root: None,
        }
    }
}

impl SelectionConfig {
    pub fn new(app: impl Into<String>) -> Self {
        Self { app: app.into(), ..Default::default() }
    }
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self { self.storage_key = key.into(); self }
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self { self.root = Some(root.into()); self }

    /// `{root}/{app}/data/selection.json`, root falling back to
    /// `$WALLET_SELECTION_ROOT` then the platform data dir.
    #[cfg(feature = "native")]
    pub fn file_path(&self) -> PathBuf {
        let root = self.root.clone().unwrap_or_else(|| {
            std::env::var(ROOT_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")))
        });
        root.join(&self.app).join("data").join("selection.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SelectionConfig::default();
        assert_eq!(config.app, DEFAULT_APP);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert!(config.root.is_none());
    }

    #[cfg(feature = "native")]
    #[test]
    fn explicit_root_wins() {
        let config = SelectionConfig::new("demo").with_root("/tmp/sel");
        assert_eq!(config.file_path(), PathBuf::from("/tmp/sel/demo/data/selection.json"));
    }
}
