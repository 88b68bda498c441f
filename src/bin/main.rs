//! wallet-selection CLI - inspect and edit the persisted selection slot
//!
//!   wallet-selection get                       → {"key": "...", "value": "Phantom:A1"}
//!   wallet-selection set <wallet> <address>    → write the slot (explicit choice)
//!   wallet-selection clear                     → remove the slot
//!   wallet-selection resolve <wallets.json>    → what a fresh session would select
//!
//! Output is JSON on stdout; errors are `{"error": "..."}` on stderr.

use anyhow::{anyhow, bail, Context, Result};
use serde_json::{json, Value};
use std::env;
use std::io::IsTerminal;
use tracing::debug;
use wallet_selection::logging::init_logging;
use wallet_selection::{
    connectable_wallets, FileStorage, PersistedKey, SelectionConfig, Storage, Wallet, WalletAccount,
    WalletSelectionStore,
};

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let opts = ParsedArgs::parse(&args[1..]);

    if opts.help {
        print_usage();
        return;
    }

    if opts.version {
        println!("wallet-selection {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let result = match opts.command.as_deref() {
        Some("get") => cmd_get(&opts),
        Some("set") => cmd_set(&opts),
        Some("clear") => cmd_clear(&opts),
        Some("resolve") => cmd_resolve(&opts),
        Some(cmd) => Err(anyhow!("Unknown command: {}", cmd)),
        None => {
            print_usage();
            return;
        }
    };

    let pretty = opts.pretty || std::io::stdout().is_terminal();
    match result {
        Ok(output) => println!("{}", render(&output, pretty)),
        Err(e) => {
            eprintln!("{}", render(&json!({"error": format!("{:#}", e)}), pretty));
            std::process::exit(1);
        }
    }
}

fn render(value: &Value, pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.unwrap_or_else(|_| value.to_string())
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    positional: Vec<String>,
    app: Option<String>,
    storage_key: Option<String>,
    root: Option<String>,
    pretty: bool,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        let mut opts = ParsedArgs::default();
        let mut i = 0;

        while i < args.len() {
            let arg = &args[i];
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--version" | "-V" => opts.version = true,
                "--pretty" => opts.pretty = true,
                "--app" | "-a" => {
                    if i + 1 < args.len() {
                        opts.app = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--key" | "-k" => {
                    if i + 1 < args.len() {
                        opts.storage_key = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--root" | "-r" => {
                    if i + 1 < args.len() {
                        opts.root = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                _ if !arg.starts_with('-') => opts.positional.push(arg.clone()),
                _ => {} // Ignore unknown flags
            }
            i += 1;
        }

        if !opts.positional.is_empty() {
            opts.command = Some(opts.positional.remove(0));
        }

        if opts.app.is_none() {
            opts.app = env::var("WALLET_SELECTION_APP").ok().filter(|s| !s.is_empty());
        }

        opts
    }

    fn config(&self) -> SelectionConfig {
        let mut config = match &self.app {
            Some(app) => SelectionConfig::new(app.clone()),
            None => SelectionConfig::default(),
        };
        if let Some(key) = &self.storage_key {
            config = config.with_storage_key(key.clone());
        }
        if let Some(root) = &self.root {
            config = config.with_root(root.clone());
        }
        config
    }
}

fn open(opts: &ParsedArgs, wallets: Vec<Wallet>) -> (SelectionConfig, FileStorage, WalletSelectionStore) {
    let config = opts.config();
    let storage = FileStorage::from_config(&config);
    debug!(path = %storage.path().display(), "using selection file");
    let store = WalletSelectionStore::new(Storage::File(storage.clone()), &config, wallets);
    (config, storage, store)
}

fn cmd_get(opts: &ParsedArgs) -> Result<Value> {
    let config = opts.config();
    let storage = FileStorage::from_config(&config);
    let value = storage
        .get(&config.storage_key)
        .with_context(|| format!("reading {}", storage.path().display()))?;
    let parsed = value.as_deref().map(PersistedKey::parse);
    Ok(json!({
        "key": config.storage_key,
        "value": value,
        "wallet": parsed.as_ref().and_then(|p| p.as_ref().ok()).map(|k| k.wallet.clone()),
        "address": parsed.as_ref().and_then(|p| p.as_ref().ok()).map(|k| k.address.clone()),
        "valid": parsed.map(|p| p.is_ok()).unwrap_or(false),
    }))
}

fn cmd_set(opts: &ParsedArgs) -> Result<Value> {
    let (wallet, address) = match opts.positional.as_slice() {
        [wallet, address, ..] => (wallet.clone(), address.clone()),
        _ => bail!("usage: wallet-selection set <wallet> <address>"),
    };
    let account = WalletAccount::new(wallet.clone(), address);
    // The CLI has no live registry; treat the named wallet as connected.
    let wallets = vec![Wallet::new(wallet).with_account(account.address.clone())];
    let (config, storage, mut store) = open(opts, wallets);
    store.select(Some(account));
    let value = storage.get(&config.storage_key)?;
    if value.is_none() {
        bail!("selection was not persisted to {}", storage.path().display());
    }
    Ok(json!({"key": config.storage_key, "value": value}))
}

fn cmd_clear(opts: &ParsedArgs) -> Result<Value> {
    let (config, storage, mut store) = open(opts, Vec::new());
    store.select(None);
    let value = storage.get(&config.storage_key)?;
    Ok(json!({"key": config.storage_key, "cleared": value.is_none()}))
}

fn cmd_resolve(opts: &ParsedArgs) -> Result<Value> {
    let path = opts
        .positional
        .first()
        .ok_or_else(|| anyhow!("usage: wallet-selection resolve <wallets.json>"))?;
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let wallets: Vec<Wallet> = serde_json::from_str(&raw).with_context(|| format!("parsing {}", path))?;
    let wallets: Vec<Wallet> = wallets.into_iter().map(Wallet::normalized).collect();

    let (connectable, unconnectable) = connectable_wallets(&wallets);
    let (_, _, store) = open(opts, wallets);
    let current = store.current();
    Ok(json!({
        "selected": current,
        "wallet": store.selected_wallet().map(|w| w.name.clone()),
        "mode": store.mode().as_str(),
        "connectable": connectable.iter().map(|w| w.name.as_str()).collect::<Vec<_>>(),
        "unconnectable": unconnectable.iter().map(|w| w.name.as_str()).collect::<Vec<_>>(),
    }))
}

fn print_usage() {
    println!(
        r#"wallet-selection - persisted wallet account selection

USAGE:
    wallet-selection <command> [args] [options]

COMMANDS:
    get                          Show the persisted slot
    set <wallet> <address>       Persist an explicit selection
    clear                        Remove the persisted slot
    resolve <wallets.json>       Resolve the slot against a wallet list

OPTIONS:
    --app, -a <name>             Application name (env: WALLET_SELECTION_APP)
    --key, -k <id>               Storage identifier
    --root, -r <path>            Data root (env: WALLET_SELECTION_ROOT)
    --pretty                     Pretty-print JSON
    --version, -V                Print version

WALLETS FILE:
    [{{"name": "Phantom", "accounts": [{{"address": "A1"}}],
      "features": ["standard:connect", "standard:disconnect"]}}]
"#
    );
}
