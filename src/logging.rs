//! Native log setup: `RUST_LOG` filter, JSON lines when
//! `WALLET_SELECTION_LOG_JSON=1`, always to stderr so CLI stdout stays JSON.

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_JSON_ENV: &str = "WALLET_SELECTION_LOG_JSON";

/// Store transitions log at `debug`; only degraded storage shows by default.
const DEFAULT_FILTER: &str = "warn,wallet_selection=info";

pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let use_json = std::env::var(LOG_JSON_ENV)
        .map(|value| value == "1")
        .unwrap_or(false);

    if use_json {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .json()
            .with_writer(std::io::stderr)
            .try_init();
    } else {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .compact()
            .with_writer(std::io::stderr)
            .try_init();
    }
}
