//! Diagnostic logging setup.
//!
//! Structured logs go to stderr through `tracing-subscriber`. `RUST_LOG`
//! takes precedence; otherwise `-v` raises the level from `warn` to `info`
//! and `-vv` to `debug`.

use std::sync::Once;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Default filter directive for a verbosity count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "helm_vuln_scan=info,warn",
        2 => "helm_vuln_scan=debug,info",
        _ => "trace",
    }
}

/// Initialize the global tracing subscriber.
///
/// Subsequent calls are ignored.
pub fn init_tracing(verbosity: u8) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(verbosity >= 2);

        // try_init: a subscriber installed by an embedding program wins
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}
