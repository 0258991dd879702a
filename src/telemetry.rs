//! Tracing initialization.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{AquaError, Result};

/// Install a stderr subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Stdout is reserved for the transcript, so logs never go there.
///
/// ```bash
/// RUST_LOG=aqua=debug aqua-history --user-id u1 --session-id s1
/// ```
pub fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .map_err(|e| AquaError::Configuration(format!("Failed to create env filter: {e}")))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| AquaError::Configuration(format!("Failed to initialize tracing: {e}")))
}
