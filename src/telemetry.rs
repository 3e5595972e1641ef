//! Tracing initialisation for binaries that embed checkrun.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the host. [`init_tracing`] is a convenience for hosts without one.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialises the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`. When `json` is `true`, events
/// are written as newline-delimited JSON. Only the first call in a process
/// takes effect; later calls return `false`.
#[must_use]
pub fn init_tracing(json: bool, level: Level) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).json())
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false))
            .try_init()
            .is_ok()
    }
}
