//! Tracing subscriber setup.
//!
//! ```ignore
//! coursepath_core::logging::init("coursepath=info");
//! tracing::info!("ready");
//! ```
//!
//! `RUST_LOG` wins over the default directive when it is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber: `fmt` output filtered by `RUST_LOG` or
/// `default_directive`. Calling it twice is harmless; the second call is
/// ignored and reported at debug level.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init();

    if let Err(e) = result {
        tracing::debug!("Subscriber already installed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_does_not_panic() {
        init("coursepath_core=debug");
        init("coursepath_core=debug");
    }
}
