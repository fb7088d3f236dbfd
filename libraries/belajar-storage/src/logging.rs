//! Tracing bootstrap
//!
//! Statement logging itself comes from sqlx (see
//! [`DatabaseConfig::connect_options`](crate::DatabaseConfig::connect_options));
//! this module only installs a subscriber that prints it.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "belajar_storage=info,sqlx=info";

/// Install a global fmt subscriber
///
/// Safe to call more than once; returns `false` when a subscriber was
/// already installed.
pub fn init_tracing() -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::init_tracing;

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        assert!(!init_tracing());
    }
}
