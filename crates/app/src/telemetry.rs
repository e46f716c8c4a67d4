//! Tracing initialization for embedding applications.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with `EnvFilter`.
///
/// Defaults to info level for the OPI crates if `RUST_LOG` is not set.
/// Call once from the embedding application; calling twice panics in
/// `tracing_subscriber`, so libraries must never call this themselves.
pub fn init() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "opi_app=info,opi_backend=info,opi_access=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
