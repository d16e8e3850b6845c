pub mod env;
pub mod tracing_init;

pub use env::{AppConfig, IqAirSettings};
pub use tracing_init::init_tracing;

/// Serialises tests that mutate process environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
