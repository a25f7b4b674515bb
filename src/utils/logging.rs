//! Logging utilities
//!
//! Provides logging setup and configuration.

/// Setup logging for the client binary (`RUST_LOG` selects the level)
pub fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}
