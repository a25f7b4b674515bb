//! Utility functions
//!
//! Provides logging setup for the client binary.

pub mod logging;

pub use logging::setup_logging;
