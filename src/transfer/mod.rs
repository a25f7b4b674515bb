//! Transfer module for the FTP client
//!
//! Handles passive data channel negotiation, file transfers and directory
//! listings.

pub mod data_channel;
pub mod modes;
pub mod operations;
pub mod results;
pub mod stream;

// Re-export key types and functions
pub use data_channel::{parse_epsv, parse_pasv};
pub use modes::PassiveMode;
pub use results::PassiveModeResult;
pub use stream::DataTransfer;
