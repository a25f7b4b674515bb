//! Transfer result types
//!
//! Defines result structures returned by data channel negotiation.

/// Where to open the data connection after PASV/EPSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassiveModeResult {
    pub host: String,
    pub port: u16,
}
