//! FTP Response handling
//!
//! Defines FTP reply codes and the structured reply read from the control channel.

use serde::Serialize;

/// Standard FTP reply codes
pub const START_TRANSFER_CONNECTION: u16 = 125;
pub const STARTING_TRANSFER: u16 = 150;
pub const OK: u16 = 200;
pub const NOT_IMPLEMENTED_OK: u16 = 202;
pub const FILE_STAT: u16 = 213;
pub const READY: u16 = 220;
pub const DATA_CLOSE: u16 = 226;
pub const PASSIVE: u16 = 227;
pub const EXTENDED_PASSIVE: u16 = 229;
pub const LOGGED_IN: u16 = 230;
pub const AUTH_PROCEED: u16 = 234;
pub const ACTION_OK: u16 = 250;
pub const DIR_CREATED: u16 = 257;
pub const NEED_PASS: u16 = 331;
pub const NEED_FILE_INFO: u16 = 350;
pub const FILE_UNKNOWN: u16 = 550;

/// One reply from the control channel.
///
/// `code` is always the first three characters of the first reply line.
/// `message` is the reply text without the leading `CCC ` / `CCC-` prefix;
/// lines of a multi-line reply are joined with `\r\n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub code: u16,
    pub message: String,
}

impl Reply {
    /// Whether the reply code is one of `codes`.
    pub fn is_any(&self, codes: &[u16]) -> bool {
        codes.contains(&self.code)
    }
}
