//! FTP passive modes
//!
//! Which passive-mode grammar a reply carries.

use crate::protocol::responses::{EXTENDED_PASSIVE, PASSIVE};

/// Passive mode announced by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassiveMode {
    /// `229 ... (|||port|)`, data connection goes to the control host
    Extended,
    /// `227 ... (h1,h2,h3,h4,p1,p2)`
    Classic,
}

impl PassiveMode {
    /// Classifies a reply by its code rather than by the command that was
    /// sent, since some servers answer PASV with 229.
    pub fn from_reply_code(code: u16) -> Option<Self> {
        match code {
            EXTENDED_PASSIVE => Some(PassiveMode::Extended),
            PASSIVE => Some(PassiveMode::Classic),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_follows_reply_code() {
        assert_eq!(PassiveMode::from_reply_code(229), Some(PassiveMode::Extended));
        assert_eq!(PassiveMode::from_reply_code(227), Some(PassiveMode::Classic));
        assert_eq!(PassiveMode::from_reply_code(200), None);
    }
}
