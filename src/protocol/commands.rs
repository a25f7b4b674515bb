//! Module `commands`
//!
//! Defines the FTP commands the client sends on the control channel and
//! their serialization to wire text.

use std::fmt;

/// Representation type selected with `TYPE`.
///
/// Every session runs in image (binary) mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferType {
    Binary,
}

impl TransferType {
    fn code(self) -> &'static str {
        match self {
            TransferType::Binary => "I",
        }
    }
}

/// Represents an FTP command issued by the client.
///
/// Each value is built for a single exchange, serialized with [`Command::to_wire`]
/// and dropped. Commands that take arguments store them inline.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    USER(String),
    PASS(String),
    CWD(String),
    CDUP,
    PWD,
    TYPE(TransferType),
    RETR(String),
    STOR(String),
    ALLO(u64), // Reserve storage before STOR
    RNFR(String),
    RNTO(String),
    DELE(String),
    RMD(String),
    MKD(String),
    NLST(Option<String>),
    MLSD(Option<String>),
    MLST(String),
    AUTH(String),
    PBSZ(u32),
    PROT(char),
    SIZE(String),
    MDTM(String),
    FEAT,
    PASV,
    EPSV,
}

impl Command {
    /// The command verb as sent on the wire.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::USER(_) => "USER",
            Command::PASS(_) => "PASS",
            Command::CWD(_) => "CWD",
            Command::CDUP => "CDUP",
            Command::PWD => "PWD",
            Command::TYPE(_) => "TYPE",
            Command::RETR(_) => "RETR",
            Command::STOR(_) => "STOR",
            Command::ALLO(_) => "ALLO",
            Command::RNFR(_) => "RNFR",
            Command::RNTO(_) => "RNTO",
            Command::DELE(_) => "DELE",
            Command::RMD(_) => "RMD",
            Command::MKD(_) => "MKD",
            Command::NLST(_) => "NLST",
            Command::MLSD(_) => "MLSD",
            Command::MLST(_) => "MLST",
            Command::AUTH(_) => "AUTH",
            Command::PBSZ(_) => "PBSZ",
            Command::PROT(_) => "PROT",
            Command::SIZE(_) => "SIZE",
            Command::MDTM(_) => "MDTM",
            Command::FEAT => "FEAT",
            Command::PASV => "PASV",
            Command::EPSV => "EPSV",
        }
    }

    fn argument(&self) -> Option<String> {
        match self {
            Command::USER(arg)
            | Command::PASS(arg)
            | Command::CWD(arg)
            | Command::RETR(arg)
            | Command::STOR(arg)
            | Command::RNFR(arg)
            | Command::RNTO(arg)
            | Command::DELE(arg)
            | Command::RMD(arg)
            | Command::MKD(arg)
            | Command::MLST(arg)
            | Command::AUTH(arg)
            | Command::SIZE(arg)
            | Command::MDTM(arg) => Some(arg.clone()),
            Command::NLST(dir) | Command::MLSD(dir) => dir.clone(),
            Command::TYPE(kind) => Some(kind.code().to_string()),
            Command::ALLO(bytes) => Some(bytes.to_string()),
            Command::PBSZ(size) => Some(size.to_string()),
            Command::PROT(level) => Some(level.to_string()),
            Command::CDUP | Command::PWD | Command::FEAT | Command::PASV | Command::EPSV => None,
        }
    }

    /// Serializes the command to a CRLF-terminated control line.
    ///
    /// An empty argument is omitted, so `NLST` without a directory lists the
    /// working directory.
    pub fn to_wire(&self) -> String {
        match self.argument() {
            Some(arg) if !arg.is_empty() => format!("{} {}\r\n", self.verb(), arg),
            _ => format!("{}\r\n", self.verb()),
        }
    }
}

/// Log-safe rendering: the password of `PASS` is masked.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::PASS(_) => write!(f, "PASS ****"),
            other => write!(f, "{}", other.to_wire().trim_end()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_text() {
        assert_eq!(Command::USER("bob".into()).to_wire(), "USER bob\r\n");
        assert_eq!(Command::TYPE(TransferType::Binary).to_wire(), "TYPE I\r\n");
        assert_eq!(Command::PROT('P').to_wire(), "PROT P\r\n");
        assert_eq!(Command::ALLO(11).to_wire(), "ALLO 11\r\n");
        assert_eq!(Command::NLST(None).to_wire(), "NLST\r\n");
        assert_eq!(Command::MLSD(Some(String::new())).to_wire(), "MLSD\r\n");
        assert_eq!(Command::MLSD(Some("pub".into())).to_wire(), "MLSD pub\r\n");
        assert_eq!(Command::EPSV.to_wire(), "EPSV\r\n");
    }

    #[test]
    fn test_display_masks_password() {
        assert_eq!(Command::PASS("secret".into()).to_string(), "PASS ****");
        assert_eq!(Command::RETR("a.txt".into()).to_string(), "RETR a.txt");
    }
}
