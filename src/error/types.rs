//! Error types
//!
//! Defines the error kinds surfaced by every client operation.

use std::fmt;
use std::io;

use crate::protocol::Reply;

/// Control-channel reply that did not fit the current step of an exchange
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolError {
    /// The server answered with a code other than the one the step requires.
    UnexpectedReply { expected: u16, reply: Reply },
    /// The reply line did not start with a three-digit status code.
    MalformedReply(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::UnexpectedReply { expected, reply } => write!(
                f,
                "expected reply {} but server answered {} {}",
                expected, reply.code, reply.message
            ),
            ProtocolError::MalformedReply(raw) => write!(f, "malformed reply: {:?}", raw),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Grammar a reply body or listing line failed to match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTarget {
    WorkingDirectory,
    PassiveAddress,
    ExtendedPassivePort,
    FactList,
    Timestamp,
    FileSize,
}

impl fmt::Display for ParseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseTarget::WorkingDirectory => "PWD path",
            ParseTarget::PassiveAddress => "PASV address",
            ParseTarget::ExtendedPassivePort => "EPSV port",
            ParseTarget::FactList => "MLST fact list",
            ParseTarget::Timestamp => "timestamp",
            ParseTarget::FileSize => "SIZE value",
        };
        f.write_str(name)
    }
}

/// Text that did not match its expected grammar
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub target: ParseTarget,
    pub text: String,
}

impl ParseError {
    pub fn new(target: ParseTarget, text: impl Into<String>) -> Self {
        Self {
            target,
            text: text.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse {} from {:?}", self.target, self.text)
    }
}

impl std::error::Error for ParseError {}

/// General FTP client error that encompasses all error kinds
#[derive(Debug)]
pub enum FtpClientError {
    /// Operation invoked before `connect` or after `close`.
    NotInitialized,
    Protocol(ProtocolError),
    Parse(ParseError),
    /// The operation needs a feature the server did not advertise in FEAT.
    Capability(&'static str),
    Transport(io::Error),
}

impl FtpClientError {
    /// Builds the error for a reply that carried the wrong status code.
    pub fn unexpected(expected: u16, reply: Reply) -> Self {
        FtpClientError::Protocol(ProtocolError::UnexpectedReply { expected, reply })
    }

    /// Returns the server reply behind a protocol error, if there is one.
    pub fn reply(&self) -> Option<&Reply> {
        match self {
            FtpClientError::Protocol(ProtocolError::UnexpectedReply { reply, .. }) => Some(reply),
            _ => None,
        }
    }

    /// Returns the status code of the offending reply, if there is one.
    pub fn reply_code(&self) -> Option<u16> {
        self.reply().map(|reply| reply.code)
    }
}

impl fmt::Display for FtpClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FtpClientError::NotInitialized => write!(f, "Connection not initialized"),
            FtpClientError::Protocol(e) => write!(f, "Protocol error: {}", e),
            FtpClientError::Parse(e) => write!(f, "Parse error: {}", e),
            FtpClientError::Capability(feature) => write!(
                f,
                "Feature {} is not implemented by the FTP server",
                feature
            ),
            FtpClientError::Transport(e) => write!(f, "Transport error: {}", e),
        }
    }
}

impl std::error::Error for FtpClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FtpClientError::Protocol(e) => Some(e),
            FtpClientError::Parse(e) => Some(e),
            FtpClientError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProtocolError> for FtpClientError {
    fn from(error: ProtocolError) -> Self {
        FtpClientError::Protocol(error)
    }
}

impl From<ParseError> for FtpClientError {
    fn from(error: ParseError) -> Self {
        FtpClientError::Parse(error)
    }
}

impl From<io::Error> for FtpClientError {
    fn from(error: io::Error) -> Self {
        FtpClientError::Transport(error)
    }
}

/// Result alias used across the client
pub type FtpResult<T> = Result<T, FtpClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_code_only_for_unexpected_replies() {
        let err = FtpClientError::unexpected(
            213,
            Reply {
                code: 550,
                message: "No such file".into(),
            },
        );
        assert_eq!(err.reply_code(), Some(550));
        assert!(err.to_string().contains("550 No such file"));

        let err = FtpClientError::Parse(ParseError::new(ParseTarget::FileSize, "abc"));
        assert_eq!(err.reply_code(), None);
    }
}
