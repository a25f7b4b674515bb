//! Error handlers
//!
//! Provides error reporting helpers for callers of the client.

use crate::error::types::{FtpClientError, ProtocolError};
use crate::protocol::responses::FILE_UNKNOWN;
use log::error;

/// Log an FTP client error
pub fn handle_error(err: &FtpClientError) {
    error!("FTP Client Error: {}", err);
}

/// Whether the error is the server's "file unavailable" (550) reply
pub fn is_file_unknown(err: &FtpClientError) -> bool {
    matches!(
        err,
        FtpClientError::Protocol(ProtocolError::UnexpectedReply { reply, .. })
            if reply.code == FILE_UNKNOWN
    )
}
