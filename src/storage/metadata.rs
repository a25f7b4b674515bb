//! File metadata queries
//!
//! SIZE, MDTM and MLST, plus the `stat` fallback for servers without MLST.

use chrono::{DateTime, Utc};
use log::debug;

use crate::client::FtpClient;
use crate::client::state::Connection;
use crate::error::handlers::is_file_unknown;
use crate::error::{FtpClientError, FtpResult, ParseError, ParseTarget};
use crate::listing::{FileInfo, FileKind, parse_entry, parse_timestamp};
use crate::protocol::responses::{ACTION_OK, FILE_STAT};
use crate::protocol::{Command, Feature};

impl FtpClient {
    /// Size of a file in bytes (`SIZE`).
    pub async fn size(&self, name: &str) -> FtpResult<u64> {
        let mut session = self.lock().await;
        size_of(session.connection_mut()?, name).await
    }

    /// Last modification time of a file (`MDTM`).
    ///
    /// Fails with a capability error when the server did not advertise MDTM.
    pub async fn modified(&self, name: &str) -> FtpResult<DateTime<Utc>> {
        let mut session = self.lock().await;
        modified_of(session.connection_mut()?, name).await
    }

    /// Metadata of a single entry.
    ///
    /// Uses MLST when advertised. Otherwise the entry is probed with SIZE
    /// (and MDTM when available); a 550 answer to SIZE marks it a directory.
    pub async fn stat(&self, name: &str) -> FtpResult<FileInfo> {
        let mut session = self.lock().await;
        let connection = session.connection_mut()?;

        if connection.features.mlst().is_some() {
            let reply = connection
                .control
                .expect(Command::MLST(name.to_string()), ACTION_OK)
                .await?;
            // The entry is the second line, between the 250- and 250 lines.
            let entry = reply
                .message
                .split("\r\n")
                .nth(1)
                .ok_or_else(|| ParseError::new(ParseTarget::FactList, reply.message.as_str()))?;
            let (_, info) = parse_entry(entry)?;
            return Ok(info);
        }

        let mut info = FileInfo::default();
        match size_of(connection, name).await {
            Ok(size) => info.size = Some(size),
            Err(e) if is_file_unknown(&e) => {
                debug!("SIZE {} answered 550, treating it as a directory", name);
                info.kind = FileKind::Directory;
            }
            Err(e) => return Err(e),
        }

        if info.is_file() && connection.features.has(Feature::Mdtm) {
            info.modified = Some(modified_of(connection, name).await?);
        }
        Ok(info)
    }
}

async fn size_of(connection: &mut Connection, name: &str) -> FtpResult<u64> {
    let reply = connection
        .control
        .expect(Command::SIZE(name.to_string()), FILE_STAT)
        .await?;
    let text = reply.message.trim();
    text.parse::<u64>()
        .map_err(|_| ParseError::new(ParseTarget::FileSize, text).into())
}

async fn modified_of(connection: &mut Connection, name: &str) -> FtpResult<DateTime<Utc>> {
    if !connection.features.has(Feature::Mdtm) {
        return Err(FtpClientError::Capability("MDTM"));
    }
    let reply = connection
        .control
        .expect(Command::MDTM(name.to_string()), FILE_STAT)
        .await?;
    Ok(parse_timestamp(reply.message.trim())?)
}
