//! Transfer operations
//!
//! Downloads, uploads and directory listings over a passive data channel.

use log::debug;
use tokio::io::AsyncWriteExt;

use crate::client::{FtpClient, SerialGuard};
use crate::client::state::SessionState;
use crate::error::{FtpClientError, FtpResult};
use crate::listing::{FileInfo, parse_entry};
use crate::protocol::Command;
use crate::protocol::responses::{
    NOT_IMPLEMENTED_OK, OK, START_TRANSFER_CONNECTION, STARTING_TRANSFER,
};
use crate::transfer::data_channel::{open_data_channel, protect};
use crate::transfer::stream::DataTransfer;
use crate::transport::drain;

impl FtpClient {
    /// Starts downloading `name` (`RETR`) and returns the open data stream.
    ///
    /// The session stays locked until the stream is finalized or dropped.
    pub async fn download_readable(&self, name: &str) -> FtpResult<DataTransfer<'_>> {
        let session = self.lock().await;
        start_transfer(session, Command::RETR(name.to_string()), None).await
    }

    /// Starts uploading to `name` (`STOR`) and returns the open data stream.
    ///
    /// When `allocate` is set, `ALLO <n>` is sent first; 200 and 202 are both
    /// accepted.
    pub async fn upload_writable(
        &self,
        name: &str,
        allocate: Option<u64>,
    ) -> FtpResult<DataTransfer<'_>> {
        let session = self.lock().await;
        start_transfer(session, Command::STOR(name.to_string()), allocate).await
    }

    /// Closes a stream from [`download_readable`](Self::download_readable) or
    /// [`upload_writable`](Self::upload_writable) and reads the closing reply.
    pub async fn finalize_stream(&self, transfer: DataTransfer<'_>) -> FtpResult<()> {
        transfer.finish().await
    }

    /// Downloads the whole content of `name`.
    pub async fn download(&self, name: &str) -> FtpResult<Vec<u8>> {
        let mut transfer = self.download_readable(name).await?;
        let content = drain(&mut transfer).await?;
        transfer.finish().await?;
        debug!("Downloaded {} bytes from {}", content.len(), name);
        Ok(content)
    }

    /// Uploads `content` to `name`, replacing it.
    pub async fn upload(&self, name: &str, content: &[u8]) -> FtpResult<()> {
        let mut transfer = self
            .upload_writable(name, Some(content.len() as u64))
            .await?;
        transfer.write_all(content).await?;
        transfer.finish().await?;
        debug!("Uploaded {} bytes to {}", content.len(), name);
        Ok(())
    }

    /// Names in `dir`, or in the working directory (`NLST`).
    pub async fn list(&self, dir: Option<&str>) -> FtpResult<Vec<String>> {
        let session = self.lock().await;
        let text = command_with_data(session, Command::NLST(dir.map(String::from))).await?;
        Ok(text.lines().map(String::from).collect())
    }

    /// Names and metadata of the entries in `dir` (`MLSD`).
    pub async fn extended_list(&self, dir: Option<&str>) -> FtpResult<Vec<(String, FileInfo)>> {
        let session = self.lock().await;
        let text = command_with_data(session, Command::MLSD(dir.map(String::from))).await?;
        let entries = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(parse_entry)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}

/// Opens a data channel, sends the transfer command and hands the held
/// session over to a [`DataTransfer`].
async fn start_transfer(
    mut session: SerialGuard<'_, SessionState>,
    command: Command,
    allocate: Option<u64>,
) -> FtpResult<DataTransfer<'_>> {
    let connection = session.connection_mut()?;
    let data = open_data_channel(connection).await?;

    if let Some(size) = allocate {
        let reply = connection.control.command(Command::ALLO(size)).await?;
        if !reply.is_any(&[OK, NOT_IMPLEMENTED_OK]) {
            return Err(FtpClientError::unexpected(OK, reply));
        }
    }

    let reply = connection.control.command(command).await?;
    if !reply.is_any(&[START_TRANSFER_CONNECTION, STARTING_TRANSFER]) {
        return Err(FtpClientError::unexpected(STARTING_TRANSFER, reply));
    }

    session.open_data(data)?;
    protect(&mut session).await?;
    Ok(DataTransfer::new(session))
}

/// Runs a listing command and returns everything sent on the data channel.
async fn command_with_data(
    session: SerialGuard<'_, SessionState>,
    command: Command,
) -> FtpResult<String> {
    let mut transfer = start_transfer(session, command, None).await?;
    let bytes = drain(&mut transfer).await?;
    transfer.finish().await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
