//! Storage operations
//!
//! Renaming and removing files, creating and removing directories.

use log::info;

use crate::client::FtpClient;
use crate::error::FtpResult;
use crate::protocol::Command;
use crate::protocol::responses::{ACTION_OK, DIR_CREATED, NEED_FILE_INFO};

impl FtpClient {
    /// Renames `from` to `to` (`RNFR` then `RNTO`).
    ///
    /// Both steps run under one lock acquisition, so no other command can
    /// slip in between them.
    pub async fn rename(&self, from: &str, to: &str) -> FtpResult<()> {
        let mut session = self.lock().await;
        let control = &mut session.connection_mut()?.control;
        control
            .expect(Command::RNFR(from.to_string()), NEED_FILE_INFO)
            .await?;
        control.expect(Command::RNTO(to.to_string()), ACTION_OK).await?;
        info!("Renamed {} to {}", from, to);
        Ok(())
    }

    /// Deletes a file (`DELE`).
    pub async fn rm(&self, name: &str) -> FtpResult<()> {
        let mut session = self.lock().await;
        let control = &mut session.connection_mut()?.control;
        control.expect(Command::DELE(name.to_string()), ACTION_OK).await?;
        Ok(())
    }

    /// Removes a directory (`RMD`).
    pub async fn rmdir(&self, name: &str) -> FtpResult<()> {
        let mut session = self.lock().await;
        let control = &mut session.connection_mut()?.control;
        control.expect(Command::RMD(name.to_string()), ACTION_OK).await?;
        Ok(())
    }

    /// Creates a directory (`MKD`).
    pub async fn mkdir(&self, name: &str) -> FtpResult<()> {
        let mut session = self.lock().await;
        let control = &mut session.connection_mut()?.control;
        control
            .expect(Command::MKD(name.to_string()), DIR_CREATED)
            .await?;
        Ok(())
    }
}
