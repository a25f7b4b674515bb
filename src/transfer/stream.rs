//! Live data transfers
//!
//! A [`DataTransfer`] is the caller's handle on an open data channel. It keeps
//! the session locked until it is finished or dropped.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, ReadBuf};

use crate::client::SerialGuard;
use crate::client::control::expect_code;
use crate::client::state::SessionState;
use crate::error::FtpResult;
use crate::protocol::responses::DATA_CLOSE;
use crate::transport::FtpStream;

/// An open RETR/STOR data stream.
///
/// Read from it for downloads, write to it for uploads, then call
/// [`finish`](DataTransfer::finish). Dropping it unfinished closes the data
/// socket and the session discards the server's closing reply before the
/// next command.
pub struct DataTransfer<'a> {
    session: SerialGuard<'a, SessionState>,
    finished: bool,
}

impl<'a> DataTransfer<'a> {
    pub(crate) fn new(session: SerialGuard<'a, SessionState>) -> Self {
        Self {
            session,
            finished: false,
        }
    }

    fn data(&mut self) -> io::Result<&mut FtpStream> {
        self.session
            .data_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "data channel is closed"))
    }

    /// Closes the data socket and requires the closing 226 reply.
    pub async fn finish(mut self) -> FtpResult<()> {
        if let Some(mut data) = self.session.close_data() {
            if let Err(e) = data.shutdown().await {
                debug!("Data connection shutdown: {}", e);
            }
        }

        let control = &mut self.session.connection_mut()?.control;
        let reply = control.read_reply().await;
        self.finished = true;
        expect_code(reply?, DATA_CLOSE)?;
        Ok(())
    }
}

impl Drop for DataTransfer<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        drop(self.session.close_data());
        if let Ok(connection) = self.session.connection_mut() {
            warn!("Data transfer dropped before finishing, skipping its closing reply");
            connection.control.owe_reply();
        }
    }
}

impl AsyncRead for DataTransfer<'_> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut().data() {
            Ok(data) => Pin::new(data).poll_read(cx, buf),
            Err(e) => Poll::Ready(Err(e)),
        }
    }
}

impl AsyncWrite for DataTransfer<'_> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut().data() {
            Ok(data) => Pin::new(data).poll_write(cx, buf),
            Err(e) => Poll::Ready(Err(e)),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut().data() {
            Ok(data) => Pin::new(data).poll_flush(cx),
            Err(e) => Poll::Ready(Err(e)),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut().data() {
            Ok(data) => Pin::new(data).poll_shutdown(cx),
            Err(e) => Poll::Ready(Err(e)),
        }
    }
}
