//! Control channel
//!
//! Sends commands and reads replies over the control connection, keeping
//! any bytes read past the end of a reply for the next one.

use log::{debug, warn};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_rustls::TlsConnector;

use crate::error::{FtpClientError, FtpResult};
use crate::protocol::{Command, Reply, parse_reply, reply_end};
use crate::transport::{self, FtpStream};

const READ_CHUNK: usize = 4096;

/// The command/reply connection to the server.
pub struct ControlChannel {
    stream: FtpStream,
    host: String,
    buffer: Vec<u8>,
    /// Closing replies of abandoned transfers still owed by the server.
    pending_replies: usize,
}

impl ControlChannel {
    /// Opens the control connection to `host:port`.
    pub async fn connect(host: &str, port: u16) -> FtpResult<Self> {
        let stream = FtpStream::connect(host, port).await?;
        Ok(Self {
            stream,
            host: host.to_string(),
            buffer: Vec::new(),
            pending_replies: 0,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn is_secure(&self) -> bool {
        self.stream.is_secure()
    }

    /// Upgrades the connection to TLS in place of the plaintext one.
    ///
    /// Consumes the channel: the plaintext stream and any buffered bytes are
    /// gone once this returns.
    pub async fn upgrade(self, connector: &TlsConnector) -> FtpResult<Self> {
        if !self.buffer.is_empty() {
            warn!(
                "Discarding {} unread bytes before TLS upgrade",
                self.buffer.len()
            );
        }
        let stream = transport::secure(self.stream, connector, &self.host).await?;
        Ok(Self {
            stream,
            host: self.host,
            buffer: Vec::new(),
            pending_replies: self.pending_replies,
        })
    }

    /// Reads one complete reply.
    pub async fn read_reply(&mut self) -> FtpResult<Reply> {
        loop {
            // Drop stray line terminators left between replies.
            let stray = self
                .buffer
                .iter()
                .take_while(|&&b| b == b'\r' || b == b'\n')
                .count();
            self.buffer.drain(..stray);

            if let Some(end) = reply_end(&self.buffer) {
                let raw: Vec<u8> = self.buffer.drain(..end).collect();
                return self.finish_reply(&raw);
            }

            let mut chunk = [0u8; READ_CHUNK];
            let n = self.stream.read(&mut chunk).await?;
            if n == 0 {
                if self.buffer.is_empty() {
                    return Err(FtpClientError::Transport(std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        "control connection closed by server",
                    )));
                }
                // Whatever is left is the last reply, even without a newline.
                let raw = std::mem::take(&mut self.buffer);
                return self.finish_reply(&raw);
            }
            self.buffer.extend_from_slice(&chunk[..n]);
        }
    }

    fn finish_reply(&self, raw: &[u8]) -> FtpResult<Reply> {
        let reply = parse_reply(&String::from_utf8_lossy(raw))?;
        debug!("<<< {} {}", reply.code, reply.message);
        Ok(reply)
    }

    /// Sends a command and reads its reply.
    pub async fn command(&mut self, command: Command) -> FtpResult<Reply> {
        self.drain_pending().await?;
        debug!(">>> {}", command);
        self.stream.write_all(command.to_wire().as_bytes()).await?;
        self.stream.flush().await?;
        self.read_reply().await
    }

    /// Sends a command and requires `expected` as the reply code.
    pub async fn expect(&mut self, command: Command, expected: u16) -> FtpResult<Reply> {
        let reply = self.command(command).await?;
        expect_code(reply, expected)
    }

    /// Records a closing reply that nobody is going to read.
    pub fn owe_reply(&mut self) {
        self.pending_replies += 1;
    }

    async fn drain_pending(&mut self) -> FtpResult<()> {
        while self.pending_replies > 0 {
            self.pending_replies -= 1;
            let stale = self.read_reply().await?;
            debug!("Discarded stale reply {} {}", stale.code, stale.message);
        }
        Ok(())
    }

    /// Closes the connection.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            debug!("Control connection shutdown: {}", e);
        }
    }
}

/// Passes `reply` through when it carries `expected`, else a protocol error.
pub fn expect_code(reply: Reply, expected: u16) -> FtpResult<Reply> {
    if reply.code == expected {
        Ok(reply)
    } else {
        Err(FtpClientError::unexpected(expected, reply))
    }
}
