//! Module `state`
//!
//! Session state variants. Each variant carries only the handles that are
//! valid in it, so a data socket can only exist next to a live control
//! connection.

use tokio_rustls::TlsConnector;

use crate::client::control::ControlChannel;
use crate::error::{FtpClientError, FtpResult};
use crate::protocol::FeatureMatrix;
use crate::transport::FtpStream;

/// An established, logged-in control connection.
pub struct Connection {
    pub control: ControlChannel,
    pub features: FeatureMatrix,
    /// Present when the session is secure; data channels are wrapped with it.
    pub tls: Option<TlsConnector>,
}

/// Lifecycle of a session.
#[derive(Default)]
pub enum SessionState {
    #[default]
    Disconnected,
    Connected(Connection),
    DataChannelOpen {
        connection: Connection,
        data: FtpStream,
    },
}

impl SessionState {
    /// The live connection, or `NotInitialized` before `connect` / after `close`.
    pub fn connection_mut(&mut self) -> FtpResult<&mut Connection> {
        match self {
            SessionState::Connected(connection)
            | SessionState::DataChannelOpen { connection, .. } => Ok(connection),
            SessionState::Disconnected => Err(FtpClientError::NotInitialized),
        }
    }

    /// The open data socket, if any.
    pub fn data_mut(&mut self) -> Option<&mut FtpStream> {
        match self {
            SessionState::DataChannelOpen { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Moves to `DataChannelOpen` with `data`, replacing any previous data socket.
    pub fn open_data(&mut self, data: FtpStream) -> FtpResult<()> {
        match std::mem::take(self) {
            SessionState::Connected(connection)
            | SessionState::DataChannelOpen { connection, .. } => {
                *self = SessionState::DataChannelOpen { connection, data };
                Ok(())
            }
            SessionState::Disconnected => Err(FtpClientError::NotInitialized),
        }
    }

    /// Moves back to `Connected`, handing out the data socket if one was open.
    pub fn close_data(&mut self) -> Option<FtpStream> {
        match std::mem::take(self) {
            SessionState::DataChannelOpen { connection, data } => {
                *self = SessionState::Connected(connection);
                Some(data)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// Tears everything down and returns to `Disconnected`.
    pub fn take_connection(&mut self) -> Option<Connection> {
        match std::mem::take(self) {
            SessionState::Connected(connection)
            | SessionState::DataChannelOpen { connection, .. } => Some(connection),
            SessionState::Disconnected => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        !matches!(self, SessionState::Disconnected)
    }
}
