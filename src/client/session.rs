//! Client session
//!
//! `FtpClient` owns the serialized session state and performs the connect
//! handshake. Navigation, storage, metadata and transfer operations are
//! implemented on it in their own modules.

use log::{debug, info, warn};

use crate::client::control::{ControlChannel, expect_code};
use crate::client::lock::{CommandSerializer, SerialGuard};
use crate::client::state::{Connection, SessionState};
use crate::config::ConnectionOptions;
use crate::error::FtpResult;
use crate::protocol::responses::{AUTH_PROCEED, LOGGED_IN, NEED_PASS, OK, READY};
use crate::protocol::{Command, Feature, FeatureMatrix, TransferType};
use crate::transport::build_connector;

/// FTP reply code of a successful FEAT
const FEATURES_LISTED: u16 = 211;

/// An FTP/FTPS client session.
///
/// Every public operation takes the session lock first and releases it on
/// every exit path, so operations issued from several tasks run one at a
/// time in the order they were issued.
pub struct FtpClient {
    host: String,
    options: ConnectionOptions,
    pub(crate) session: CommandSerializer<SessionState>,
}

impl FtpClient {
    /// Creates an unconnected client for `host`.
    pub fn new(host: impl Into<String>, options: ConnectionOptions) -> Self {
        Self {
            host: host.into(),
            options,
            session: CommandSerializer::new(SessionState::Disconnected),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    /// Takes the session lock.
    pub(crate) async fn lock(&self) -> SerialGuard<'_, SessionState> {
        self.session.acquire().await
    }

    /// Connects, negotiates features, optionally secures the control channel,
    /// logs in and switches to binary mode.
    ///
    /// On failure the half-open connection is dropped and the session stays
    /// disconnected.
    pub async fn connect(&self) -> FtpResult<()> {
        let mut session = self.lock().await;
        if let Some(previous) = session.take_connection() {
            warn!("Replacing existing connection to {}", self.host);
            previous.control.shutdown().await;
        }

        let connection = self.handshake().await?;
        *session = SessionState::Connected(connection);
        Ok(())
    }

    async fn handshake(&self) -> FtpResult<Connection> {
        let mut control = ControlChannel::connect(&self.host, self.options.port).await?;

        // 1. Wait for server hello message
        let greeting = control.read_reply().await?;
        expect_code(greeting, READY)?;

        // 2. Discover features
        let feat = control.command(Command::FEAT).await?;
        let features = if feat.code == FEATURES_LISTED {
            FeatureMatrix::from_feat_reply(&feat.message)
        } else {
            debug!("FEAT not supported ({}), assuming no features", feat.code);
            FeatureMatrix::default()
        };

        // 3. Explicit TLS
        let mut tls = None;
        if self.options.secure {
            if !features.supports_tls() {
                warn!("Server does not advertise AUTH TLS yet it was requested, attempting anyway");
            }
            control.expect(Command::AUTH("TLS".into()), AUTH_PROCEED).await?;

            let connector = build_connector(self.options.accept_invalid_certs);
            control = control.upgrade(&connector).await?;

            if !features.has(Feature::Prot) {
                warn!("Server does not advertise PROT yet TLS was requested, attempting anyway");
            }
            if features.has(Feature::Pbsz) {
                control.expect(Command::PBSZ(0), OK).await?;
            }
            control.expect(Command::PROT('P'), OK).await?;
            tls = Some(connector);
        }

        // 4. Login
        let reply = control
            .command(Command::USER(self.options.user.clone()))
            .await?;
        if reply.code != LOGGED_IN {
            expect_code(reply, NEED_PASS)?;
            control
                .expect(Command::PASS(self.options.pass.clone()), LOGGED_IN)
                .await?;
        }

        // 5. Binary mode
        control
            .expect(Command::TYPE(TransferType::Binary), OK)
            .await?;

        info!(
            "Logged in to {}:{} as {}{}",
            self.host,
            self.options.port,
            self.options.user,
            if control.is_secure() { " (TLS)" } else { "" }
        );

        Ok(Connection {
            control,
            features,
            tls,
        })
    }

    /// The features the server advertised during `connect`.
    pub async fn features(&self) -> FtpResult<FeatureMatrix> {
        let mut session = self.lock().await;
        Ok(session.connection_mut()?.features.clone())
    }

    pub async fn is_connected(&self) -> bool {
        self.lock().await.is_connected()
    }

    /// Tears down the data and control connections.
    ///
    /// Safe to call when never connected. Waits for the session lock, so an
    /// outstanding [`DataTransfer`](crate::transfer::DataTransfer) must be
    /// finalized or dropped first.
    pub async fn close(&self) {
        let mut session = self.lock().await;
        drop(session.close_data());
        match session.take_connection() {
            Some(connection) => {
                connection.control.shutdown().await;
                info!("Closed connection to {}", self.host);
            }
            None => debug!("close() on a session that was not connected"),
        }
    }
}
