//! TLS helpers for explicit FTPS (RFC 4217).
//!
//! Builds the `tokio_rustls` connector used for the control channel after
//! `AUTH TLS` and for every data channel of a secure session.

use std::io;
use std::sync::Arc;

use log::{info, warn};
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};
use tokio_rustls::TlsConnector;

use crate::transport::stream::FtpStream;

/// Build a connector trusting the webpki roots, or any certificate when
/// `accept_invalid_certs` is set.
pub fn build_connector(accept_invalid_certs: bool) -> TlsConnector {
    let config = if accept_invalid_certs {
        warn!("TLS certificate verification disabled");
        ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyCertificate))
            .with_no_client_auth()
    } else {
        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth()
    };
    TlsConnector::from(Arc::new(config))
}

/// Performs the TLS client handshake over a plain stream.
///
/// The plain stream is consumed; only the returned secure stream may be used
/// afterwards.
pub async fn secure(stream: FtpStream, connector: &TlsConnector, host: &str) -> io::Result<FtpStream> {
    let tcp = match stream {
        FtpStream::Plain(tcp) => tcp,
        FtpStream::Secure(_) => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "stream is already secured",
            ));
        }
    };

    let server_name = ServerName::try_from(host.to_string())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let tls = connector.connect(server_name, tcp).await?;
    info!("TLS established with {}", host);
    Ok(FtpStream::Secure(Box::new(tls)))
}

/// Verifier that accepts every server certificate (self-signed FTPS servers).
#[derive(Debug)]
struct AcceptAnyCertificate;

impl ServerCertVerifier for AcceptAnyCertificate {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        rustls::crypto::ring::default_provider()
            .signature_verification_algorithms
            .supported_schemes()
    }
}
