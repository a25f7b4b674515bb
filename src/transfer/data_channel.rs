//! Module `data_channel`
//!
//! Negotiates passive data connections with PASV or EPSV, opens the data
//! socket, and secures it once the server has accepted the transfer command.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::client::SessionState;
use crate::client::state::Connection;
use crate::error::{FtpClientError, FtpResult, ParseError, ParseTarget};
use crate::protocol::responses::{EXTENDED_PASSIVE, PASSIVE};
use crate::protocol::{Command, Feature};
use crate::transfer::modes::PassiveMode;
use crate::transfer::results::PassiveModeResult;
use crate::transport::{self, FtpStream};

static PASV_TUPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+),(\d+),(\d+),(\d+),(\d+),(\d+)").expect("PASV pattern is valid")
});

/// Parses `h1,h2,h3,h4,p1,p2` out of a 227 reply message.
pub fn parse_pasv(message: &str) -> Result<PassiveModeResult, ParseError> {
    let invalid = || ParseError::new(ParseTarget::PassiveAddress, message);
    let caps = PASV_TUPLE.captures(message).ok_or_else(invalid)?;

    let mut octets = [0u8; 6];
    for (i, octet) in octets.iter_mut().enumerate() {
        *octet = caps[i + 1].parse().map_err(|_| invalid())?;
    }
    let [h1, h2, h3, h4, p1, p2] = octets;

    Ok(PassiveModeResult {
        host: format!("{}.{}.{}.{}", h1, h2, h3, h4),
        port: u16::from(p1) * 256 + u16::from(p2),
    })
}

/// Parses the port out of a 229 reply message, `(<d><af><d><host><d><port><d>)`.
///
/// The delimiter is whatever printable character follows `(`.
pub fn parse_epsv(message: &str) -> Result<u16, ParseError> {
    let invalid = || ParseError::new(ParseTarget::ExtendedPassivePort, message);

    let open = message.find('(').ok_or_else(invalid)?;
    let body = &message[open + 1..];
    let delimiter = body
        .chars()
        .next()
        .filter(|c| ('!'..='~').contains(c))
        .ok_or_else(invalid)?;

    let mut parts = body[delimiter.len_utf8()..].splitn(4, delimiter);
    let (Some(_family), Some(_host), Some(port), Some(tail)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    if !tail.starts_with(')') || port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    port.parse().map_err(|_| invalid())
}

/// Asks for a passive data port and connects to it.
///
/// EPSV is used when advertised, PASV otherwise. The reply code decides
/// which grammar is parsed. The returned stream is always plain; see
/// [`protect`].
pub async fn open_data_channel(connection: &mut Connection) -> FtpResult<FtpStream> {
    let control = &mut connection.control;
    let reply = if connection.features.has(Feature::Epsv) {
        control.expect(Command::EPSV, EXTENDED_PASSIVE).await?
    } else {
        control.command(Command::PASV).await?
    };

    let target = match PassiveMode::from_reply_code(reply.code) {
        Some(PassiveMode::Extended) => PassiveModeResult {
            host: control.host().to_string(),
            port: parse_epsv(&reply.message)?,
        },
        Some(PassiveMode::Classic) => parse_pasv(&reply.message)?,
        None => return Err(FtpClientError::unexpected(PASSIVE, reply)),
    };

    debug!("Opening data connection to {}:{}", target.host, target.port);
    Ok(FtpStream::connect(&target.host, target.port).await?)
}

/// Wraps the open data socket in TLS when the session is secure.
///
/// Called after the preliminary 1xx reply to the transfer command. If the
/// handshake fails the data socket is gone and the transfer's closing reply
/// is left owed on the control channel.
pub async fn protect(session: &mut SessionState) -> FtpResult<()> {
    let connection = session.connection_mut()?;
    let Some(connector) = connection.tls.clone() else {
        return Ok(());
    };
    let host = connection.control.host().to_string();

    let Some(data) = session.close_data() else {
        return Ok(());
    };
    match transport::secure(data, &connector, &host).await {
        Ok(secured) => session.open_data(secured),
        Err(e) => {
            session.connection_mut()?.control.owe_reply();
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pasv() {
        let target = parse_pasv("Entering Passive Mode (192,168,1,1,200,10).").unwrap();
        assert_eq!(target.host, "192.168.1.1");
        assert_eq!(target.port, 51210);
    }

    #[test]
    fn test_parse_pasv_rejects_bad_tuples() {
        assert!(parse_pasv("Entering Passive Mode").is_err());
        assert!(parse_pasv("Entering Passive Mode (192,168,1,1,200)").is_err());

        let err = parse_pasv("(192,168,1,300,200,10)").unwrap_err();
        assert_eq!(err.target, ParseTarget::PassiveAddress);
    }

    #[test]
    fn test_parse_epsv() {
        assert_eq!(parse_epsv("Entering Extended Passive Mode (|||51210|)").unwrap(), 51210);
        assert_eq!(parse_epsv("Entering Extended Passive Mode (!!!6446!)").unwrap(), 6446);
        assert_eq!(parse_epsv("EPSV ok (|2|::1|4000|)").unwrap(), 4000);
    }

    #[test]
    fn test_parse_epsv_rejects_bad_grammar() {
        assert!(parse_epsv("Entering Extended Passive Mode").is_err());
        assert!(parse_epsv("(||||)").is_err());
        assert!(parse_epsv("(|||51210)").is_err());
        assert!(parse_epsv("(|||5x210|)").is_err());
        assert!(parse_epsv("(|||99999|)").is_err());
        assert!(parse_epsv("( 51210 )").is_err());
    }
}
