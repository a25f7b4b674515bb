//! Navigation operations implementation

use std::sync::LazyLock;

use regex::Regex;

use crate::client::FtpClient;
use crate::error::{FtpResult, ParseError, ParseTarget};
use crate::protocol::Command;
use crate::protocol::responses::{ACTION_OK, DIR_CREATED};

static QUOTED_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(.+)""#).expect("path pattern is valid"));

/// Extracts the quoted directory from a 257 reply message.
pub fn parse_pwd(message: &str) -> Result<String, ParseError> {
    QUOTED_PATH
        .captures(message)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| ParseError::new(ParseTarget::WorkingDirectory, message))
}

impl FtpClient {
    /// Current working directory (`PWD`).
    pub async fn cwd(&self) -> FtpResult<String> {
        let mut session = self.lock().await;
        let control = &mut session.connection_mut()?.control;
        let reply = control.expect(Command::PWD, DIR_CREATED).await?;
        Ok(parse_pwd(&reply.message)?)
    }

    /// Changes the working directory, like `cd`.
    pub async fn chdir(&self, path: &str) -> FtpResult<()> {
        let mut session = self.lock().await;
        let control = &mut session.connection_mut()?.control;
        control.expect(Command::CWD(path.to_string()), ACTION_OK).await?;
        Ok(())
    }

    /// Moves to the parent directory, like `cd ..`.
    pub async fn cdup(&self) -> FtpResult<()> {
        let mut session = self.lock().await;
        let control = &mut session.connection_mut()?.control;
        control.expect(Command::CDUP, ACTION_OK).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pwd() {
        assert_eq!(
            parse_pwd(r#""/home/ftp" is the current directory"#).unwrap(),
            "/home/ftp"
        );
        assert_eq!(parse_pwd(r#""/""#).unwrap(), "/");
    }

    #[test]
    fn test_parse_pwd_without_quotes() {
        let err = parse_pwd("/home/ftp").unwrap_err();
        assert_eq!(err.target, ParseTarget::WorkingDirectory);
        assert!(parse_pwd(r#""" empty"#).is_err());
    }
}
