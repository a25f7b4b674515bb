//! RAX FTP Client
//!
//! An async FTP/FTPS client: explicit TLS, passive (PASV/EPSV) data
//! channels, MLST/MLSD listings and FIFO-serialized commands over one
//! control connection.

pub mod client;
pub mod config;
pub mod error;
pub mod listing;
pub mod navigate;
pub mod protocol;
pub mod storage;
pub mod transfer;
pub mod transport;
pub mod utils;

pub use client::FtpClient;
pub use config::{ClientConfig, ConnectionOptions};
pub use error::{FtpClientError, FtpResult, ParseError, ProtocolError};
pub use listing::{FileInfo, FileKind};
pub use transfer::DataTransfer;
