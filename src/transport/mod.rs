//! Transport layer
//!
//! Plain and TLS socket handling shared by the control and data channels.

pub mod stream;
pub mod tls;

pub use stream::{FtpStream, drain};
pub use tls::{build_connector, secure};
