//! Client session management
//!
//! Handles the control connection, session state, the command serializer
//! and the connect/close lifecycle.

pub mod control;
pub mod lock;
pub mod session;
pub mod state;

pub use lock::{CommandSerializer, SerialGuard};
pub use session::FtpClient;
pub use state::SessionState;
