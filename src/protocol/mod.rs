//! FTP Protocol implementation
//!
//! Handles command serialization, reply framing and parsing, and the
//! server feature matrix.

pub mod commands;
pub mod features;
pub mod parser;
pub mod responses;

pub use commands::{Command, TransferType};
pub use features::{Feature, FeatureMatrix};
pub use parser::{parse_reply, reply_end};
pub use responses::Reply;
