//! Listing support
//!
//! Parses machine-readable listings (MLST/MLSD facts) and FTP timestamps
//! into file metadata.

pub mod file_info;
pub mod mlst;
pub mod timestamp;

pub use file_info::{FileInfo, FileKind};
pub use mlst::parse_entry;
pub use timestamp::parse_timestamp;
