//! File metadata
//!
//! Defines the metadata record returned by `stat` and extended listings.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Type classification of a remote entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FileKind {
    #[default]
    File,
    Directory,
    /// Never produced by this client; kept for callers matching on kinds.
    Symlink,
}

/// Metadata for one remote entry.
///
/// Facts the server did not send stay `None`. Only the kind has a default
/// (a regular file), since every entry has some kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileInfo {
    pub kind: FileKind,
    /// Raw value of the `type` fact (`file`, `dir`, `cdir`, `pdir`, `OS.unix=slink`...).
    pub ftp_type: Option<String>,
    pub size: Option<u64>,
    pub modified: Option<DateTime<Utc>>,
    pub created: Option<DateTime<Utc>>,
    /// Raw `perm` fact, not decoded.
    pub permissions: Option<String>,
    pub media_type: Option<String>,
    pub charset: Option<String>,
    /// `unix.mode`, read as octal (`0755` gives `0o755`), not as a decimal number.
    pub mode: Option<u32>,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
}

impl FileInfo {
    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }

    pub fn is_directory(&self) -> bool {
        self.kind == FileKind::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == FileKind::Symlink
    }
}
