//! MLST / MLSD entry parser
//!
//! Parses one machine-readable listing line of the form
//! `fact=value;fact=value; pathname` into a name and its [`FileInfo`].

use std::collections::HashMap;

use crate::error::{ParseError, ParseTarget};
use crate::listing::file_info::{FileInfo, FileKind};
use crate::listing::timestamp::parse_timestamp;

/// Parses one MLST/MLSD entry.
///
/// The fact list ends at the first space; everything after it is the name.
/// Fact keys are case-insensitive and unknown facts are ignored.
pub fn parse_entry(line: &str) -> Result<(String, FileInfo), ParseError> {
    let invalid = || ParseError::new(ParseTarget::FactList, line);
    let (facts, name) = line.trim_start().split_once(' ').ok_or_else(invalid)?;
    let name = name.trim_end_matches(['\r', '\n']);
    if name.is_empty() {
        return Err(invalid());
    }

    let mut values = HashMap::new();
    for fact in facts.split(';').filter(|f| !f.is_empty()) {
        let (key, value) = fact.split_once('=').ok_or_else(invalid)?;
        values.insert(key.to_ascii_lowercase(), value);
    }

    let mut info = FileInfo::default();

    if let Some(kind) = values.get("type") {
        if kind.eq_ignore_ascii_case("file") {
            info.kind = FileKind::File;
        } else if ["dir", "cdir", "pdir"]
            .iter()
            .any(|dir| kind.eq_ignore_ascii_case(dir))
        {
            info.kind = FileKind::Directory;
        }
        info.ftp_type = Some(kind.to_string());
    }
    if let Some(modify) = values.get("modify") {
        info.modified = Some(parse_timestamp(modify)?);
    }
    if let Some(create) = values.get("create") {
        info.created = Some(parse_timestamp(create)?);
    }
    if let Some(perm) = values.get("perm") {
        info.permissions = Some(perm.to_string());
    }
    // Only a positive size is taken as a known size.
    if let Some(size) = values.get("size").and_then(|s| s.parse::<u64>().ok()) {
        if size > 0 {
            info.size = Some(size);
        }
    }
    if let Some(media_type) = values.get("media-type") {
        info.media_type = Some(media_type.to_string());
    }
    if let Some(charset) = values.get("charset") {
        info.charset = Some(charset.to_string());
    }
    info.mode = values
        .get("unix.mode")
        .and_then(|m| u32::from_str_radix(m, 8).ok());
    info.uid = values.get("unix.uid").and_then(|u| u.parse().ok());
    info.gid = values.get("unix.gid").and_then(|g| g.parse().ok());

    Ok((name.to_string(), info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_file_entry() {
        let (name, info) = parse_entry("type=file;size=11;modify=20240101120000; test.txt").unwrap();
        assert_eq!(name, "test.txt");
        assert!(info.is_file());
        assert_eq!(info.size, Some(11));
        let mtime = info.modified.unwrap();
        assert_eq!((mtime.year(), mtime.month(), mtime.day()), (2024, 1, 1));
        assert_eq!((mtime.hour(), mtime.minute(), mtime.second()), (12, 0, 0));
        assert_eq!(info.created, None);
    }

    #[test]
    fn test_directory_types() {
        for kind in ["dir", "cdir", "pdir", "DIR"] {
            let (_, info) = parse_entry(&format!("type={};perm=el; pub", kind)).unwrap();
            assert!(info.is_directory(), "{}", kind);
            assert_eq!(info.permissions.as_deref(), Some("el"));
        }
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let (_, info) =
            parse_entry("Type=dir;Modify=20230102030405;UNIX.mode=0755;UNIX.uid=1000;unix.gid=100; src")
                .unwrap();
        assert!(info.is_directory());
        assert!(info.modified.is_some());
        assert_eq!(info.mode, Some(0o755));
        assert_eq!(info.uid, Some(1000));
        assert_eq!(info.gid, Some(100));
    }

    #[test]
    fn test_zero_size_is_unknown() {
        let (_, info) = parse_entry("type=file;size=0; empty").unwrap();
        assert_eq!(info.size, None);
    }

    #[test]
    fn test_unknown_facts_ignored_and_name_kept() {
        let (name, info) =
            parse_entry("type=file;x.custom=1;media-type=text/plain;charset=UTF-8; a; b.txt").unwrap();
        assert_eq!(name, "a; b.txt");
        assert_eq!(info.media_type.as_deref(), Some("text/plain"));
        assert_eq!(info.charset.as_deref(), Some("UTF-8"));
    }

    #[test]
    fn test_leading_space_from_mlst_reply() {
        let (name, info) = parse_entry(" type=file;size=5; /home/a.txt").unwrap();
        assert_eq!(name, "/home/a.txt");
        assert_eq!(info.size, Some(5));
    }

    #[test]
    fn test_malformed_entries() {
        assert!(parse_entry("type=file;size=1").is_err());
        assert!(parse_entry("type;size=1; x").is_err());
        assert!(parse_entry("type=file;modify=someday; x").is_err());
    }
}
