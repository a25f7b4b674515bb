//! Reply parser
//!
//! Frames single- and multi-line replies out of the bytes read from the
//! control channel and turns them into [`Reply`] values.

use crate::error::ProtocolError;
use crate::protocol::Reply;

/// Finds the next line starting at `start`.
///
/// Returns the end of the line content and the offset just past its
/// terminator (`\r\n`, `\n` or `\r`). A `\r` at the very end of the buffer is
/// not treated as a terminator yet since its `\n` may still be in flight.
fn next_line(buf: &[u8], start: usize) -> Option<(usize, usize)> {
    let rel = buf.get(start..)?.iter().position(|&b| b == b'\r' || b == b'\n')?;
    let end = start + rel;
    match (buf[end], buf.get(end + 1)) {
        (b'\r', Some(b'\n')) => Some((end, end + 2)),
        (b'\r', None) => None,
        _ => Some((end, end + 1)),
    }
}

/// Returns the length of the first complete reply in `buf`, if there is one.
///
/// A reply whose first line has `-` as fourth character is multi-line and
/// ends with the first following line made of the same code followed by a
/// space or by nothing. `CCC-` continuation lines do not end it. Any other
/// reply ends with its first line.
pub fn reply_end(buf: &[u8]) -> Option<usize> {
    let (first_end, mut next) = next_line(buf, 0)?;
    let first = &buf[..first_end];
    if first.get(3) != Some(&b'-') {
        return Some(next);
    }

    let code = &first[..3];
    while let Some((end, after)) = next_line(buf, next) {
        let line = &buf[next..end];
        if line.starts_with(code) && matches!(line.get(3), None | Some(b' ')) {
            return Some(after);
        }
        next = after;
    }
    None
}

/// Drops the leading `CCC ` / `CCC-` prefix.
fn strip_status(line: &str) -> &str {
    line.char_indices()
        .nth(4)
        .map(|(idx, _)| &line[idx..])
        .unwrap_or("")
}

/// Parses one framed reply.
///
/// The code comes from the first three characters of the first line. For
/// multi-line replies the status prefix of the final line is removed as well,
/// interior lines are kept verbatim and all lines are joined with `\r\n`.
pub fn parse_reply(raw: &str) -> Result<Reply, ProtocolError> {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines: Vec<&str> = normalized.split('\n').collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let first = lines
        .first()
        .ok_or_else(|| ProtocolError::MalformedReply(raw.to_string()))?;
    let code = first
        .get(..3)
        .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse::<u16>().ok())
        .ok_or_else(|| ProtocolError::MalformedReply(raw.to_string()))?;

    if lines.len() > 1 {
        let last = lines.len() - 1;
        lines[last] = strip_status(lines[last]);
    }

    let joined = lines.join("\r\n");
    Ok(Reply {
        code,
        message: strip_status(&joined).to_string(),
    })
}
