// Newline-delimited framing over any `BufRead` / `Write` pair.
//
// Each message is one UTF-8 line terminated by `\n` (a trailing `\r` is
// tolerated on input). `read_line` returns `Ok(None)` on a clean EOF, which is
// how both ends detect a disconnected peer: an empty read where a line was
// expected.
//
// `MAX_LINE_SIZE` (64 KB) bounds the buffer a peer can make us allocate. The
// largest legitimate line is a board observation; a 6×6 board is well under
// 200 bytes. An oversized line is an `io::Error` whose inner error is
// `ProtocolError::LineTooLong`.

use std::io::{self, BufRead, Read, Write};

use serde::Serialize;

use crate::error::ProtocolError;

/// Maximum accepted line length in bytes, excluding the `\n` or `\r\n`.
pub const MAX_LINE_SIZE: usize = 64 * 1024;

/// Read one line. Returns `Ok(None)` if the stream is already at EOF.
///
/// Returns `InvalidData` if the line exceeds `MAX_LINE_SIZE` or is not UTF-8.
pub fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    let mut limited = (&mut *reader).take(MAX_LINE_SIZE as u64 + 2);
    let n = limited.read_until(b'\n', &mut buf)?;
    if n == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    if buf.len() > MAX_LINE_SIZE {
        return Err(io::Error::new(io::ErrorKind::InvalidData, line_too_long()));
    }
    String::from_utf8(buf)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Write one line and flush. The text must not contain a newline.
pub fn write_line<W: Write>(writer: &mut W, line: &str) -> io::Result<()> {
    if line.contains('\n') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "line contains an embedded newline",
        ));
    }
    if line.len() > MAX_LINE_SIZE {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, line_too_long()));
    }
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

fn line_too_long() -> ProtocolError {
    ProtocolError::LineTooLong {
        limit: MAX_LINE_SIZE,
    }
}

/// Serialize `value` as compact JSON and write it as one line.
pub fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string(value)?;
    write_line(writer, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn roundtrip_simple_line() {
        let mut buf = Vec::new();
        write_line(&mut buf, "placement").unwrap();
        assert_eq!(buf, b"placement\n");

        let mut cursor = Cursor::new(buf);
        assert_eq!(read_line(&mut cursor).unwrap().as_deref(), Some("placement"));
        assert_eq!(read_line(&mut cursor).unwrap(), None);
    }

    #[test]
    fn empty_stream_is_eof() {
        let mut cursor = Cursor::new(Vec::new());
        assert_eq!(read_line(&mut cursor).unwrap(), None);
    }

    #[test]
    fn blank_line_is_not_eof() {
        let mut cursor = Cursor::new(b"\nnext\n".to_vec());
        assert_eq!(read_line(&mut cursor).unwrap().as_deref(), Some(""));
        assert_eq!(read_line(&mut cursor).unwrap().as_deref(), Some("next"));
    }

    #[test]
    fn strips_carriage_return() {
        let mut cursor = Cursor::new(b"Alice\r\n".to_vec());
        assert_eq!(read_line(&mut cursor).unwrap().as_deref(), Some("Alice"));
    }

    #[test]
    fn unterminated_final_line_is_returned() {
        let mut cursor = Cursor::new(b"you_win".to_vec());
        assert_eq!(read_line(&mut cursor).unwrap().as_deref(), Some("you_win"));
        assert_eq!(read_line(&mut cursor).unwrap(), None);
    }

    #[test]
    fn rejects_oversized_read() {
        let mut data = vec![b'x'; MAX_LINE_SIZE + 10];
        data.push(b'\n');
        let mut cursor = Cursor::new(data);
        let err = read_line(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(matches!(
            err.get_ref().and_then(|e| e.downcast_ref::<ProtocolError>()),
            Some(ProtocolError::LineTooLong {
                limit: MAX_LINE_SIZE
            })
        ));
    }

    #[test]
    fn rejects_one_byte_over_limit_with_crlf() {
        let mut data = vec![b'x'; MAX_LINE_SIZE + 1];
        data.extend_from_slice(b"\r\n");
        let mut cursor = Cursor::new(data);
        let err = read_line(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn accepts_line_at_size_limit() {
        let mut data = vec![b'x'; MAX_LINE_SIZE];
        data.push(b'\n');
        let mut cursor = Cursor::new(data);
        assert_eq!(read_line(&mut cursor).unwrap().unwrap().len(), MAX_LINE_SIZE);
    }

    #[test]
    fn accepts_crlf_line_at_size_limit() {
        let mut data = vec![b'x'; MAX_LINE_SIZE];
        data.extend_from_slice(b"\r\nnext\n");
        let mut cursor = Cursor::new(data);
        assert_eq!(read_line(&mut cursor).unwrap().unwrap().len(), MAX_LINE_SIZE);
        assert_eq!(read_line(&mut cursor).unwrap().as_deref(), Some("next"));
    }

    #[test]
    fn rejects_oversized_write() {
        let mut buf = Vec::new();
        let err = write_line(&mut buf, &"x".repeat(MAX_LINE_SIZE + 1)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(buf.is_empty());
    }

    #[test]
    fn rejects_embedded_newline_on_write() {
        let mut buf = Vec::new();
        let err = write_line(&mut buf, "a\nb").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(buf.is_empty());
    }

    #[test]
    fn write_json_is_single_line() {
        let mut buf = Vec::new();
        write_json(&mut buf, &serde_json::json!({"height": 6, "width": 6})).unwrap();
        assert_eq!(buf, b"{\"height\":6,\"width\":6}\n");
    }
}
