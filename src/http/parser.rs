use crate::http::request::Request;
use thiserror::Error;

const CRLF: &[u8] = b"\r\n";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No CRLF yet; more bytes are needed
    #[error("request line incomplete")]
    Incomplete,
    #[error("request line is not valid UTF-8")]
    InvalidEncoding,
    #[error("malformed request line: {0:?}")]
    Malformed(String),
}

/// Parses the request line at the start of `buf`.
///
/// On success returns the request and the number of bytes consumed,
/// including the terminating CRLF. Anything after the first line is
/// ignored.
pub fn parse_request_line(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let line_end = find_line_end(buf).ok_or(ParseError::Incomplete)?;
    let request = parse_line(&buf[..line_end])?;
    Ok((request, line_end + CRLF.len()))
}

/// Parses `line` as a complete request line, without requiring a CRLF.
///
/// Used when the peer stops sending before terminating the line.
pub fn parse_line(line: &[u8]) -> Result<Request, ParseError> {
    let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidEncoding)?;

    let mut parts = line.split(' ');
    let method = parts.next().unwrap_or_default();
    let target = parts
        .next()
        .ok_or_else(|| ParseError::Malformed(line.to_string()))?;
    let version = parts.next().unwrap_or_default();

    if method.is_empty() || target.is_empty() {
        return Err(ParseError::Malformed(line.to_string()));
    }

    Ok(Request::new(method, target, version))
}

fn find_line_end(buf: &[u8]) -> Option<usize> {
    buf.windows(CRLF.len()).position(|w| w == CRLF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_request_line(req).unwrap();

        assert_eq!(parsed.method, "GET");
        assert_eq!(parsed.target, "/");
        assert_eq!(consumed, "GET / HTTP/1.1\r\n".len());
    }

    #[test]
    fn finds_first_crlf_only() {
        assert_eq!(find_line_end(b"a\r\nb\r\n"), Some(1));
        assert_eq!(find_line_end(b"a\rb\n"), None);
    }
}
