//! Request Parsing and Routing
//!
//! The wire-format half of the listener that needs no socket: request-line
//! parsing, the exact-match route table, the commands routes hand back to
//! the control loop, and the `/status` payload.
//!
//! A malformed request line (missing terminator, wrong token count,
//! non-UTF-8) parses to nothing; the caller aborts the exchange with no
//! response.

use crate::sample::DistanceSample;
use core::fmt::Write as _;
use defmt::Format;
use heapless::String;

/// State mutation requested by a route, applied by the control loop
#[derive(Debug, Clone, Copy, PartialEq, Format)]
pub enum Command {
    /// `/find`: arm the find request
    ArmFind,
    /// `/stop`: clear the find request and silence the outputs
    StopFind,
}

/// Read-only snapshot rendered by `/status`
#[derive(Debug, Clone, Copy)]
pub struct StatusView {
    pub sample: DistanceSample,
    pub finding: bool,
}

/// Exact-match route table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route {
    Index,
    Find,
    Stop,
    Status,
    NotFound,
}

impl Route {
    pub fn for_path(path: &str) -> Self {
        match path {
            "/" | "/index.html" => Route::Index,
            "/find" => Route::Find,
            "/stop" => Route::Stop,
            "/status" => Route::Status,
            _ => Route::NotFound,
        }
    }
}

/// Extracts the method and path tokens from a raw request.
///
/// Only the first line is inspected; it must be `\r\n`-terminated and
/// carry exactly the `METHOD PATH VERSION` shape. A truncated line (peer
/// closed mid-request) is malformed, not a shorter request.
pub fn parse_request_line(raw: &[u8]) -> Option<(&str, &str)> {
    let line_end = raw.windows(2).position(|w| w == b"\r\n")?;
    let line = core::str::from_utf8(&raw[..line_end]).ok()?;
    let mut tokens = line.split(' ').filter(|t| !t.is_empty());
    let method = tokens.next()?;
    let path = tokens.next()?;
    let _version = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }
    Some((method, path))
}

/// Renders the `/status` body: latest distance (or null) and find state
pub fn render_status(out: &mut String<96>, status: &StatusView) -> core::fmt::Result {
    match status.sample {
        DistanceSample::Centimeters(d) => write!(
            out,
            r#"{{"distance_cm":{:.1},"finding":{}}}"#,
            d, status.finding
        ),
        DistanceSample::NoEcho => {
            write!(out, r#"{{"distance_cm":null,"finding":{}}}"#, status.finding)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_method_and_path() {
        let raw = b"GET /find HTTP/1.1\r\nHost: stick\r\n\r\n";
        assert_eq!(parse_request_line(raw), Some(("GET", "/find")));
    }

    #[test]
    fn parses_without_header_block() {
        assert_eq!(
            parse_request_line(b"GET /status HTTP/1.0\r\n"),
            Some(("GET", "/status"))
        );
    }

    #[test]
    fn rejects_unterminated_line() {
        // Peer closed mid-request; even a token-complete line must not be
        // routed without its terminator.
        assert_eq!(parse_request_line(b"GET /find HT"), None);
        assert_eq!(parse_request_line(b"GET /find HTTP/1.1"), None);
    }

    #[test]
    fn rejects_missing_version() {
        assert_eq!(parse_request_line(b"GET /find\r\n\r\n"), None);
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert_eq!(parse_request_line(b""), None);
        assert_eq!(parse_request_line(b"\r\n\r\n"), None);
        assert_eq!(parse_request_line(&[0xff, 0xfe, b'\r', b'\n']), None);
    }

    #[test]
    fn rejects_extra_tokens() {
        assert_eq!(parse_request_line(b"GET / HTTP/1.1 extra\r\n"), None);
    }

    #[test]
    fn routes_are_exact_match() {
        assert_eq!(Route::for_path("/"), Route::Index);
        assert_eq!(Route::for_path("/index.html"), Route::Index);
        assert_eq!(Route::for_path("/find"), Route::Find);
        assert_eq!(Route::for_path("/stop"), Route::Stop);
        assert_eq!(Route::for_path("/status"), Route::Status);
        assert_eq!(Route::for_path("/bogus"), Route::NotFound);
        assert_eq!(Route::for_path("/find/"), Route::NotFound);
        assert_eq!(Route::for_path(""), Route::NotFound);
    }

    #[test]
    fn status_payload_renders_distance_or_null() {
        let mut body: String<96> = String::new();
        render_status(
            &mut body,
            &StatusView {
                sample: DistanceSample::Centimeters(25.5),
                finding: false,
            },
        )
        .unwrap();
        assert_eq!(body.as_str(), r#"{"distance_cm":25.5,"finding":false}"#);

        body.clear();
        render_status(
            &mut body,
            &StatusView {
                sample: DistanceSample::NoEcho,
                finding: true,
            },
        )
        .unwrap();
        assert_eq!(body.as_str(), r#"{"distance_cm":null,"finding":true}"#);
    }
}
