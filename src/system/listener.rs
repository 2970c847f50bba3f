//! Request Servicing
//!
//! The socket-facing half of the listener: reads one request off an
//! accepted connection, routes it, and writes the HTTP/1.0 response. The
//! parsing and routing logic lives in `locator_core::http`; this module
//! owns only the byte shuffling.
//!
//! Servicing never mutates device state. A route that asks for a state
//! change is reported back as a [`Command`] for the control loop to apply.

use core::fmt::Write as _;
use defmt::warn;
use embassy_net::tcp::{Error, TcpSocket};
use heapless::String;
use locator_core::http::{parse_request_line, render_status, Command, Route, StatusView};

/// Control page served at `/`
const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Requests longer than this are answered as malformed
const MAX_REQUEST: usize = 512;

/// Services one accepted connection end to end.
///
/// Returns the command the request asked for, if any. Read/write failures
/// and malformed requests abort the exchange; the connection is the
/// caller's to close either way.
pub async fn serve(
    socket: &mut TcpSocket<'_>,
    status: StatusView,
) -> Result<Option<Command>, Error> {
    let mut request = [0u8; MAX_REQUEST];
    let mut len = 0;

    // Read until the header block terminator; any body is ignored.
    loop {
        match socket.read(&mut request[len..]).await? {
            0 => break,
            n => len += n,
        }
        if request[..len].windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
        if len == request.len() {
            warn!("oversized request dropped");
            return Ok(None);
        }
    }

    let Some((method, path)) = parse_request_line(&request[..len]) else {
        warn!("malformed request dropped");
        return Ok(None);
    };
    if method != "GET" {
        write_response(socket, "404 Not Found", "text/html", "").await?;
        return Ok(None);
    }

    match Route::for_path(path) {
        Route::Index => {
            write_response(socket, "200 OK", "text/html", INDEX_HTML).await?;
            Ok(None)
        }
        Route::Find => {
            write_response(socket, "200 OK", "text/plain", "finding\n").await?;
            Ok(Some(Command::ArmFind))
        }
        Route::Stop => {
            write_response(socket, "200 OK", "text/plain", "stopped\n").await?;
            Ok(Some(Command::StopFind))
        }
        Route::Status => {
            let mut body: String<96> = String::new();
            if render_status(&mut body, &status).is_ok() {
                write_response(socket, "200 OK", "application/json", &body).await?;
            } else {
                write_response(socket, "500 Internal Server Error", "text/plain", "").await?;
            }
            Ok(None)
        }
        Route::NotFound => {
            write_response(socket, "404 Not Found", "text/html", "").await?;
            Ok(None)
        }
    }
}

/// Writes one complete HTTP/1.0 response, header block then body
async fn write_response(
    socket: &mut TcpSocket<'_>,
    status_line: &str,
    content_type: &str,
    body: &str,
) -> Result<(), Error> {
    let mut header: String<128> = String::new();
    if write!(
        header,
        "HTTP/1.0 {}\r\nContent-Type: {}\r\nConnection: close\r\n\r\n",
        status_line, content_type
    )
    .is_err()
    {
        // Header overflow is a bug in our own constants; still answer.
        header.clear();
        let _ = header.push_str("HTTP/1.0 500 Internal Server Error\r\n\r\n");
    }
    write_all(socket, header.as_bytes()).await?;
    write_all(socket, body.as_bytes()).await
}

/// Writes a full buffer, resuming after partial writes
async fn write_all(socket: &mut TcpSocket<'_>, mut data: &[u8]) -> Result<(), Error> {
    while !data.is_empty() {
        let n = socket.write(data).await?;
        data = &data[n..];
    }
    Ok(())
}
