use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::time::Duration;

use crate::session::EditorSession;

pub mod api;
pub mod routes;

/// Largest request body accepted; anything declaring more is refused unread.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;
/// A stalled client is dropped after this long so the next request can be served.
pub const IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Everything a request handler may touch. Requests are served one at a time, so the
/// session needs no locking.
pub struct AppState {
    pub session: EditorSession,
    pub remote_url: String,
}

impl AppState {
    pub fn new(session: EditorSession, remote_url: impl Into<String>) -> Self {
        AppState {
            session,
            remote_url: remote_url.into(),
        }
    }
}

pub fn run_server(bind_addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    serve(listener, state)
}

/// Accept loop over an already bound listener. Requests are handled one at a time.
pub fn serve(listener: TcpListener, mut state: AppState) -> std::io::Result<()> {
    let bind_addr = listener.local_addr()?;
    tracing::info!(
        %bind_addr,
        records = state.session.catalog().len(),
        "cordata server listening"
    );

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream, &mut state) {
                    tracing::warn!(error = %err, "request error");
                }
            }
            Err(err) => tracing::warn!(error = %err, "connection failed"),
        }
    }

    Ok(())
}

fn handle_connection(stream: &mut TcpStream, state: &mut AppState) -> std::io::Result<()> {
    stream.set_read_timeout(Some(IO_TIMEOUT))?;
    stream.set_write_timeout(Some(IO_TIMEOUT))?;
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    if reader.read_line(&mut request_line)? == 0 {
        return Ok(());
    }
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET").to_string();
    let path = request_parts.next().unwrap_or("/").to_string();

    let mut content_length: Option<u64> = Some(0);
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            break;
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().ok();
            }
        }
    }

    let Some(content_length) = content_length else {
        return reply(stream, routes::bad_request("Invalid Content-Length header"));
    };
    if content_length > MAX_BODY_BYTES as u64 {
        tracing::warn!(%method, %path, bytes = content_length, "request body too large");
        return reply(stream, routes::payload_too_large(MAX_BODY_BYTES));
    }

    let mut body = Vec::new();
    reader.by_ref().take(content_length).read_to_end(&mut body)?;
    if (body.len() as u64) < content_length {
        return reply(stream, routes::bad_request("Request body shorter than Content-Length"));
    }
    let body = String::from_utf8_lossy(&body);

    tracing::debug!(%method, %path, bytes = content_length, "request");
    reply(stream, routes::route_request(state, &method, &path, &body))
}

fn reply(stream: &mut TcpStream, response: routes::HttpResponse) -> std::io::Result<()> {
    stream.write_all(response.to_http_string().as_bytes())?;
    stream.flush()
}
