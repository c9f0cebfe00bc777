// core/src/rpc/mod.rs
pub mod framing;
pub mod message;

use crate::error::{ClientError, CommunicationError, Result};
use crate::utils::config::ClientConfig;
use framing::{read_message, write_message, Framing};
use message::{Request, Response};
use std::io::{self, ErrorKind};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Sends a request over a fresh connection and waits for the reply.
///
/// The connection is dropped before returning, on success and on error.
pub fn request_reply(config: &ClientConfig, request: &Request) -> Result<Response> {
    let host = config.host.as_str();
    let port = config.port;

    let mut stream = connect(host, port, config.timeout()).map_err(|source| {
        log::warn!("Failed to connect to {}:{}: {}", host, port, source);
        ClientError::ConnectionFailure {
            host: host.to_string(),
            port,
            source,
        }
    })?;
    log::debug!(
        "Connected to {}:{}, sending '{}'",
        host,
        port,
        request.command
    );

    exchange(&mut stream, config.framing, request).map_err(|e| {
        log::warn!("Request '{}' to {}:{} failed: {}", request.command, host, port, e);
        match e {
            CommunicationError::Io(source) if is_timeout(&source) => {
                ClientError::ConnectionFailure {
                    host: host.to_string(),
                    port,
                    source,
                }
            }
            source => ClientError::CommunicationFailure {
                host: host.to_string(),
                port,
                source,
            },
        }
    })
}

/// Tries every resolved address in turn with the given timeout.
fn connect(host: &str, port: u16, timeout: Duration) -> io::Result<TcpStream> {
    let mut last_error = None;

    for addr in (host, port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => {
                stream.set_read_timeout(Some(timeout))?;
                stream.set_write_timeout(Some(timeout))?;
                return Ok(stream);
            }
            Err(e) => {
                log::debug!("Connect attempt to {} failed: {}", addr, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        io::Error::new(
            ErrorKind::NotFound,
            format!("no addresses resolved for {}", host),
        )
    }))
}

fn exchange(
    stream: &mut TcpStream,
    framing: Framing,
    request: &Request,
) -> std::result::Result<Response, CommunicationError> {
    let payload = request.encode()?;
    write_message(stream, framing, &payload)?;

    let reply = read_message(stream, framing)?;
    log::debug!(
        "Sent {} bytes, received {} bytes ({} framing)",
        payload.len(),
        reply.len(),
        framing
    );

    Response::decode(&reply)
}

// Socket read/write timeouts surface as WouldBlock on Unix and TimedOut on Windows.
fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock)
}
