// core/tests/common/mod.rs
#![allow(dead_code)]

use codem_core::rpc::framing::{read_message, write_message, Framing};
use codem_core::{ClientConfig, PlayerClient, Request};
use serde_json::Value;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Stand-in for the music player: answers every connection with the
/// handler's reply and records the requests it saw.
pub struct ReferencePeer {
    addr: SocketAddr,
    framing: Framing,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl ReferencePeer {
    pub fn start<F>(framing: Framing, handler: F) -> Self
    where
        F: Fn(&Request) -> Value + Send + 'static,
    {
        Self::start_raw(framing, move |request| {
            serde_json::to_vec(&handler(request)).expect("reply must serialize")
        })
    }

    /// Like `start`, but the handler returns the exact reply payload bytes.
    pub fn start_raw<F>(framing: Framing, handler: F) -> Self
    where
        F: Fn(&Request) -> Vec<u8> + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind reference peer");
        let addr = listener.local_addr().expect("peer address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        let handler: Box<dyn Fn(&Request) -> Vec<u8> + Send> = Box::new(handler);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let Some(request) = read_request(&mut stream, framing) else {
                    continue;
                };
                let reply = handler(&request);
                seen.lock().unwrap().push(request);
                let _ = write_message(&mut stream, framing, &reply);
                // Dropping the stream closes it, which ends an EOF-framed reply.
            }
        });

        ReferencePeer {
            addr,
            framing,
            requests,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new("127.0.0.1", self.addr.port(), Duration::from_secs(2))
            .with_framing(self.framing)
            .with_poll_interval(Duration::from_millis(50))
    }

    pub fn client(&self) -> PlayerClient {
        PlayerClient::new(self.config())
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.command).collect()
    }
}

fn read_request(stream: &mut TcpStream, framing: Framing) -> Option<Request> {
    match framing {
        Framing::LengthPrefixed => {
            let payload = read_message(stream, framing).ok()?;
            serde_json::from_slice(&payload).ok()
        }
        Framing::Eof => {
            // The request is unframed: read until it parses.
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = stream.read(&mut chunk).ok()?;
                if n == 0 {
                    return None;
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Ok(request) = serde_json::from_slice(&buf) {
                    return Some(request);
                }
            }
        }
    }
}

/// A port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("address").port();
    drop(listener);
    port
}

/// Accepts connections and never answers them.
pub fn silent_peer() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind silent peer");
    let addr = listener.local_addr().expect("address");
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    addr
}

/// Reads one length-prefixed request, answers with `reply` verbatim and
/// closes. Returns the port.
pub fn one_shot_peer(reply: Vec<u8>) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind one-shot peer");
    let port = listener.local_addr().expect("address").port();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let _ = read_message(&mut stream, Framing::LengthPrefixed);
            let _ = stream.write_all(&reply);
        }
    });
    port
}
