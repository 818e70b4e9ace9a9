//! Minimal HTTP/1.1 server with scripted per-path replies for integration tests.
//!
//! Each path has a list of replies; the n-th request to a path gets the n-th
//! reply (the last one repeats). Unknown paths get 404. Requests are counted,
//! and the highest number of requests being handled at once is recorded.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn ok(body: &[u8]) -> Self {
        Self {
            status: 200,
            body: body.to_vec(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: b"error".to_vec(),
        }
    }
}

pub struct PdfServer {
    /// e.g. "http://127.0.0.1:12345" (no trailing slash).
    pub origin: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
    load: Arc<Load>,
}

#[derive(Default)]
struct Load {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl PdfServer {
    /// Number of requests served for `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    /// Highest number of requests that were being handled at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.load.peak.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start(routes: Vec<(&str, Vec<Reply>)>) -> PdfServer {
    start_with_delay(routes, Duration::ZERO)
}

/// Like [`start`], but every request is held for `delay` before its reply is sent.
pub fn start_with_delay(routes: Vec<(&str, Vec<Reply>)>, delay: Duration) -> PdfServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Vec<Reply>>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect(),
    );
    let hits = Arc::new(Mutex::new(HashMap::new()));
    let load = Arc::new(Load::default());
    let server_hits = Arc::clone(&hits);
    let server_load = Arc::clone(&load);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&server_hits);
            let load = Arc::clone(&server_load);
            thread::spawn(move || handle(stream, &routes, &hits, &load, delay));
        }
    });
    PdfServer {
        origin: format!("http://127.0.0.1:{}", port),
        hits,
        load,
    }
}

/// A URL origin nothing listens on (connection refused).
pub fn refused_origin() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, Vec<Reply>>,
    hits: &Mutex<HashMap<String, usize>>,
    load: &Load,
    delay: Duration,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let seen = {
        let mut hits = hits.lock().unwrap();
        let count = hits.entry(path.clone()).or_insert(0);
        *count += 1;
        *count
    };

    let reply = match routes.get(&path) {
        Some(replies) if !replies.is_empty() => {
            replies[(seen - 1).min(replies.len() - 1)].clone()
        }
        _ => Reply::status(404),
    };

    // Leave the in-flight count before replying: the client may start its
    // next request as soon as this response is complete.
    let now = load.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    load.peak.fetch_max(now, Ordering::SeqCst);
    if !delay.is_zero() {
        thread::sleep(delay);
    }
    load.in_flight.fetch_sub(1, Ordering::SeqCst);

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n\
         Content-Type: application/pdf\r\nConnection: close\r\n\r\n",
        reply.status,
        reason(reply.status),
        reply.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&reply.body);
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
