//! Minimal HTTP/1.1 server for integration tests.
//!
//! Routes:
//! - `/echo`: 200 with a body listing the request line, every request header
//!   in received order, a blank line, then the request body.
//! - `/blob`: 200 with the configured static body and its Content-Length.
//! - `/redirect`: 302 to `/blob`.
//! - anything else: 404 with a short body.
//!
//! Every response body sent is recorded so tests can compare files against
//! exactly what went over the wire.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub struct EchoServer {
    /// Base URL without trailing slash, e.g. "http://127.0.0.1:12345".
    pub base_url: String,
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl EchoServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Response bodies sent so far, oldest first.
    pub fn sent_bodies(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start(blob: Vec<u8>) -> EchoServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let blob = Arc::new(blob);
    let sent = Arc::new(Mutex::new(Vec::new()));
    let sent_srv = Arc::clone(&sent);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let blob = Arc::clone(&blob);
            let sent = Arc::clone(&sent_srv);
            thread::spawn(move || handle(stream, &blob, &sent));
        }
    });
    EchoServer {
        base_url: format!("http://127.0.0.1:{}", port),
        sent,
    }
}

struct Request {
    method: String,
    path: String,
    request_line: String,
    headers: Vec<String>,
    body: Vec<u8>,
}

fn handle(mut stream: TcpStream, blob: &[u8], sent: &Mutex<Vec<Vec<u8>>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let Some(req) = read_request(&mut stream) else {
        return;
    };

    let (status, extra, body): (&str, String, Vec<u8>) = match req.path.as_str() {
        "/echo" => {
            let mut body = Vec::new();
            body.extend_from_slice(req.request_line.as_bytes());
            body.push(b'\n');
            for h in &req.headers {
                body.extend_from_slice(h.as_bytes());
                body.push(b'\n');
            }
            body.push(b'\n');
            body.extend_from_slice(&req.body);
            ("200 OK", String::new(), body)
        }
        "/blob" => ("200 OK", String::new(), blob.to_vec()),
        "/redirect" => (
            "302 Found",
            "Location: /blob\r\n".to_string(),
            Vec::new(),
        ),
        _ => ("404 Not Found", String::new(), b"not found".to_vec()),
    };

    let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n",
        status,
        body.len(),
        extra
    );
    let with_body = !req.method.eq_ignore_ascii_case("HEAD");
    // Record before writing so the client never observes the response first.
    if with_body {
        sent.lock().unwrap().push(body.clone());
    }
    let _ = stream.write_all(head.as_bytes());
    if with_body {
        let _ = stream.write_all(&body);
    }
    let _ = stream.flush();
}

/// Reads the request head, then as many body bytes as Content-Length announces.
fn read_request(stream: &mut TcpStream) -> Option<Request> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = std::str::from_utf8(&buf[..head_end]).ok()?.to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next()?.to_string();
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();
    let headers: Vec<String> = lines.map(str::to_string).collect();

    let content_length = headers
        .iter()
        .filter_map(|h| h.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    Some(Request {
        method,
        path,
        request_line,
        headers,
        body,
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
