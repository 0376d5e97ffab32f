//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed set of paths (query strings ignored); anything else is 404.
//! When `required_cookie` is set, requests without that exact `Cookie` header
//! get 403. `response_delay` holds every answer back, so transfers overlap.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Default)]
pub struct FileServerOptions {
    pub required_cookie: Option<String>,
    pub response_delay: Option<std::time::Duration>,
}

/// Starts a server in a background thread. Returns the origin
/// (e.g. "http://127.0.0.1:12345"). The server runs until the process exits.
pub fn start(routes: HashMap<String, Vec<u8>>) -> String {
    start_with_options(routes, FileServerOptions::default())
}

pub fn start_with_options(routes: HashMap<String, Vec<u8>>, opts: FileServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let opts = Arc::new(opts);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let opts = Arc::clone(&opts);
            thread::spawn(move || handle(stream, &routes, &opts));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, Vec<u8>>, opts: &FileServerOptions) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
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
    let (path, cookie) = parse_request(request);
    if let Some(delay) = opts.response_delay {
        thread::sleep(delay);
    }

    if let Some(required) = &opts.required_cookie {
        if cookie.as_deref() != Some(required.as_str()) {
            let _ = stream.write_all(b"HTTP/1.1 403 Forbidden\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
            return;
        }
    }

    match routes.get(path.split('?').next().unwrap_or("")) {
        Some(body) => {
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
        }
        None => {
            let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        }
    }
}

/// Returns (request target, Cookie header value).
fn parse_request(request: &str) -> (String, Option<String>) {
    let mut target = String::new();
    let mut cookie = None;
    for line in request.lines() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if target.is_empty() {
            target = line.split_whitespace().nth(1).unwrap_or("").to_string();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("cookie") {
                cookie = Some(value.trim().to_string());
            }
        }
    }
    (target, cookie)
}
