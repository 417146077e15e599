//! Minimal HTTP/1.1 server that serves canned JSON bodies by path for integration tests.
//!
//! Unknown paths get 404. A path can be marked flaky so its first N requests
//! answer 503 before the real body is served.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Route {
    status: u16,
    body: String,
}

#[derive(Debug, Default)]
struct State {
    routes: HashMap<String, Route>,
    /// Remaining 503 answers per path.
    flaky: HashMap<String, usize>,
    /// Every request path, in arrival order.
    hits: Vec<String>,
}

/// Handle to a running server. The server runs until the process exits.
#[derive(Clone)]
pub struct JsonServer {
    base: String,
    state: Arc<Mutex<State>>,
}

impl JsonServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let state = Arc::new(Mutex::new(State::default()));
        let shared = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let state = Arc::clone(&shared);
                thread::spawn(move || handle(stream, &state));
            }
        });
        Self {
            base: format!("http://127.0.0.1:{}", port),
            state,
        }
    }

    /// Base URL without trailing slash, e.g. `http://127.0.0.1:40000`.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn json(&self, path: &str, body: &str) -> &Self {
        self.route(path, 200, body)
    }

    pub fn route(&self, path: &str, status: u16, body: &str) -> &Self {
        self.state.lock().unwrap().routes.insert(
            path.to_string(),
            Route {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn flaky(&self, path: &str, failures: usize) -> &Self {
        self.state
            .lock()
            .unwrap()
            .flaky
            .insert(path.to_string(), failures);
        self
    }

    pub fn hits(&self, path: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .hits
            .iter()
            .filter(|p| p.as_str() == path)
            .count()
    }
}

fn handle(mut stream: TcpStream, state: &Mutex<State>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            Err(_) => return,
        }
    }
    let request = String::from_utf8_lossy(&request);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let (status, body) = {
        let mut state = state.lock().unwrap();
        state.hits.push(path.clone());
        let remaining = state.flaky.get(&path).copied().unwrap_or(0);
        if remaining > 0 {
            state.flaky.insert(path.clone(), remaining - 1);
            (503, r#"{"error":"busy"}"#.to_string())
        } else {
            match state.routes.get(&path) {
                Some(r) => (r.status, r.body.clone()),
                None => (404, r#"{"type":"not_found"}"#.to_string()),
            }
        }
    };

    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        503 => "Service Unavailable",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
