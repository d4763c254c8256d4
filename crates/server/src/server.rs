//! Blocking HTTP front end on `tiny_http` with a fixed worker pool.
//!
//! Every worker pulls requests from the same listening socket, hands them to
//! [`routes::handle`] and writes the JSON reply with CORS headers attached.

use crate::config::ServerConfig;
use crate::error::CliError;
use crate::routes::{self, AppState, Reply};
use std::io::Read;
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tiny_http::{Header, Request, Response, Server};

/// Largest request body accepted, in bytes.
const MAX_BODY_BYTES: u64 = 64 * 1024;

fn header(name: &str, value: &str) -> Option<Header> {
    match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
        Ok(h) => Some(h),
        Err(()) => {
            log::error!("invalid header {name}: {value}");
            None
        }
    }
}

/// Headers sent with every response.
fn common_headers(config: &ServerConfig) -> Vec<Header> {
    [
        header("Access-Control-Allow-Origin", &config.cors_origin),
        header("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
        header("Access-Control-Allow-Headers", "Content-Type"),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Reads at most [`MAX_BODY_BYTES`]. Larger bodies get 413, bodies that are
/// not UTF-8 or fail mid-read get 400.
fn read_body(reader: impl Read) -> Result<String, Reply> {
    let mut body = String::new();
    match reader.take(MAX_BODY_BYTES + 1).read_to_string(&mut body) {
        Ok(n) if n as u64 > MAX_BODY_BYTES => Err(Reply {
            status: 413,
            body: serde_json::json!({
                "detail": format!("request body exceeds {MAX_BODY_BYTES} bytes")
            }),
        }),
        Ok(_) => Ok(body),
        Err(e) => Err(Reply {
            status: 400,
            body: serde_json::json!({ "detail": format!("unreadable request body: {e}") }),
        }),
    }
}

/// Binds the socket and serves until every worker has stopped.
pub fn run(config: ServerConfig) -> Result<(), CliError> {
    config.validate()?;
    let addr = config.addr();
    let server = Server::http(&addr)
        .map_err(|e| CliError::Io(format!("failed to bind {addr}: {e}")))?;
    let server = Arc::new(server);
    let workers = config.workers;
    let state = Arc::new(AppState::new(config));

    log::info!(
        "listening on http://{addr} ({workers} workers, advice cache {})",
        if state.cache.is_enabled() { "on" } else { "off" }
    );

    let handles = (0..workers)
        .map(|i| {
            let server = Arc::clone(&server);
            let state = Arc::clone(&state);
            thread::Builder::new()
                .name(format!("worker-{i}"))
                .spawn(move || worker_loop(&server, &state))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for handle in handles {
        if handle.join().is_err() {
            log::error!("worker thread panicked");
        }
    }
    Ok(())
}

fn worker_loop(server: &Server, state: &AppState) {
    loop {
        match server.recv() {
            Ok(request) => serve_one(request, state),
            Err(e) => {
                log::error!("accept failed, worker stopping: {e}");
                return;
            }
        }
    }
}

fn serve_one(mut request: Request, state: &AppState) {
    let started = Instant::now();
    let method = request.method().to_string();
    let url = request.url().to_string();

    let reply = match read_body(request.as_reader()) {
        Ok(body) => routes::handle(state, &method, &url, &body),
        Err(reply) => {
            log::warn!("{method} {url}: rejected body ({})", reply.status);
            reply
        }
    };

    let status = reply.status;
    let headers = common_headers(&state.config);
    let result = if reply.body.is_null() {
        let mut response = Response::empty(status);
        for h in headers {
            response.add_header(h);
        }
        request.respond(response)
    } else {
        let mut response = Response::from_string(reply.body.to_string()).with_status_code(status);
        if let Some(h) = header("Content-Type", "application/json") {
            response.add_header(h);
        }
        for h in headers {
            response.add_header(h);
        }
        request.respond(response)
    };

    let elapsed = started.elapsed().as_millis();
    match result {
        Ok(()) => log::info!("{method} {url} -> {status} ({elapsed} ms)"),
        Err(e) => log::error!("{method} {url} -> {status}, write failed: {e}"),
    }
}
