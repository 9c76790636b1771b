use crate::error::Result;
use crate::exchange::TokenExchange;

use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use serde_json::json;
use tracing::{error, info};
use url::Url;

/// Binds `listen_on` and serves the callback surface from a background
/// thread, returning the bound address (bind port 0 to get an ephemeral one).
///
/// `exchange` is invoked with the authorization code of every valid
/// `/callback` hit. It runs on a per-connection worker thread, so a blocking
/// exchange does not stop `/` from answering in the meantime.
pub fn start_listener<F>(listen_on: &str, exchange: F) -> Result<SocketAddr>
where
    F: Fn(&str) -> Result<TokenExchange> + Send + Sync + 'static,
{
    let listener = TcpListener::bind(listen_on)?;
    let addr = listener.local_addr()?;
    let exchange = Arc::new(exchange);

    thread::spawn(move || {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let exchange = Arc::clone(&exchange);
                    thread::spawn(move || handle_connection(stream, &*exchange));
                }
                Err(e) => error!("failed to accept connection: {}", e),
            }
        }
    });

    Ok(addr)
}

fn handle_connection<F>(stream: TcpStream, exchange: &F)
where
    F: Fn(&str) -> Result<TokenExchange>,
{
    let mut request_line = String::new();
    {
        let mut reader = BufReader::new(&stream);
        if reader.read_line(&mut request_line).is_err() {
            return;
        }
        // drain the header section before answering
        loop {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(_) if line.trim_end().is_empty() => break,
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
        }
    }

    let target = match request_target(&request_line) {
        Some(target) => target,
        None => {
            respond(&stream, 400, json!({ "message": "bad request" }));
            return;
        }
    };

    // the target is origin-form; any base works for extracting path and query
    let url = match Url::parse(&format!("http://localhost{}", target)) {
        Ok(url) => url,
        Err(_) => {
            respond(&stream, 400, json!({ "message": "bad request" }));
            return;
        }
    };

    match url.path() {
        "/" => respond(&stream, 200, json!({ "message": "Server is ready" })),
        "/callback" => callback(&stream, &url, exchange),
        _ => respond(&stream, 404, json!({ "message": "not found" })),
    }
}

fn callback<F>(stream: &TcpStream, url: &Url, exchange: &F)
where
    F: Fn(&str) -> Result<TokenExchange>,
{
    let mut code = None;
    for (key, value) in url.query_pairs() {
        if key == "code" {
            code = Some(value.into_owned());
            break;
        }
    }

    let code = match code {
        Some(code) => code,
        None => {
            respond(stream, 400, json!({ "message": "missing query parameter: code" }));
            return;
        }
    };

    let (status, body) = exchange_response(exchange(&code));
    respond(stream, status, body);
}

/// Maps the exchange outcome to the callback response, emitting the log and
/// console surface on the way: the token at info on success, the failure
/// detail at error.
fn exchange_response(outcome: Result<TokenExchange>) -> (u16, serde_json::Value) {
    match outcome {
        Ok(result) if result.succeeded() => {
            // the token goes to the log and stdout only, never into the
            // response body
            let token = result.payload.unwrap_or(serde_json::Value::Null);
            info!("access token: {}", token);
            println!("access token: {}", token);
            (
                200,
                json!({ "message": "Authentication complete; view application logs for token" }),
            )
        }
        Ok(result) => {
            error!(
                "failed to get access token: status {}: {}",
                result.status,
                result.detail.as_deref().unwrap_or("")
            );
            (200, json!({ "message": "failed to get access token" }))
        }
        Err(e) => {
            error!("failed to get access token: {}", e);
            (200, json!({ "message": "failed to get access token" }))
        }
    }
}

fn request_target(request_line: &str) -> Option<&str> {
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;
    if method != "GET" {
        return None;
    }
    Some(target)
}

fn respond(mut stream: &TcpStream, status: u16, body: serde_json::Value) {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        _ => "",
    };
    let body = body.to_string();
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.shutdown(Shutdown::Write);
}
