//! Accept TCP connections and print the request parsed from each one.
//!
//! One request per connection: the stream is parsed until the request is
//! complete, the result is printed, and the connection is dropped. Point a
//! browser or `curl` at the listen address to try it.

use std::net::{TcpListener, TcpStream};

use anyhow::Context;
use clap::Parser;
use httpin::Request;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "tcplistener", about = "Parse and print HTTP requests from raw TCP")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:42069")]
    addr: String,
    /// Print parsed requests as JSON instead of plain text.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let listener = TcpListener::bind(&args.addr)
        .with_context(|| format!("failed to listen on {}", args.addr))?;
    info!(addr = %args.addr, "listening");

    for conn in listener.incoming() {
        let stream = match conn {
            Ok(stream) => stream,
            Err(err) => {
                error!(%err, "failed to accept connection");
                continue;
            }
        };
        handle_connection(stream, args.json);
    }

    Ok(())
}

fn handle_connection(stream: TcpStream, json: bool) {
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".into());
    info!(%peer, "connection accepted");

    match Request::from_reader(stream) {
        Ok(request) => print_request(&request, json),
        Err(err) => error!(%peer, %err, "failed to parse request"),
    }
}

fn print_request(request: &Request, json: bool) {
    let Some(line) = request.request_line() else {
        return;
    };

    if json {
        let rendered = serde_json::json!({
            "method": line.method,
            "target": line.target,
            "version": line.http_version,
            "headers": request.headers(),
            "body": String::from_utf8_lossy(request.body()),
        });
        println!("{rendered}");
        return;
    }

    println!("Request line:");
    println!("- Method: {}", line.method);
    println!("- Target: {}", line.target);
    println!("- Version: {}", line.http_version);
    println!("Headers:");
    for (name, value) in request.headers().iter() {
        println!("- {name}: {value}");
    }
    println!("Body:");
    println!("{}", String::from_utf8_lossy(request.body()));
}
