//! Interactive stdin-to-UDP line sender.
//!
//! Reads lines from stdin and sends each as one datagram, which makes it a
//! handy counterpart to `tcplistener` for poking at raw sockets by hand.

use std::io::{self, BufRead, Write};
use std::net::UdpSocket;

use anyhow::Context;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "udpsender", about = "Send stdin lines as UDP datagrams")]
struct Args {
    /// Destination address for the datagrams.
    #[arg(long, default_value = "127.0.0.1:42069")]
    addr: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let socket = UdpSocket::bind("0.0.0.0:0").context("failed to bind local socket")?;
    socket
        .connect(&args.addr)
        .with_context(|| format!("failed to connect to {}", args.addr))?;
    info!(addr = %args.addr, "sending datagrams");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        print!("> ");
        stdout.flush().context("failed to flush stdout")?;

        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            break;
        }

        socket
            .send(line.as_bytes())
            .context("failed to send datagram")?;
        info!(bytes = line.len(), "message sent");
    }

    Ok(())
}
