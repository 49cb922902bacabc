use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use artrx_core::{DmxPacket, ReceiverConfig, UdpReceiver};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("ARTRX_BUILD_COMMIT"),
    ", ",
    env!("ARTRX_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "artrx")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Art-Net DMX receiver: decode ArtDMX datagrams from a UDP socket.",
    long_about = None,
    after_help = "Examples:\n  artrx listen\n  artrx listen --json --dmx-only --universe 0\n  artrx decode datagram.bin --pretty"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Bind a UDP socket and stream decoded ArtDMX packets.
    #[command(
        after_help = "Examples:\n  artrx listen --port 6454\n  artrx listen --json --count 10\n  artrx listen --dmx-only --universe 3"
    )]
    Listen {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        bind: IpAddr,

        /// UDP port to listen on (0 picks an ephemeral port)
        #[arg(short, long, default_value_t = artrx_core::ARTNET_PORT)]
        port: u16,

        /// Emit one JSON object per packet instead of text lines
        #[arg(long)]
        json: bool,

        /// Drop packets without the Art-Net signature, ArtDMX opcode and protocol version 14
        #[arg(long)]
        dmx_only: bool,

        /// Only show packets addressed to this universe
        #[arg(long)]
        universe: Option<u16>,

        /// Exit after this many printed packets
        #[arg(long)]
        count: Option<u64>,

        /// Suppress the startup line on stderr
        #[arg(long)]
        quiet: bool,
    },
    /// Decode a single raw datagram stored in a file and print it as JSON.
    #[command(
        after_help = "Examples:\n  artrx decode datagram.bin\n  artrx decode datagram.bin --pretty"
    )]
    Decode {
        /// Path to a file holding one raw Art-Net datagram
        input: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Listen {
            bind,
            port,
            json,
            dmx_only,
            universe,
            count,
            quiet,
        } => cmd_listen(bind, port, json, dmx_only, universe, count, quiet),
        Commands::Decode { input, pretty } => cmd_decode(input, pretty),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_listen(
    bind: IpAddr,
    port: u16,
    json: bool,
    dmx_only: bool,
    universe: Option<u16>,
    count: Option<u64>,
    quiet: bool,
) -> Result<(), CliError> {
    let config = ReceiverConfig {
        bind_addr: bind,
        port,
    };
    let receiver = UdpReceiver::bind(&config).map_err(|err| {
        CliError::new(
            format!("failed to bind {bind}:{port}: {err}"),
            Some("is another Art-Net node already bound to this port?".to_string()),
        )
    })?;
    let local = receiver
        .local_addr()
        .context("Failed to query bound address")?;
    if !quiet {
        eprintln!("listening on {local}");
    }

    let mut printed: u64 = 0;
    loop {
        let mut slot: Option<(DmxPacket, SocketAddr)> = None;
        let mut consumer = |packet: DmxPacket, peer: SocketAddr| slot = Some((packet, peer));
        receiver
            .poll_once(&mut consumer)
            .context("Failed to receive datagram")?;
        drop(consumer);

        let Some((packet, peer)) = slot else { continue };
        if dmx_only && !packet.header.is_dmx() {
            continue;
        }
        if let Some(wanted) = universe {
            if packet.header.universe != wanted {
                continue;
            }
        }

        println!("{}", render_packet(&packet, peer, json)?);
        printed += 1;
        if let Some(limit) = count {
            if printed >= limit {
                break;
            }
        }
    }
    Ok(())
}

fn render_packet(packet: &DmxPacket, peer: SocketAddr, json: bool) -> Result<String, CliError> {
    let ts = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("Failed to format timestamp")?;

    if json {
        let record = serde_json::json!({
            "ts": ts,
            "peer": peer.to_string(),
            "packet": packet,
        });
        return serde_json::to_string(&record)
            .context("JSON serialization failed")
            .map_err(Into::into);
    }

    Ok(format!(
        "{ts} {peer} universe={} seq={} physical={} channels={}",
        packet.header.universe,
        packet.header.sequence,
        packet.header.physical,
        packet.channels.len()
    ))
}

fn cmd_decode(input: PathBuf, pretty: bool) -> Result<(), CliError> {
    let bytes = fs::read(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let packet = artrx_core::decode(&bytes).map_err(|err| {
        CliError::new(
            format!("decode failed: {err}"),
            Some("expected one raw Art-Net datagram (18-byte header plus channel data)".to_string()),
        )
    })?;

    let json = if pretty {
        serde_json::to_string_pretty(&packet)
            .context("JSON serialization failed")
            .map_err(CliError::from)?
    } else {
        serde_json::to_string(&packet)
            .context("JSON serialization failed")
            .map_err(CliError::from)?
    };
    println!("{json}");
    Ok(())
}
