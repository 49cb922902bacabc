//! artrx core library: Art-Net ArtDMX decoding over UDP.
//!
//! This crate implements the receive pipeline used by the CLI: a UDP
//! transport hands raw datagrams to the protocol decoder
//! (layout/reader/parser), which delivers one [`DmxPacket`] per valid
//! datagram to a consumer. Parsing is byte-oriented and side-effect free;
//! all I/O is isolated in the `receive` module. Protocol conventions are
//! captured in the reader so the parser stays minimal and consistent with
//! the wire format.
//!
//! Invariants:
//! - [`decode`] is pure and stateless; identical bytes decode identically.
//! - A decoded packet carries exactly `header.length` channel bytes,
//!   with `length` in 2..=512.
//! - Signature, opcode and protocol version are exposed, never enforced;
//!   filtering is the consumer's call.
//! - A malformed datagram is dropped without stopping the receive loop.
//!
//! Version française (résumé):
//! Cette crate reçoit des datagrammes Art-Net en UDP et livre un paquet
//! décodé par datagramme valide à un consommateur. Le décodage est pur et
//! sans état ; les E/S restent dans `receive`, les conventions de protocole
//! dans le `reader`. Les trames invalides sont ignorées sans arrêter la
//! boucle de réception.
//!
//! # Examples
//! ```no_run
//! use std::net::SocketAddr;
//!
//! use artrx_core::{DmxPacket, ReceiverConfig, UdpReceiver};
//!
//! let receiver = UdpReceiver::bind(&ReceiverConfig::default())?;
//! receiver.run(&mut |packet: DmxPacket, peer: SocketAddr| {
//!     println!(
//!         "universe {} from {peer}: {} channels",
//!         packet.header.universe,
//!         packet.channels.len()
//!     );
//! })?;
//! # Ok::<(), artrx_core::ReceiveError>(())
//! ```

mod artnet;
mod receive;

pub use artnet::{DecodeError, DmxPacket, Header, decode, parse_header};
pub use receive::{PacketConsumer, ReceiveError, Received, ReceiverConfig, UdpReceiver};

/// Art-Net well-known UDP port.
pub const ARTNET_PORT: u16 = artnet::layout::ARTNET_PORT;
/// Largest channel count an ArtDMX packet may carry.
pub const DMX_MAX_CHANNELS: u16 = artnet::layout::DMX_MAX_CHANNELS;
