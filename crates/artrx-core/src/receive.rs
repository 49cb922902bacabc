//! UDP receive plumbing.
//!
//! A thin collaborator around the decoder: it binds a socket from an
//! explicit [`ReceiverConfig`], reads one datagram at a time and hands
//! decoded packets to a [`PacketConsumer`] exactly once per valid
//! datagram. Malformed datagrams are dropped (logged at `debug`) and the
//! loop keeps running; one bad packet never ends the receive loop.

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

use log::debug;
use thiserror::Error;

use crate::artnet::{self, DecodeError, DmxPacket};

/// Receive buffer size. ArtDMX tops out at 530 bytes; the headroom keeps
/// oversized foreign datagrams from being split by the socket.
const RECV_BUF_LEN: usize = 2048;

/// Explicit socket configuration; no ambient globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
}

impl Default for ReceiverConfig {
    /// All interfaces on the Art-Net well-known port 6454.
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: artnet::layout::ARTNET_PORT,
        }
    }
}

/// Consumer seam for decoded packets.
///
/// Implemented for any `FnMut(DmxPacket, SocketAddr)` closure, so a
/// channel send or an event emission plugs in without a newtype.
pub trait PacketConsumer {
    fn on_packet(&mut self, packet: DmxPacket, peer: SocketAddr);
}

impl<F> PacketConsumer for F
where
    F: FnMut(DmxPacket, SocketAddr),
{
    fn on_packet(&mut self, packet: DmxPacket, peer: SocketAddr) {
        self(packet, peer)
    }
}

/// Outcome of one datagram: delivered to the consumer, or dropped with
/// the decode error.
#[derive(Debug)]
pub enum Received {
    Delivered,
    Dropped(DecodeError),
}

/// Errors from the socket itself. Decode failures are not errors at this
/// level; they surface as [`Received::Dropped`].
#[derive(Debug, Error)]
pub enum ReceiveError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Blocking UDP receiver feeding a [`PacketConsumer`].
///
/// The decoder is stateless, so one receiver per thread (or a shared
/// socket behind `try_clone`) needs no coordination.
pub struct UdpReceiver {
    socket: UdpSocket,
}

impl UdpReceiver {
    pub fn bind(config: &ReceiverConfig) -> Result<Self, ReceiveError> {
        let socket = UdpSocket::bind((config.bind_addr, config.port))?;
        Ok(Self { socket })
    }

    /// Bound address; the port differs from the config when bound to 0.
    pub fn local_addr(&self) -> Result<SocketAddr, ReceiveError> {
        Ok(self.socket.local_addr()?)
    }

    /// Receive one datagram, decode it and deliver on success.
    ///
    /// Blocks until a datagram arrives. The consumer is invoked at most
    /// once, and never with a partial record.
    pub fn poll_once<C: PacketConsumer>(&self, consumer: &mut C) -> Result<Received, ReceiveError> {
        let mut buf = [0u8; RECV_BUF_LEN];
        let (len, peer) = self.socket.recv_from(&mut buf)?;
        match artnet::decode(&buf[..len]) {
            Ok(packet) => {
                consumer.on_packet(packet, peer);
                Ok(Received::Delivered)
            }
            Err(err) => {
                debug!("dropping {len}-byte datagram from {peer}: {err}");
                Ok(Received::Dropped(err))
            }
        }
    }

    /// Receive loop: decode every incoming datagram until a socket error.
    pub fn run<C: PacketConsumer>(&self, consumer: &mut C) -> Result<(), ReceiveError> {
        loop {
            self.poll_once(consumer)?;
        }
    }
}
