use std::net::SocketAddr;

use async_trait::async_trait;
use rosc::{OscPacket, decoder};
use tokio::{net::UdpSocket, sync::mpsc};

use super::{
    error::{OscTransportError, Result},
    models::RawMessage,
};

/// Source of inbound OSC messages.
///
/// The live process calls [`open`](OscTransport::open) once (a successful return is the
/// transport's `ready` signal), then polls [`recv`](OscTransport::recv) inside a
/// `tokio::select!`, so `recv` must be cancel-safe. [`close`](OscTransport::close) is called
/// once on shutdown.
#[async_trait]
pub trait OscTransport: Send + 'static {
    /// Opens the transport. Returns once the transport is ready to deliver messages.
    async fn open(&mut self) -> Result<()>;

    /// Waits for the next inbound message.
    async fn recv(&mut self) -> Result<RawMessage>;

    /// Releases the underlying resources. Messages are no longer delivered afterwards.
    fn close(&mut self);
}

/// [`OscTransport`] listening for OSC datagrams on a local UDP socket.
///
/// Datagrams that fail to decode are logged and skipped. OSC bundles are not supported and
/// are skipped as well.
#[derive(Debug)]
pub struct UdpOscTransport {
    bind_addr: SocketAddr,
    socket: Option<UdpSocket>,
    buf: Vec<u8>,
}

impl UdpOscTransport {
    /// Creates a transport that will bind to `bind_addr` when opened.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            socket: None,
            buf: vec![0; decoder::MTU],
        }
    }

    /// Returns the address the socket is bound to, once opened.
    ///
    /// Useful when binding to port `0`.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.as_ref().and_then(|socket| socket.local_addr().ok())
    }
}

#[async_trait]
impl OscTransport for UdpOscTransport {
    async fn open(&mut self) -> Result<()> {
        let socket = UdpSocket::bind(self.bind_addr)
            .await
            .map_err(|source| OscTransportError::Bind {
                addr: self.bind_addr,
                source,
            })?;

        self.socket = Some(socket);

        Ok(())
    }

    async fn recv(&mut self) -> Result<RawMessage> {
        let socket = self.socket.as_ref().ok_or(OscTransportError::NotOpen)?;

        loop {
            let (size, peer) = socket
                .recv_from(&mut self.buf)
                .await
                .map_err(OscTransportError::Recv)?;

            match decoder::decode_udp(&self.buf[..size]) {
                Ok((_, OscPacket::Message(msg))) => return Ok(msg.into()),
                Ok((_, OscPacket::Bundle(bundle))) => {
                    log::debug!(
                        "Skipping OSC bundle with {} elements from {peer}",
                        bundle.content.len()
                    );
                }
                Err(e) => {
                    log::warn!("Skipping undecodable OSC datagram ({size} bytes) from {peer}: {e}");
                }
            }
        }
    }

    fn close(&mut self) {
        self.socket = None;
    }
}

/// [`OscTransport`] fed by an in-process channel.
///
/// Allows replaying recorded sessions or bridging messages received through another
/// mechanism. `recv` fails with [`OscTransportError::ChannelClosed`] once every sender has
/// been dropped.
#[derive(Debug)]
pub struct ChannelOscTransport {
    rx: mpsc::UnboundedReceiver<RawMessage>,
    open: bool,
}

impl ChannelOscTransport {
    /// Creates a transport together with the sender used to feed it.
    pub fn new() -> (Self, mpsc::UnboundedSender<RawMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (Self { rx, open: false }, tx)
    }
}

#[async_trait]
impl OscTransport for ChannelOscTransport {
    async fn open(&mut self) -> Result<()> {
        self.open = true;
        Ok(())
    }

    async fn recv(&mut self) -> Result<RawMessage> {
        if !self.open {
            return Err(OscTransportError::NotOpen);
        }

        self.rx.recv().await.ok_or(OscTransportError::ChannelClosed)
    }

    fn close(&mut self) {
        self.open = false;
        self.rx.close();
    }
}
