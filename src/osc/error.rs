use std::{io, net::SocketAddr, result};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OscTransportError {
    #[error("Failed to bind UDP socket to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("UDP receive error: {0}")]
    Recv(io::Error),

    #[error("Transport was used before being opened")]
    NotOpen,

    #[error("Transport channel closed")]
    ChannelClosed,
}

pub(crate) type Result<T> = result::Result<T, OscTransportError>;
