pub(crate) mod error;
mod models;
mod transport;

pub use models::{OscArg, RawMessage};
pub use transport::{ChannelOscTransport, OscTransport, UdpOscTransport};
