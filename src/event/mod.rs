mod band;
mod models;
mod receiver;

pub use band::{Band, BandMetric};
pub use models::{
    AccelData, BatteryStatus, ChannelStatus, DrlStatus, EegChannels, GyroData, MuseEvent,
};
pub(crate) use receiver::MuseEventTransmitter;
pub use receiver::{MuseEventReceiver, NamedEventReceiver};
