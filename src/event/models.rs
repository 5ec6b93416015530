use std::{borrow::Cow, fmt};

use crate::osc::{OscArg, RawMessage};

use super::band::{Band, BandMetric};

/// One value per EEG electrode, in the headband's channel order.
///
/// A channel is `None` when the device sent fewer arguments than expected.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EegChannels {
    pub tp9: Option<f64>,
    pub af7: Option<f64>,
    pub af8: Option<f64>,
    pub tp10: Option<f64>,
}

impl EegChannels {
    pub fn new(tp9: f64, af7: f64, af8: f64, tp10: f64) -> Self {
        Self {
            tp9: Some(tp9),
            af7: Some(af7),
            af8: Some(af8),
            tp10: Some(tp10),
        }
    }
}

/// Accelerometer reading.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccelData {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

/// Gyroscope angular rates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GyroData {
    pub roll_rate: Option<f64>,
    pub pitch_rate: Option<f64>,
    pub yaw_rate: Option<f64>,
}

/// Per-electrode fit quality, `true` when the sensor has good contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelStatus {
    pub left_ear: bool,
    pub left_front: bool,
    pub right_front: bool,
    pub right_ear: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatteryStatus {
    /// Remaining charge as a fraction, `1.0` meaning fully charged.
    pub percent: Option<f64>,
    pub voltage: Option<f64>,
    pub temperature: Option<f64>,
}

/// Driven right leg and reference electrode voltages.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrlStatus {
    pub drl: Option<f64>,
    pub reference: Option<f64>,
}

/// Event published by a running [`MuseOscEngine`](crate::live::MuseOscEngine).
///
/// Every event has a stable [`name`](MuseEvent::name). For each accepted message subscribers
/// observe, in order: [`Message`](MuseEvent::Message), [`Route`](MuseEvent::Route), then the
/// decoded events of the address (if it is known).
#[derive(Debug, Clone, PartialEq)]
pub enum MuseEvent {
    /// The transport is ready and the liveness timer started.
    Open,
    /// The transport was closed.
    Close,
    /// Messages started arriving within the liveness timeout.
    Connect,
    /// No message arrived within the liveness timeout.
    Disconnect,
    /// Any accepted message, before the topic prefix is removed.
    Message(RawMessage),
    /// Any accepted message, named by its routed address.
    Route { address: String, args: Vec<OscArg> },
    EegRaw(EegChannels),
    EegFiltered(EegChannels),
    EegStepsize(Option<f64>),
    AccelData(AccelData),
    GyroData(GyroData),
    BandPower {
        band: Band,
        metric: BandMetric,
        channels: EegChannels,
    },
    ContactStatus(bool),
    ContactMade,
    ContactLost,
    ChannelStatus(ChannelStatus),
    BatteryStatus(BatteryStatus),
    DrlStatus(DrlStatus),
    BlinkStatus(bool),
    Blink,
    JawClenchStatus(bool),
    JawClench,
}

impl MuseEvent {
    /// Returns the event name, e.g. `"eeg raw"`, `"alpha abp"` or `"/eeg"` for routed events.
    pub fn name(&self) -> Cow<'_, str> {
        let name = match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
            Self::Message(_) => "message",
            Self::Route { address, .. } => return Cow::Borrowed(address.as_str()),
            Self::EegRaw(_) => "eeg raw",
            Self::EegFiltered(_) => "eeg filtered",
            Self::EegStepsize(_) => "eeg stepsize",
            Self::AccelData(_) => "accel data",
            Self::GyroData(_) => "gyro data",
            Self::BandPower { band, metric, .. } => {
                return Cow::Owned(band.event_name(*metric));
            }
            Self::ContactStatus(_) => "contact status",
            Self::ContactMade => "contact made",
            Self::ContactLost => "contact lost",
            Self::ChannelStatus(_) => "channel status",
            Self::BatteryStatus(_) => "battery status",
            Self::DrlStatus(_) => "drl status",
            Self::BlinkStatus(_) => "blink status",
            Self::Blink => "blink",
            Self::JawClenchStatus(_) => "jaw clench status",
            Self::JawClench => "jaw clench",
        };

        Cow::Borrowed(name)
    }

    /// Returns `true` for events derived from a decoded address, as opposed to lifecycle,
    /// `message` and routed-address events.
    pub fn is_derived(&self) -> bool {
        !matches!(
            self,
            Self::Open
                | Self::Close
                | Self::Connect
                | Self::Disconnect
                | Self::Message(_)
                | Self::Route { .. }
        )
    }
}

impl fmt::Display for MuseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
