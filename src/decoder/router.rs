use crate::{
    event::{
        AccelData, BatteryStatus, ChannelStatus, DrlStatus, EegChannels, GyroData, MuseEvent,
    },
    osc::{OscArg, RawMessage},
};

use super::{
    edge::{Edge, EdgeDetector},
    table::Binding,
};

/// Divisor turning the `/batt` charge field into a fraction.
const BATTERY_DECIMAL_SCALE: f64 = 10_000.0;

fn number(msg: &RawMessage, index: usize) -> Option<f64> {
    msg.arg(index).and_then(OscArg::as_f64)
}

fn flag(msg: &RawMessage, index: usize) -> bool {
    msg.arg(index).is_some_and(OscArg::is_truthy)
}

fn eeg_channels(msg: &RawMessage) -> EegChannels {
    EegChannels {
        tp9: number(msg, 0),
        af7: number(msg, 1),
        af8: number(msg, 2),
        tp10: number(msg, 3),
    }
}

/// Turns raw OSC messages into [`MuseEvent`]s.
///
/// The router filters messages by topic prefix, strips the prefix, and decodes known
/// addresses. It keeps the edge state of the blink, jaw clench and forehead contact signals,
/// so a single router should see every message of a session, in arrival order.
///
/// The router performs no I/O and is usable without the live engine:
///
/// ```
/// use muse_osc::{
///     decoder::MessageRouter,
///     event::MuseEvent,
///     osc::{OscArg, RawMessage},
/// };
///
/// let mut router = MessageRouter::new("/muse");
/// router.open();
///
/// let events = router
///     .route(RawMessage::new("/muse/elements/blink", vec![OscArg::Int(1)]))
///     .unwrap();
///
/// assert_eq!(events.last(), Some(&MuseEvent::Blink));
/// assert!(router.route(RawMessage::new("/other/eeg", vec![])).is_none());
/// ```
#[derive(Debug)]
pub struct MessageRouter {
    prefix: String,
    open: bool,
    blink: EdgeDetector,
    jaw_clench: EdgeDetector,
    contact: EdgeDetector,
}

impl MessageRouter {
    /// Creates a closed router accepting addresses under `prefix` (may be empty).
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            open: false,
            blink: EdgeDetector::default(),
            jaw_clench: EdgeDetector::default(),
            contact: EdgeDetector::default(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Starts accepting messages.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Stops accepting messages. Messages routed afterwards are ignored.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Returns `address` with the topic prefix removed, or `None` if the address is not
    /// under the prefix.
    ///
    /// The leading `/` of the remainder is kept, so with prefix `/p` the address `/p/eeg`
    /// routes to `/eeg`, while `/peeg` and `/p` are rejected.
    pub fn routed_address<'a>(&self, address: &'a str) -> Option<&'a str> {
        address
            .strip_prefix(self.prefix.as_str())
            .filter(|routed| routed.starts_with('/'))
    }

    /// Returns `true` if a message sent to `address` would be accepted.
    pub fn accepts(&self, address: &str) -> bool {
        self.open && self.routed_address(address).is_some()
    }

    /// Routes a message and returns the events it produces, in emission order.
    ///
    /// Returns `None` if the router is closed or the address is not under the prefix. Accepted
    /// messages always produce a [`MuseEvent::Message`] followed by a [`MuseEvent::Route`];
    /// known addresses add their decoded events. Missing arguments decode to `None`, or to
    /// `false` for boolean fields.
    pub fn route(&mut self, msg: RawMessage) -> Option<Vec<MuseEvent>> {
        if !self.open {
            return None;
        }

        let routed = self.routed_address(&msg.address)?.to_string();
        let binding = Binding::lookup(&routed);

        let mut events = Vec::with_capacity(4);
        events.push(MuseEvent::Message(msg.clone()));
        events.push(MuseEvent::Route {
            address: routed,
            args: msg.args.clone(),
        });

        match binding {
            Some(binding) => self.decode(binding, &msg, &mut events),
            None => log::trace!("No decoder bound to {}", msg.address),
        }

        Some(events)
    }

    fn decode(&mut self, binding: Binding, msg: &RawMessage, events: &mut Vec<MuseEvent>) {
        match binding {
            Binding::EegRaw => events.push(MuseEvent::EegRaw(eeg_channels(msg))),
            Binding::EegFiltered => events.push(MuseEvent::EegFiltered(eeg_channels(msg))),
            Binding::EegQuantization => events.push(MuseEvent::EegStepsize(number(msg, 0))),
            Binding::Accelerometer => events.push(MuseEvent::AccelData(AccelData {
                x: number(msg, 0),
                y: number(msg, 1),
                z: number(msg, 2),
            })),
            Binding::Gyroscope => events.push(MuseEvent::GyroData(GyroData {
                roll_rate: number(msg, 0),
                pitch_rate: number(msg, 1),
                yaw_rate: number(msg, 2),
            })),
            Binding::BandPower(band, metric) => events.push(MuseEvent::BandPower {
                band,
                metric,
                channels: eeg_channels(msg),
            }),
            Binding::TouchingForehead => {
                let touching = flag(msg, 0);
                events.push(MuseEvent::ContactStatus(touching));
                match self.contact.observe(touching) {
                    Some(Edge::Rising) => events.push(MuseEvent::ContactMade),
                    Some(Edge::Falling) => events.push(MuseEvent::ContactLost),
                    None => {}
                }
            }
            Binding::IsGood => events.push(MuseEvent::ChannelStatus(ChannelStatus {
                left_ear: flag(msg, 0),
                left_front: flag(msg, 1),
                right_front: flag(msg, 2),
                right_ear: flag(msg, 3),
            })),
            Binding::Battery => events.push(MuseEvent::BatteryStatus(BatteryStatus {
                percent: number(msg, 0).map(|decimal| decimal / BATTERY_DECIMAL_SCALE),
                voltage: number(msg, 1),
                temperature: number(msg, 2),
            })),
            Binding::DrlRef => events.push(MuseEvent::DrlStatus(DrlStatus {
                drl: number(msg, 0),
                reference: number(msg, 1),
            })),
            Binding::Blink => {
                let blinking = flag(msg, 0);
                events.push(MuseEvent::BlinkStatus(blinking));
                if self.blink.observe(blinking) == Some(Edge::Rising) {
                    events.push(MuseEvent::Blink);
                }
            }
            Binding::JawClench => {
                let clenching = flag(msg, 0);
                events.push(MuseEvent::JawClenchStatus(clenching));
                if self.jaw_clench.observe(clenching) == Some(Edge::Rising) {
                    events.push(MuseEvent::JawClench);
                }
            }
        }
    }
}
