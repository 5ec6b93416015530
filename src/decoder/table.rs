use std::{borrow::Cow, collections::HashMap};

use lazy_static::lazy_static;

use crate::event::{Band, BandMetric};

const EEG_FIELDS: &[&str] = &["tp9", "af7", "af8", "tp10"];

/// Decoding rule bound to a routed OSC address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    EegRaw,
    EegFiltered,
    EegQuantization,
    Accelerometer,
    Gyroscope,
    BandPower(Band, BandMetric),
    TouchingForehead,
    IsGood,
    Battery,
    DrlRef,
    Blink,
    JawClench,
}

lazy_static! {
    static ref BINDINGS: HashMap<String, Binding> = {
        let fixed = [
            Binding::EegRaw,
            Binding::EegFiltered,
            Binding::EegQuantization,
            Binding::Accelerometer,
            Binding::Gyroscope,
            Binding::TouchingForehead,
            Binding::IsGood,
            Binding::Battery,
            Binding::DrlRef,
            Binding::Blink,
            Binding::JawClench,
        ];
        let band_power = Band::all_pairs().map(|(band, metric)| Binding::BandPower(band, metric));

        fixed
            .into_iter()
            .chain(band_power)
            .map(|binding| (binding.address().into_owned(), binding))
            .collect()
    };
}

impl Binding {
    /// Returns the binding for an exact routed address, if any.
    pub fn lookup(address: &str) -> Option<Self> {
        BINDINGS.get(address).copied()
    }

    /// Iterates every known binding, in no particular order.
    pub fn all() -> impl Iterator<Item = Binding> {
        BINDINGS.values().copied()
    }

    pub fn address(&self) -> Cow<'static, str> {
        let address = match self {
            Self::EegRaw => "/eeg",
            Self::EegFiltered => "/notch_filtered_eeg",
            Self::EegQuantization => "/eeg/quantization",
            Self::Accelerometer => "/acc",
            Self::Gyroscope => "/gyro",
            Self::BandPower(band, metric) => return Cow::Owned(band.address(*metric)),
            Self::TouchingForehead => "/elements/touching_forehead",
            Self::IsGood => "/elements/is_good",
            Self::Battery => "/batt",
            Self::DrlRef => "/drlref",
            Self::Blink => "/elements/blink",
            Self::JawClench => "/elements/jaw_clench",
        };

        Cow::Borrowed(address)
    }

    /// Names of the positional arguments, in order.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Self::EegRaw | Self::EegFiltered | Self::BandPower(..) => EEG_FIELDS,
            Self::EegQuantization => &["stepsize"],
            Self::Accelerometer => &["x", "y", "z"],
            Self::Gyroscope => &["roll_rate", "pitch_rate", "yaw_rate"],
            Self::TouchingForehead => &["is_touching"],
            Self::IsGood => &["left_ear", "left_front", "right_front", "right_ear"],
            Self::Battery => &["decimal", "voltage", "temperature"],
            Self::DrlRef => &["drl", "ref"],
            Self::Blink => &["blinking"],
            Self::JawClench => &["clenching"],
        }
    }

    /// Number of positional arguments the device is expected to send.
    pub fn arity(&self) -> usize {
        self.field_names().len()
    }

    /// Names of the events derived from this address. The first one is emitted on every
    /// decode; any others are edge-triggered.
    pub fn event_names(&self) -> Vec<Cow<'static, str>> {
        let names: &[&'static str] = match self {
            Self::EegRaw => &["eeg raw"],
            Self::EegFiltered => &["eeg filtered"],
            Self::EegQuantization => &["eeg stepsize"],
            Self::Accelerometer => &["accel data"],
            Self::Gyroscope => &["gyro data"],
            Self::BandPower(band, metric) => return vec![Cow::Owned(band.event_name(*metric))],
            Self::TouchingForehead => &["contact status", "contact made", "contact lost"],
            Self::IsGood => &["channel status"],
            Self::Battery => &["battery status"],
            Self::DrlRef => &["drl status"],
            Self::Blink => &["blink status", "blink"],
            Self::JawClench => &["jaw clench status", "jaw clench"],
        };

        names.iter().map(|name| Cow::Borrowed(*name)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_binding_is_reachable_by_its_address() {
        assert_eq!(Binding::all().count(), 26);

        for binding in Binding::all() {
            assert_eq!(Binding::lookup(&binding.address()), Some(binding));
        }
    }

    #[test]
    fn band_power_bindings() {
        let band_power: Vec<_> = Binding::all()
            .filter(|binding| matches!(binding, Binding::BandPower(..)))
            .collect();

        assert_eq!(band_power.len(), 15);
        for binding in band_power {
            assert_eq!(binding.arity(), 4);
        }

        assert_eq!(
            Binding::lookup("/elements/alpha_session_score"),
            Some(Binding::BandPower(Band::Alpha, BandMetric::SessionScore))
        );
    }

    #[test]
    fn exact_match_only() {
        assert_eq!(Binding::lookup("/eeg"), Some(Binding::EegRaw));
        assert_eq!(Binding::lookup("/eeg/"), None);
        assert_eq!(Binding::lookup("/EEG"), None);
        assert_eq!(Binding::lookup("/elements/*_absolute"), None);
    }

    #[test]
    fn metadata() {
        assert_eq!(Binding::Battery.arity(), 3);
        assert_eq!(Binding::DrlRef.field_names(), &["drl", "ref"]);
        assert_eq!(
            Binding::BandPower(Band::Beta, BandMetric::Absolute).event_names(),
            vec![Cow::<str>::Owned("beta abp".to_string())]
        );
        assert_eq!(Binding::Blink.event_names(), vec!["blink status", "blink"]);
    }
}
