use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

/// EEG frequency band reported by the headband's band power elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Band {
    Delta,
    Theta,
    Alpha,
    Beta,
    Gamma,
}

/// How a band power value is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum BandMetric {
    /// Absolute band power (log-scaled).
    Absolute,
    /// Band power relative to the sum of all bands.
    Relative,
    /// Score relative to the band's history during the current session.
    SessionScore,
}

impl BandMetric {
    /// Suffix of the derived event name, e.g. `abp` in `"alpha abp"`.
    pub fn event_suffix(&self) -> &'static str {
        match self {
            Self::Absolute => "abp",
            Self::Relative => "rbp",
            Self::SessionScore => "score",
        }
    }
}

impl Band {
    /// OSC address carrying this band's `metric`, e.g. `/elements/alpha_relative`.
    pub fn address(&self, metric: BandMetric) -> String {
        format!("/elements/{}_{}", self.as_ref(), metric.as_ref())
    }

    /// Name of the derived event for this band's `metric`, e.g. `"alpha rbp"`.
    pub fn event_name(&self, metric: BandMetric) -> String {
        format!("{} {}", self.as_ref(), metric.event_suffix())
    }

    /// Iterates every `(band, metric)` combination.
    pub fn all_pairs() -> impl Iterator<Item = (Band, BandMetric)> {
        Band::iter().flat_map(|band| BandMetric::iter().map(move |metric| (band, metric)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_and_event_names() {
        assert_eq!(
            Band::Delta.address(BandMetric::Absolute),
            "/elements/delta_absolute"
        );
        assert_eq!(
            Band::Gamma.address(BandMetric::SessionScore),
            "/elements/gamma_session_score"
        );
        assert_eq!(Band::Theta.event_name(BandMetric::Relative), "theta rbp");
        assert_eq!(Band::Beta.event_name(BandMetric::SessionScore), "beta score");
    }

    #[test]
    fn fifteen_band_pairs() {
        assert_eq!(Band::all_pairs().count(), 15);
    }
}
