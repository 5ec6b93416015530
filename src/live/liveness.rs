use tokio::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LivenessTransition {
    Connected,
    Disconnected,
}

/// Decides whether the device is connected from the time elapsed since its last message.
///
/// The state is only re-evaluated on [`tick`](LivenessMonitor::tick), so transitions lag the
/// actual stream by up to one tick period. A device that never sent a message is never
/// considered connected.
#[derive(Debug)]
pub(crate) struct LivenessMonitor {
    timeout: Duration,
    connected: bool,
    last_message: Option<Instant>,
}

impl LivenessMonitor {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            connected: false,
            last_message: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn record_message(&mut self, now: Instant) {
        self.last_message = Some(now);
    }

    /// Re-evaluates the connection state, returning the transition if the state changed.
    pub fn tick(&mut self, now: Instant) -> Option<LivenessTransition> {
        let within_timeout = self
            .last_message
            .is_some_and(|last| now.saturating_duration_since(last) <= self.timeout);

        match (self.connected, within_timeout) {
            (true, false) => {
                self.connected = false;
                Some(LivenessTransition::Disconnected)
            }
            (false, true) => {
                self.connected = true;
                Some(LivenessTransition::Connected)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_millis(250);

    #[test]
    fn silent_device_never_connects() {
        let start = Instant::now();
        let mut monitor = LivenessMonitor::new(TIMEOUT);

        for i in 0..10 {
            assert_eq!(monitor.tick(start + TIMEOUT * i), None);
        }
        assert!(!monitor.is_connected());
    }

    #[test]
    fn connects_and_disconnects_once() {
        let start = Instant::now();
        let mut monitor = LivenessMonitor::new(TIMEOUT);

        monitor.record_message(start);
        assert_eq!(
            monitor.tick(start + TIMEOUT),
            Some(LivenessTransition::Connected)
        );
        assert!(monitor.is_connected());

        assert_eq!(
            monitor.tick(start + TIMEOUT * 2),
            Some(LivenessTransition::Disconnected)
        );
        assert_eq!(monitor.tick(start + TIMEOUT * 3), None);
        assert_eq!(monitor.tick(start + TIMEOUT * 4), None);
        assert!(!monitor.is_connected());
    }

    #[test]
    fn steady_stream_stays_connected() {
        let start = Instant::now();
        let mut monitor = LivenessMonitor::new(TIMEOUT);
        let mut transitions = Vec::new();

        for i in 1..=20 {
            let now = start + Duration::from_millis(50 * i);
            monitor.record_message(now);
            if i % 5 == 0 {
                transitions.extend(monitor.tick(now));
            }
        }

        assert_eq!(transitions, vec![LivenessTransition::Connected]);
    }

    #[test]
    fn reconnects_after_silence() {
        let start = Instant::now();
        let mut monitor = LivenessMonitor::new(TIMEOUT);

        monitor.record_message(start);
        monitor.tick(start + TIMEOUT);
        monitor.tick(start + TIMEOUT * 2);

        let resumed = start + TIMEOUT * 10;
        monitor.record_message(resumed);
        assert_eq!(
            monitor.tick(resumed + Duration::from_millis(10)),
            Some(LivenessTransition::Connected)
        );
    }
}
