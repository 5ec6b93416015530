use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tokio::time;

use super::error::{ConfigValidationError, Result};

/// Configuration for the [`MuseOscEngine`](super::MuseOscEngine).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use muse_osc::live::MuseOscConfig;
///
/// // Listen on 127.0.0.1:7000 for unprefixed addresses
/// let config = MuseOscConfig::default();
///
/// // Customize configuration
/// let config = MuseOscConfig::default()
///     .with_prefix("/muse")
///     .with_port(5000)
///     .with_timeout(Duration::from_millis(500));
/// ```
#[derive(Clone, Debug)]
pub struct MuseOscConfig {
    prefix: String,
    timeout: time::Duration,
    bind_address: IpAddr,
    port: u16,
    event_buffer_size: usize,
    shutdown_timeout: time::Duration,
}

impl Default for MuseOscConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            timeout: time::Duration::from_millis(250),
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 7000,
            event_buffer_size: 1_000,
            shutdown_timeout: time::Duration::from_secs(6),
        }
    }
}

impl MuseOscConfig {
    /// Returns the topic prefix incoming addresses must start with.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the liveness timeout, which is also the liveness check period.
    pub fn timeout(&self) -> time::Duration {
        self.timeout
    }

    /// Returns the local address the UDP transport binds to.
    pub fn bind_address(&self) -> IpAddr {
        self.bind_address
    }

    /// Returns the local port the UDP transport binds to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the socket address the UDP transport binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Returns the capacity of the event broadcast channel.
    pub fn event_buffer_size(&self) -> usize {
        self.event_buffer_size
    }

    /// Returns how long `stop` waits for the process to close before aborting it.
    pub fn shutdown_timeout(&self) -> time::Duration {
        self.shutdown_timeout
    }

    /// Sets the topic prefix. The default is empty, accepting every address.
    ///
    /// With prefix `/muse`, `/muse/eeg` is accepted and routed as `/eeg`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the liveness timeout. The default is 250 milliseconds.
    pub fn with_timeout(mut self, timeout: time::Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the local bind address. The default is `127.0.0.1`.
    pub fn with_bind_address(mut self, bind_address: IpAddr) -> Self {
        self.bind_address = bind_address;
        self
    }

    /// Sets the local port. The default is `7000`.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the capacity of the event broadcast channel. The default is 1000.
    ///
    /// Receivers that fall more than this many events behind observe a lag error.
    pub fn with_event_buffer_size(mut self, event_buffer_size: usize) -> Self {
        self.event_buffer_size = event_buffer_size;
        self
    }

    /// Sets the shutdown timeout. The default is 6 seconds.
    pub fn with_shutdown_timeout(mut self, shutdown_timeout: time::Duration) -> Self {
        self.shutdown_timeout = shutdown_timeout;
        self
    }

    pub(super) fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(ConfigValidationError::ZeroTimeout.into());
        }

        // Liveness checks are scheduled one and two periods ahead of the current instant
        let schedulable = time::Instant::now()
            .checked_add(self.timeout)
            .and_then(|first_check| first_check.checked_add(self.timeout))
            .is_some();
        if !schedulable {
            return Err(ConfigValidationError::TimeoutTooLarge(self.timeout).into());
        }

        if self.event_buffer_size == 0 {
            return Err(ConfigValidationError::ZeroEventBufferSize.into());
        }

        if self.prefix.ends_with('/') {
            return Err(ConfigValidationError::PrefixTrailingSlash(self.prefix.clone()).into());
        }

        Ok(())
    }
}

#[derive(Clone, Debug)]
pub(super) struct MuseOscProcessConfig {
    timeout: time::Duration,
}

impl MuseOscProcessConfig {
    pub fn timeout(&self) -> time::Duration {
        self.timeout
    }
}

impl From<&MuseOscConfig> for MuseOscProcessConfig {
    fn from(value: &MuseOscConfig) -> Self {
        Self {
            timeout: value.timeout(),
        }
    }
}

#[derive(Clone, Debug)]
pub(super) struct MuseOscControllerConfig {
    shutdown_timeout: time::Duration,
}

impl MuseOscControllerConfig {
    pub fn shutdown_timeout(&self) -> time::Duration {
        self.shutdown_timeout
    }
}

impl From<&MuseOscConfig> for MuseOscControllerConfig {
    fn from(value: &MuseOscConfig) -> Self {
        Self {
            shutdown_timeout: value.shutdown_timeout(),
        }
    }
}
