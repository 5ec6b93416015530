use std::{fmt, sync::Arc};

use tokio::sync::{broadcast, watch};

use crate::event::{MuseEvent, MuseEventReceiver, MuseEventTransmitter, NamedEventReceiver};

use super::process::error::MuseOscProcessFatalError;

/// Overall status of the MuseOsc process.
#[derive(Debug, Clone)]
pub enum MuseOscStatus {
    /// Process has not been started yet.
    NotInitiated,
    /// Process was spawned and is opening the transport.
    Starting,
    /// Transport is open but no device is streaming within the liveness timeout.
    Listening,
    /// A device is streaming within the liveness timeout.
    Connected,
    /// Stop has been requested and is in progress.
    ShutdownInitiated,
    /// Transport was closed after a stop request.
    Shutdown,
    /// Process terminated due to a fatal error.
    Terminated(Arc<MuseOscProcessFatalError>),
}

impl MuseOscStatus {
    /// Returns `true` if the process has stopped (either shut down or terminated).
    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Shutdown | Self::Terminated(_))
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for MuseOscStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitiated => write!(f, "Not initiated"),
            Self::Starting => write!(f, "Starting"),
            Self::Listening => write!(f, "Listening"),
            Self::Connected => write!(f, "Connected"),
            Self::ShutdownInitiated => write!(f, "Shutdown initiated"),
            Self::Shutdown => write!(f, "Shutdown"),
            Self::Terminated(error) => write!(f, "Terminated: {error}"),
        }
    }
}

impl From<Arc<MuseOscProcessFatalError>> for MuseOscStatus {
    fn from(value: Arc<MuseOscProcessFatalError>) -> Self {
        Self::Terminated(value)
    }
}

impl From<MuseOscProcessFatalError> for MuseOscStatus {
    fn from(value: MuseOscProcessFatalError) -> Self {
        Arc::new(value).into()
    }
}

/// Trait for reading the MuseOsc process status and subscribing to its events.
///
/// Provides a read-only interface without the ability to control the process.
pub trait MuseOscReader: Send + Sync + 'static {
    /// Creates a new [`MuseEventReceiver`] observing every event published from now on.
    fn update_receiver(&self) -> MuseEventReceiver;

    /// Creates a new [`NamedEventReceiver`] observing only events named `name`.
    fn subscribe(&self, name: &str) -> NamedEventReceiver {
        NamedEventReceiver::new(name, self.update_receiver())
    }

    /// Returns the current [`MuseOscStatus`] as a snapshot.
    fn status_snapshot(&self) -> MuseOscStatus;
}

#[derive(Debug)]
pub(crate) struct MuseOscStatusManager {
    status_tx: watch::Sender<MuseOscStatus>,
    event_tx: MuseEventTransmitter,
}

impl MuseOscStatusManager {
    pub fn new(event_buffer_size: usize) -> Arc<Self> {
        let (status_tx, _) = watch::channel(MuseOscStatus::NotInitiated);
        let (event_tx, _) = broadcast::channel(event_buffer_size);

        Arc::new(Self {
            status_tx,
            event_tx,
        })
    }

    pub fn update(&self, new_status: MuseOscStatus) {
        self.status_tx.send_replace(new_status);
    }

    /// Updates the status unless a stop was already requested or the process has stopped.
    pub fn update_if_running(&self, new_status: MuseOscStatus) {
        self.status_tx.send_if_modified(|status| {
            if matches!(status, MuseOscStatus::ShutdownInitiated) || status.is_stopped() {
                return false;
            }

            *status = new_status;
            true
        });
    }

    pub fn emit(&self, event: MuseEvent) {
        // Ignore no-receivers errors
        let _ = self.event_tx.send(event);
    }

    /// Waits until the status is stopped and returns it.
    pub async fn until_stopped(&self) -> MuseOscStatus {
        let mut status_rx = self.status_tx.subscribe();

        match status_rx.wait_for(MuseOscStatus::is_stopped).await {
            Ok(status) => status.clone(),
            // The sender lives as long as `self`
            Err(_) => self.status_snapshot(),
        }
    }
}

impl MuseOscReader for MuseOscStatusManager {
    fn update_receiver(&self) -> MuseEventReceiver {
        self.event_tx.subscribe()
    }

    fn status_snapshot(&self) -> MuseOscStatus {
        self.status_tx.borrow().clone()
    }
}
