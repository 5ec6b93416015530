use tokio::sync::broadcast::{self, error::RecvError};

use super::models::MuseEvent;

pub(crate) type MuseEventTransmitter = broadcast::Sender<MuseEvent>;

/// Receiver for subscribing to every [`MuseEvent`].
pub type MuseEventReceiver = broadcast::Receiver<MuseEvent>;

/// Receiver yielding only the events with a given [name](MuseEvent::name).
///
/// Filtering happens on the receiving side, so the receiver shares the capacity of the full
/// event stream and can lag behind it like any [`MuseEventReceiver`]. A lag is not terminal:
/// the next call continues with the oldest event still buffered.
///
/// # Examples
///
/// ```no_run
/// use tokio::sync::broadcast::error::RecvError;
///
/// # async fn example(controller: std::sync::Arc<muse_osc::live::MuseOscController>) {
/// let mut blinks = controller.subscribe("blink");
///
/// loop {
///     match blinks.recv().await {
///         Ok(_) => { /* Handle blink */ }
///         Err(RecvError::Lagged(_)) => continue,
///         Err(RecvError::Closed) => break,
///     }
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct NamedEventReceiver {
    name: String,
    rx: MuseEventReceiver,
}

impl NamedEventReceiver {
    pub(crate) fn new(name: impl Into<String>, rx: MuseEventReceiver) -> Self {
        Self {
            name: name.into(),
            rx,
        }
    }

    /// Returns the event name this receiver is filtering on.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Waits for the next event with a matching name.
    ///
    /// Fails with [`RecvError::Lagged`] if the receiver fell behind, after which receiving can
    /// continue, and with [`RecvError::Closed`] once the engine is dropped.
    pub async fn recv(&mut self) -> Result<MuseEvent, RecvError> {
        loop {
            let event = self.rx.recv().await?;
            if event.name() == self.name {
                return Ok(event);
            }
        }
    }
}
