use std::sync::{Arc, Mutex};

use tokio::{sync::broadcast, time};

use crate::{
    event::{MuseEventReceiver, NamedEventReceiver},
    osc::{OscTransport, UdpOscTransport},
    util::AbortOnDropHandle,
};

use super::{
    config::{MuseOscConfig, MuseOscControllerConfig},
    error::{MuseOscError, Result},
    process::{MuseOscProcess, error::MuseOscProcessFatalError},
    state::{MuseOscReader, MuseOscStatus, MuseOscStatusManager},
};

/// Controller for managing and monitoring a running MuseOsc process.
///
/// `MuseOscController` provides an interface to observe the event stream and connection status,
/// and to stop the process. Dropping the controller aborts the process without emitting
/// `close`.
#[derive(Debug)]
pub struct MuseOscController {
    config: MuseOscControllerConfig,
    handle: Mutex<Option<AbortOnDropHandle<()>>>,
    shutdown_tx: broadcast::Sender<()>,
    status_manager: Arc<MuseOscStatusManager>,
}

impl MuseOscController {
    fn new(
        config: &MuseOscConfig,
        handle: AbortOnDropHandle<()>,
        shutdown_tx: broadcast::Sender<()>,
        status_manager: Arc<MuseOscStatusManager>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config: config.into(),
            handle: Mutex::new(Some(handle)),
            shutdown_tx,
            status_manager,
        })
    }

    /// Returns a [`MuseOscReader`] interface for accessing status and events.
    pub fn reader(&self) -> Arc<dyn MuseOscReader> {
        self.status_manager.clone()
    }

    /// Creates a new [`MuseEventReceiver`] observing every event published from now on.
    pub fn update_receiver(&self) -> MuseEventReceiver {
        self.status_manager.update_receiver()
    }

    /// Creates a new [`NamedEventReceiver`] observing only events named `name`, such as
    /// `"blink"` or `"/eeg"`.
    pub fn subscribe(&self, name: &str) -> NamedEventReceiver {
        self.status_manager.subscribe(name)
    }

    /// Returns the current [`MuseOscStatus`] as a snapshot.
    pub fn status_snapshot(&self) -> MuseOscStatus {
        self.status_manager.status_snapshot()
    }

    /// Returns `true` if a device is currently streaming within the liveness timeout.
    pub fn is_connected(&self) -> bool {
        self.status_snapshot().is_connected()
    }

    fn try_consume_handle(&self) -> Option<AbortOnDropHandle<()>> {
        self.handle
            .lock()
            .expect("`MuseOscController` mutex can't be poisoned")
            .take()
    }

    /// Stops the process: cancels the liveness timer, closes the transport and emits `close`.
    ///
    /// Messages still queued in the transport are discarded. If the process does not stop
    /// within the configured shutdown timeout, it is aborted. This method can only be called
    /// once per controller instance.
    ///
    /// Returns an error if the process had to be aborted, had already terminated, or if the
    /// handle was already consumed.
    pub async fn stop(&self) -> Result<()> {
        let Some(mut handle) = self.try_consume_handle() else {
            return Err(MuseOscError::AlreadyStopped);
        };

        if handle.is_finished() {
            let status = self.status_manager.status_snapshot();
            return Err(MuseOscError::AlreadyTerminated(status));
        }

        self.status_manager.update(MuseOscStatus::ShutdownInitiated);

        let shutdown_send_res = self.shutdown_tx.send(()).map_err(|e| {
            handle.abort();
            MuseOscProcessFatalError::SendShutdownSignalFailed(e)
        });

        let shutdown_res = match shutdown_send_res {
            Ok(_) => {
                tokio::select! {
                    join_res = &mut handle => {
                        join_res.map_err(MuseOscProcessFatalError::MuseOscProcessTaskJoin)
                    }
                    _ = time::sleep(self.config.shutdown_timeout()) => {
                        handle.abort();
                        Err(MuseOscProcessFatalError::ShutdownTimeout)
                    }
                }
            }
            Err(e) => Err(e),
        };

        if let Err(e) = shutdown_res {
            let e_ref = Arc::new(e);
            self.status_manager.update(e_ref.clone().into());

            return Err(MuseOscError::StopFailed(e_ref));
        }

        // The process reports its own terminal status, unless it failed while stopping
        let status = self.status_manager.status_snapshot();
        if let MuseOscStatus::Terminated(err) = status {
            return Err(MuseOscError::StopFailed(err));
        }

        Ok(())
    }

    /// Waits until the process has stopped and returns the final status.
    pub async fn until_stopped(&self) -> MuseOscStatus {
        self.status_manager.until_stopped().await
    }
}

/// Builder for configuring and starting a MuseOsc process.
///
/// `MuseOscEngine` holds the configuration and the transport. The process is spawned when
/// [`start`](Self::start) is called, and a [`MuseOscController`] is returned for monitoring and
/// management. Receivers created before `start` observe the `open` event.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use muse_osc::{event::MuseEvent, live::{MuseOscConfig, MuseOscEngine}};
///
/// let engine = MuseOscEngine::new(MuseOscConfig::default().with_prefix("/muse"))?;
/// let mut events = engine.update_receiver();
/// let controller = engine.start();
///
/// while let Ok(event) = events.recv().await {
///     if let MuseEvent::EegRaw(eeg) = event {
///         println!("TP9: {:?}", eeg.tp9);
///     }
/// }
///
/// controller.stop().await?;
/// # Ok(())
/// # }
/// ```
pub struct MuseOscEngine {
    config: MuseOscConfig,
    transport: Box<dyn OscTransport>,
    status_manager: Arc<MuseOscStatusManager>,
}

impl MuseOscEngine {
    /// Creates a new engine listening for OSC datagrams on the configured UDP address.
    pub fn new(config: impl Into<MuseOscConfig>) -> Result<Self> {
        let config = config.into();
        let transport = UdpOscTransport::new(config.socket_addr());

        Self::with_transport(config, transport)
    }

    /// Creates a new engine reading messages from a custom [`OscTransport`].
    ///
    /// The bind address and port of the configuration are ignored.
    pub fn with_transport(
        config: impl Into<MuseOscConfig>,
        transport: impl OscTransport,
    ) -> Result<Self> {
        let config = config.into();
        config.validate()?;

        let status_manager = MuseOscStatusManager::new(config.event_buffer_size());

        Ok(Self {
            config,
            transport: Box::new(transport),
            status_manager,
        })
    }

    /// Returns a reader interface for accessing status and events.
    pub fn reader(&self) -> Arc<dyn MuseOscReader> {
        self.status_manager.clone()
    }

    /// Creates a new receiver observing every event published from now on.
    pub fn update_receiver(&self) -> MuseEventReceiver {
        self.status_manager.update_receiver()
    }

    /// Creates a new receiver observing only events named `name`.
    pub fn subscribe(&self, name: &str) -> NamedEventReceiver {
        self.status_manager.subscribe(name)
    }

    /// Returns the current status as a snapshot.
    pub fn status_snapshot(&self) -> MuseOscStatus {
        self.status_manager.status_snapshot()
    }

    /// Starts the process and returns a [`MuseOscController`] for managing it.
    ///
    /// This consumes the engine and spawns the process in the background, so it must be called
    /// from within a Tokio runtime. Transport failures, such as the port being in use, are
    /// reported through [`MuseOscStatus::Terminated`].
    pub fn start(self) -> Arc<MuseOscController> {
        let (shutdown_tx, _) = broadcast::channel::<()>(1);

        let handle = MuseOscProcess::spawn(
            &self.config,
            self.transport,
            &shutdown_tx,
            self.status_manager.clone(),
        );

        MuseOscController::new(&self.config, handle, shutdown_tx, self.status_manager)
    }
}
