use std::{panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;
use tokio::{
    sync::broadcast,
    time::{self, Instant, MissedTickBehavior},
};

use crate::{decoder::MessageRouter, event::MuseEvent, osc::OscTransport, util::AbortOnDropHandle};

use super::{
    config::{MuseOscConfig, MuseOscProcessConfig},
    liveness::{LivenessMonitor, LivenessTransition},
    state::{MuseOscStatus, MuseOscStatusManager},
};

pub(crate) mod error;

use error::{MuseOscProcessFatalError, ProcessResult};


pub(super) struct MuseOscProcess {
    config: MuseOscProcessConfig,
    transport: Box<dyn OscTransport>,
    router: MessageRouter,
    liveness: LivenessMonitor,
    status_manager: Arc<MuseOscStatusManager>,
}

impl MuseOscProcess {
    pub fn spawn(
        config: &MuseOscConfig,
        transport: Box<dyn OscTransport>,
        shutdown_tx: &broadcast::Sender<()>,
        status_manager: Arc<MuseOscStatusManager>,
    ) -> AbortOnDropHandle<()> {
        // Subscribe before spawning so an early stop request is never missed
        let shutdown_rx = shutdown_tx.subscribe();

        let process = Self {
            config: config.into(),
            transport,
            router: MessageRouter::new(config.prefix()),
            liveness: LivenessMonitor::new(config.timeout()),
            status_manager,
        };

        tokio::spawn(process.run_until_shutdown(shutdown_rx)).into()
    }

    async fn run(&mut self, shutdown_rx: &mut broadcast::Receiver<()>) -> ProcessResult<()> {
        self.transport
            .open()
            .await
            .map_err(MuseOscProcessFatalError::TransportOpen)?;

        self.router.open();
        self.status_manager.update_if_running(MuseOscStatus::Listening);
        self.status_manager.emit(MuseEvent::Open);

        let timeout = self.config.timeout();
        let mut liveness_check = time::interval_at(Instant::now() + timeout, timeout);
        liveness_check.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let Self {
            transport,
            router,
            liveness,
            status_manager,
            ..
        } = self;

        loop {
            tokio::select! {
                biased;
                shutdown_res = shutdown_rx.recv() => {
                    return shutdown_res.map_err(MuseOscProcessFatalError::ShutdownSignalRecv);
                }
                _ = liveness_check.tick() => {
                    match liveness.tick(Instant::now()) {
                        Some(LivenessTransition::Connected) => {
                            log::info!("Muse stream connected");
                            status_manager.update_if_running(MuseOscStatus::Connected);
                            status_manager.emit(MuseEvent::Connect);
                        }
                        Some(LivenessTransition::Disconnected) => {
                            log::info!("Muse stream disconnected, no message within {timeout:?}");
                            status_manager.update_if_running(MuseOscStatus::Listening);
                            status_manager.emit(MuseEvent::Disconnect);
                        }
                        None => {}
                    }
                }
                recv_res = transport.recv() => {
                    let msg = recv_res.map_err(MuseOscProcessFatalError::TransportRecv)?;

                    if let Some(events) = router.route(msg) {
                        liveness.record_message(Instant::now());

                        for event in events {
                            status_manager.emit(event);
                        }
                    }
                }
            }
        }
    }

    async fn run_until_shutdown(mut self, mut shutdown_rx: broadcast::Receiver<()>) {
        self.status_manager.update_if_running(MuseOscStatus::Starting);

        let run_res = FutureExt::catch_unwind(AssertUnwindSafe(self.run(&mut shutdown_rx)))
            .await
            .map_err(|e| MuseOscProcessFatalError::Panicked(e.into()))
            .and_then(|res| res);

        self.router.close();
        self.transport.close();

        match run_res {
            Ok(()) => {
                log::info!("MuseOsc transport closed");
                self.status_manager.update(MuseOscStatus::Shutdown);
                self.status_manager.emit(MuseEvent::Close);
            }
            Err(e) => {
                log::error!("MuseOsc process terminated: {e}");
                self.status_manager.update(e.into());
            }
        }
    }
}
