use std::result;

use thiserror::Error;
use tokio::{
    sync::broadcast::error::{RecvError, SendError},
    task::JoinError,
};

use crate::{osc::error::OscTransportError, util::PanicPayload};

#[derive(Error, Debug)]
pub enum MuseOscProcessFatalError {
    #[error("Failed to open OSC transport: {0}")]
    TransportOpen(OscTransportError),

    #[error("OSC transport failed: {0}")]
    TransportRecv(OscTransportError),

    #[error("MuseOsc process panicked: {0}")]
    Panicked(PanicPayload),

    #[error("TaskJoin error {0}")]
    MuseOscProcessTaskJoin(JoinError),

    #[error("Shutdown `RecvError` error: {0}")]
    ShutdownSignalRecv(RecvError),

    #[error("Failed to send MuseOsc process shutdown request error: {0}")]
    SendShutdownSignalFailed(SendError<()>),

    #[error("MuseOsc shutdown timeout error")]
    ShutdownTimeout,
}

pub(crate) type ProcessResult<T> = result::Result<T, MuseOscProcessFatalError>;
