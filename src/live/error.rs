use std::{result, sync::Arc};

use thiserror::Error;
use tokio::time;

use super::{process::error::MuseOscProcessFatalError, state::MuseOscStatus};

#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("Invalid timeout, must be greater than zero")]
    ZeroTimeout,

    #[error("Invalid timeout {0:?}, too large to schedule liveness checks")]
    TimeoutTooLarge(time::Duration),

    #[error("Invalid event buffer size, must be greater than zero")]
    ZeroEventBufferSize,

    #[error("Invalid prefix {0:?}, must not end with '/'")]
    PrefixTrailingSlash(String),
}

#[derive(Error, Debug)]
pub enum MuseOscError {
    #[error(transparent)]
    Config(#[from] ConfigValidationError),

    #[error("MuseOsc process already stopped error")]
    AlreadyStopped,

    #[error("MuseOsc process already terminated error, status: {0}")]
    AlreadyTerminated(MuseOscStatus),

    #[error("MuseOsc stop procedure failed: {0}")]
    StopFailed(Arc<MuseOscProcessFatalError>),
}

pub(super) type Result<T> = result::Result<T, MuseOscError>;
