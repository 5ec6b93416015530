mod config;
mod engine;
pub(crate) mod error;
mod liveness;
pub(crate) mod process;
mod state;

pub use config::MuseOscConfig;
pub use engine::{MuseOscController, MuseOscEngine};
pub use state::{MuseOscReader, MuseOscStatus};
