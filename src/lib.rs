#![doc = include_str!("../README.md")]

/// Exports [`MessageRouter`] and the [`Binding`] table mapping OSC addresses to decoders.
///
/// [`MessageRouter`]: crate::decoder::MessageRouter
/// [`Binding`]: crate::decoder::Binding
pub mod decoder;
/// Exports [`MuseEvent`], its payload types, and event receivers.
///
/// [`MuseEvent`]: crate::event::MuseEvent
pub mod event;
/// Exports [`MuseOscEngine`], [`MuseOscController`], and other types related to running the
/// adapter.
///
/// [`MuseOscEngine`]: crate::live::MuseOscEngine
/// [`MuseOscController`]: crate::live::MuseOscController
pub mod live;
/// Exports [`RawMessage`], the [`OscTransport`] trait and its implementations.
///
/// [`RawMessage`]: crate::osc::RawMessage
/// [`OscTransport`]: crate::osc::OscTransport
pub mod osc;
mod util;

/// Error types returned by `muse-osc`.
pub mod error {
    pub use super::live::{
        error::{ConfigValidationError, MuseOscError},
        process::error::MuseOscProcessFatalError,
    };
    pub use super::osc::error::OscTransportError;
    pub use super::util::PanicPayload;

    /// Convenience general-purpose Result type alias.
    pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
}
