use std::{
    any::Any,
    fmt,
    future::Future,
    ops::{Deref, DerefMut},
    pin::Pin,
    task::{Context, Poll},
};

use tokio::task::{JoinError, JoinHandle};

/// A wrapper around `tokio::task::JoinHandle` that aborts the task when dropped, while still
/// allowing the handle to be awaited.
///
/// Dropping a [`MuseOscController`](crate::live::MuseOscController) without calling `stop`
/// therefore also releases the transport.
#[derive(Debug)]
pub(crate) struct AbortOnDropHandle<T>(JoinHandle<T>);

impl<T> From<JoinHandle<T>> for AbortOnDropHandle<T> {
    fn from(handle: JoinHandle<T>) -> Self {
        Self(handle)
    }
}

impl<T> Deref for AbortOnDropHandle<T> {
    type Target = JoinHandle<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for AbortOnDropHandle<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> Future for AbortOnDropHandle<T> {
    type Output = Result<T, JoinError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0).poll(cx)
    }
}

impl<T> Drop for AbortOnDropHandle<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Message carried by a panic caught inside the MuseOsc process.
#[derive(Debug)]
pub struct PanicPayload(String);

impl From<Box<dyn Any + Send>> for PanicPayload {
    fn from(value: Box<dyn Any + Send>) -> Self {
        let panic_msg = if let Some(s) = value.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = value.downcast_ref::<&str>() {
            s.to_string()
        } else {
            "unknown panic payload".to_string()
        };

        Self(panic_msg)
    }
}

impl fmt::Display for PanicPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::{sync::oneshot, time};

    use super::*;

    #[tokio::test]
    async fn aborts_task_on_drop() {
        let (tx, rx) = oneshot::channel::<()>();

        let handle = AbortOnDropHandle::from(tokio::spawn(async move {
            time::sleep(Duration::from_secs(60)).await;
            let _ = tx.send(());
        }));
        drop(handle);

        // The sender is dropped along with the aborted task
        assert!(rx.await.is_err());
    }

    #[test]
    fn panic_payload_keeps_message() {
        let formatted: Box<dyn Any + Send> = Box::new(format!("overflow at {}", 42));
        assert_eq!(PanicPayload::from(formatted).to_string(), "overflow at 42");

        let literal: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(PanicPayload::from(literal).to_string(), "boom");

        let opaque: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(
            PanicPayload::from(opaque).to_string(),
            "unknown panic payload"
        );
    }

    #[tokio::test]
    async fn can_be_awaited() {
        let handle = AbortOnDropHandle::from(tokio::spawn(async { 42 }));
        assert_eq!(handle.await.unwrap(), 42);
    }
}
