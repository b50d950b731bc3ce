//! Notification publishing/subscription abstraction (mechanics only).
//!
//! Every observable object in the view-model layer (fields, collections, commands)
//! announces changes through an `EventBus`. The UI binding layer, tests and other
//! collaborators subscribe and receive a copy of each message.
//!
//! ## Delivery
//!
//! - **Broadcast**: each subscription gets every message published after it subscribed
//! - **Publisher order**: messages from one publisher arrive in publish order
//! - **No marshaling**: messages are delivered on whatever thread published them; moving
//!   them onto a UI thread is the subscriber's concern

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to a notification stream.
///
/// ```ignore
/// let subscription = notifier.subscribe();
/// account.set_balance(Money::new(10, 0));
///
/// match subscription.recv_timeout(Duration::from_secs(1)) {
///     Ok(changed) => assert_eq!(changed.property, "balance"),
///     Err(e) => panic!("no notification: {e}"),
/// }
/// ```
///
/// Subscriptions are designed for single-threaded consumption.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Collect everything already delivered without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Notification bus (pub/sub abstraction).
///
/// `publish()` can fail (e.g. internal lock poisoning). Notifiers treat publication as
/// best-effort: a failed publish is logged and never aborts the state change that
/// triggered it.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
