//! Display notification for calculator engines.
//!
//! The engine never touches a widget. It hands the new display text to a
//! [`DisplaySink`], which can be a closure, a channel, or nothing at all.

use flume::{Receiver, Sender};
use tracing::warn;

/// Receives display text whenever the engine's display changes.
pub trait DisplaySink {
    fn display_updated(&mut self, text: &str);
}

impl<F> DisplaySink for F
where
    F: FnMut(&str),
{
    fn display_updated(&mut self, text: &str) {
        self(text)
    }
}

/// Sink that discards updates, for drivers that poll the engine instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn display_updated(&mut self, _text: &str) {}
}

/// Sink that forwards every update over a channel.
///
/// Lets the display consumer live on another thread than the engine.
#[derive(Clone)]
pub struct ChannelDisplay {
    sender: Sender<String>,
}

impl ChannelDisplay {
    /// Create a sink and the receiver that observes its updates.
    pub fn unbounded() -> (Self, Receiver<String>) {
        let (sender, receiver) = flume::unbounded();
        (Self { sender }, receiver)
    }

    pub fn new(sender: Sender<String>) -> Self {
        Self { sender }
    }
}

impl DisplaySink for ChannelDisplay {
    fn display_updated(&mut self, text: &str) {
        if self.sender.send(text.to_string()).is_err() {
            warn!("Display receiver dropped, update {:?} lost", text);
        }
    }
}
