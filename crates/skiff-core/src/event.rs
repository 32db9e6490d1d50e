//! Navigation signals between views.
//!
//! Any view can ask the root view to reset navigation, without a global
//! notification broadcast: the root view holds the receiver, and a cloned
//! [`NavBus`] handle is passed down through the view tree. No global state,
//! no implicit broadcast.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A navigation request sent from a nested view to the root view.
///
/// Signals flow **view → root**. The root drains its receiver and applies
/// the requested navigation change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavSignal {
    /// Reset the navigation stack back to the app's root directory.
    JumpToRoot,
}

/// A cloneable sender handle for navigation signals.
///
/// Created together with its receiver via [`NavBus::new`]; the receiver
/// stays with the root view, the bus is handed to child views.
#[derive(Debug, Clone)]
pub struct NavBus {
    tx: UnboundedSender<NavSignal>,
}

impl NavBus {
    /// Creates a bus and the receiver the root view should drain.
    pub fn new() -> (Self, UnboundedReceiver<NavSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Requests that the root view reset navigation to the app root.
    ///
    /// Sending never fails from the caller's perspective: if the root view
    /// (and with it the receiver) is already gone, the signal is dropped.
    pub fn jump_to_root(&self) {
        self.send(NavSignal::JumpToRoot);
    }

    /// Sends an arbitrary navigation signal.
    pub fn send(&self, signal: NavSignal) {
        let _ = self.tx.send(signal);
    }
}
