//! # Connectivity Signal
//!
//! Online/offline status for the sync coordinator: a synchronously readable
//! flag plus a subscribable became-online event. The signal is treated as
//! ground truth with no debouncing.

use tokio::sync::watch;

/// Readable connectivity state
pub trait ConnectivityProbe: Send + Sync {
    /// Whether the client currently reports itself online
    fn is_online(&self) -> bool;
}

/// Process-local connectivity monitor
///
/// The UI shell feeds platform events (network change callbacks, reachability
/// probes) into [`set_online`](NetworkMonitor::set_online); the coordinator
/// reads the flag and subscribes to transitions.
#[derive(Debug)]
pub struct NetworkMonitor {
    status: watch::Sender<bool>,
}

impl NetworkMonitor {
    /// Create a monitor with the given initial status
    pub fn new(initially_online: bool) -> Self {
        let (status, _) = watch::channel(initially_online);
        Self { status }
    }

    /// Record a connectivity change
    pub fn set_online(&self, online: bool) {
        let previous = self.status.send_replace(online);
        if online != previous {
            if online {
                tracing::info!("network: online");
            } else {
                tracing::warn!("network: offline");
            }
        }
    }

    /// Subscribe to connectivity changes
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.status.subscribe()
    }
}

impl ConnectivityProbe for NetworkMonitor {
    fn is_online(&self) -> bool {
        *self.status.borrow()
    }
}

impl Default for NetworkMonitor {
    fn default() -> Self {
        // Match browser semantics: assume online until told otherwise
        Self::new(true)
    }
}
