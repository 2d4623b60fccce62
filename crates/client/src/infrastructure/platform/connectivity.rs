//! Connectivity signals for the offline fallback policy.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::ports::outbound::ConnectivityProvider;

/// Assumes the network is always reachable.
#[derive(Clone, Copy, Default)]
pub struct AlwaysOnline;

impl ConnectivityProvider for AlwaysOnline {
    fn is_online(&self) -> bool {
        true
    }
}

/// Shared online flag, updated by whatever monitors the network (the shell's
/// equivalent of `navigator.onLine`). Clones share the flag.
#[derive(Clone)]
pub struct SharedConnectivity {
    online: Arc<AtomicBool>,
}

impl SharedConnectivity {
    pub fn new(online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

impl ConnectivityProvider for SharedConnectivity {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}
