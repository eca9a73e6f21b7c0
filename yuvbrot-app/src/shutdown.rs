//! Process-wide quit flag, raised by the quit command or a window close
//! request and polled once per frame boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    raised: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown. Raising more than once has no further effect.
    pub fn raise(&self) {
        if !self.raised.swap(true, Ordering::AcqRel) {
            info!("Shutdown requested");
        }
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}
