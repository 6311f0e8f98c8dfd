//! Termination signal handling
//!
//! SIGINT, SIGTERM and SIGHUP only flip a shared flag. The refresh loop reads
//! it once at the top of each cycle, so a register read or NVML call already
//! in flight always finishes first.

use crate::error::Result;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared stop flag set from signal handling, read by the refresh loop
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request termination at the next cycle boundary
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Route SIGINT, SIGTERM and SIGHUP to `token`
///
/// May be called once per process.
pub fn install_signal_handlers(token: &CancellationToken) -> Result<()> {
    let token = token.clone();
    ctrlc::set_handler(move || token.cancel())?;
    log::debug!("Installed handlers for SIGINT, SIGTERM and SIGHUP");
    Ok(())
}
