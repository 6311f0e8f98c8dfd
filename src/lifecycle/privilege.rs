//! Root privilege check
//!
//! Mapping `/dev/mem` needs root; failing here gives a clear message instead
//! of an EPERM deep inside the first register read.

use crate::error::{AppError, Result};

/// True when running with effective uid 0
pub fn is_privileged() -> bool {
    // SAFETY: geteuid cannot fail and has no preconditions.
    unsafe { libc::geteuid() == 0 }
}

/// Fail fast unless running as root
pub fn ensure_privileged() -> Result<()> {
    if is_privileged() {
        Ok(())
    } else {
        Err(AppError::PrivilegeRequired)
    }
}
