//! Process lifecycle
//!
//! Signal wiring, terminal mode, privilege check, the end-of-cycle wait and
//! the ordered release of everything acquired at startup.

pub mod input;
pub mod privilege;
pub mod session;
pub mod signal;
pub mod terminal;

pub use input::{ConsoleWaiter, InputWaiter, SleepWaiter};
pub use privilege::ensure_privileged;
pub use session::Session;
pub use signal::{install_signal_handlers, CancellationToken};
pub use terminal::{CrosstermTerminal, TerminalGuard, TerminalMode};
