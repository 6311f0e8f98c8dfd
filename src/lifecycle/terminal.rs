//! Terminal mode for table output
//!
//! Table mode needs unbuffered, unechoed input (so one keystroke ends the
//! wait) and a hidden cursor (so redraws do not flicker). [`TerminalGuard`]
//! undoes both exactly once when dropped.

use crate::error::{AppError, Result};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io;

/// A reversible terminal mode change
pub trait TerminalMode {
    /// Switch the terminal into monitoring mode
    fn enter(&mut self) -> io::Result<()>;

    /// Put the terminal back the way it was found
    fn restore(&mut self) -> io::Result<()>;
}

/// Raw mode and hidden cursor on the process's controlling terminal
#[derive(Debug, Default)]
pub struct CrosstermTerminal;

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self
    }
}

impl TerminalMode for CrosstermTerminal {
    fn enter(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(io::stdout(), Hide)
    }

    fn restore(&mut self) -> io::Result<()> {
        let shown = execute!(io::stdout(), Show);
        disable_raw_mode()?;
        shown
    }
}

/// Holds a terminal mode for as long as it lives
pub struct TerminalGuard<T: TerminalMode> {
    mode: T,
}

impl<T: TerminalMode> TerminalGuard<T> {
    /// Enter `mode`, failing with `TerminalSetup` if the terminal refuses
    pub fn acquire(mut mode: T) -> Result<Self> {
        if let Err(e) = mode.enter() {
            // Undo whatever half of the setup succeeded.
            let _ = mode.restore();
            return Err(AppError::TerminalSetup(e));
        }
        log::debug!("Terminal switched to monitoring mode");
        Ok(Self { mode })
    }
}

impl<T: TerminalMode> Drop for TerminalGuard<T> {
    fn drop(&mut self) {
        match self.mode.restore() {
            Ok(()) => log::debug!("Terminal restored"),
            Err(e) => log::warn!("Failed to restore terminal: {}", e),
        }
    }
}
