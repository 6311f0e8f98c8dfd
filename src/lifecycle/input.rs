//! The end-of-cycle wait
//!
//! Waiting is both the refresh delay and the keyboard escape hatch: the wait
//! ends when the interval elapses or when any key is pressed, whichever comes
//! first.

use crossterm::event::{self, Event, KeyEventKind};
use std::io;
use std::time::{Duration, Instant};

/// Bounded wait between refresh cycles
pub trait InputWaiter {
    /// Block for at most `timeout`; `Ok(true)` means a key ended the wait
    fn wait(&mut self, timeout: Duration) -> io::Result<bool>;
}

impl<W: InputWaiter + ?Sized> InputWaiter for Box<W> {
    fn wait(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).wait(timeout)
    }
}

/// Waits on console key events
#[derive(Debug, Default)]
pub struct ConsoleWaiter;

impl ConsoleWaiter {
    pub fn new() -> Self {
        Self
    }
}

impl InputWaiter for ConsoleWaiter {
    fn wait(&mut self, timeout: Duration) -> io::Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                return Ok(false);
            }
            // Resize, focus and mouse events do not end the wait.
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    log::debug!("Key press ended the wait");
                    return Ok(true);
                }
            }
        }
    }
}

/// Plain sleep for when standard input is not a terminal
#[derive(Debug, Default)]
pub struct SleepWaiter;

impl SleepWaiter {
    pub fn new() -> Self {
        Self
    }
}

impl InputWaiter for SleepWaiter {
    fn wait(&mut self, timeout: Duration) -> io::Result<bool> {
        std::thread::sleep(timeout);
        Ok(false)
    }
}
