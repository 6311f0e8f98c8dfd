//! Refresh loop
//!
//! Drives `Idle → Sampling → Rendered → Waiting → (Sampling | Terminated)`.
//! The cancellation flag is read once per cycle, before sampling starts.

use crate::cli::output::Renderer;
use crate::error::Result;
use crate::lifecycle::{CancellationToken, InputWaiter};
use crate::services::sampler::TelemetrySource;

use std::io::Write;
use std::time::Duration;

/// Default time between refresh cycles
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for the monitor
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Interval between refresh cycles
    pub interval: Duration,
    /// Whether to exit after one cycle
    pub once: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            once: false,
        }
    }
}

/// Where the refresh loop is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Sampling,
    Rendered,
    Waiting,
    Terminated,
}

/// Why a loop ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A termination signal was observed at the top of a cycle
    Cancelled,
    /// One-shot mode finished its cycle
    OneShot,
    /// A key press ended the wait
    KeyPressed,
}

/// Refresh loop monitor
pub struct Monitor {
    config: MonitorConfig,
    state: MonitorState,
    cycles: u64,
}

impl Monitor {
    /// Create a new monitor with the given configuration
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            state: MonitorState::Idle,
            cycles: 0,
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Completed (rendered) cycles
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run until cancelled, a key is pressed, one-shot completes, or a cycle fails
    ///
    /// The renderer's trailer is written on every exit path once anything was
    /// rendered, so the terminal is left below the last frame.
    pub fn run<S, R, W, O>(
        &mut self,
        source: &S,
        renderer: &mut R,
        waiter: &mut W,
        out: &mut O,
        cancel: &CancellationToken,
    ) -> Result<TerminationReason>
    where
        S: TelemetrySource + ?Sized,
        R: Renderer + ?Sized,
        W: InputWaiter + ?Sized,
        O: Write + ?Sized,
    {
        let result = self.cycle_loop(source, renderer, waiter, out, cancel);

        if let Some(trailer) = renderer.finish() {
            let written = out
                .write_all(trailer.as_bytes())
                .and_then(|()| out.flush());
            if let Err(e) = written {
                if result.is_ok() {
                    self.transition(MonitorState::Terminated);
                    return Err(e.into());
                }
                log::warn!("Failed to write output trailer: {}", e);
            }
        }

        self.transition(MonitorState::Terminated);
        result
    }

    fn cycle_loop<S, R, W, O>(
        &mut self,
        source: &S,
        renderer: &mut R,
        waiter: &mut W,
        out: &mut O,
        cancel: &CancellationToken,
    ) -> Result<TerminationReason>
    where
        S: TelemetrySource + ?Sized,
        R: Renderer + ?Sized,
        W: InputWaiter + ?Sized,
        O: Write + ?Sized,
    {
        loop {
            if cancel.is_cancelled() {
                log::info!("Termination requested; stopping");
                return Ok(TerminationReason::Cancelled);
            }

            self.transition(MonitorState::Sampling);
            let snapshot = source.sample_cycle().map_err(|e| {
                log::error!("Sampling cycle {} failed: {}", self.cycles + 1, e);
                e
            })?;

            let frame = renderer.render(&snapshot)?;
            out.write_all(frame.as_bytes())?;
            out.flush()?;
            self.cycles += 1;
            self.transition(MonitorState::Rendered);

            if self.config.once {
                log::debug!("One-shot mode: exiting after one cycle");
                return Ok(TerminationReason::OneShot);
            }

            self.transition(MonitorState::Waiting);
            if waiter.wait(self.config.interval)? {
                return Ok(TerminationReason::KeyPressed);
            }
        }
    }

    fn transition(&mut self, next: MonitorState) {
        log::trace!("Monitor {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
