//! Watch command implementation
//!
//! Installs signal handlers, acquires everything in startup order, runs the
//! refresh loop, and lets the session's `Drop` release it all again.

use crate::cli::args::OutputFormat;
use crate::cli::output::{RecordRenderer, Renderer, TableRenderer};
use crate::config::Config;
use crate::error::{AppError, NvmlError, Result};
use crate::lifecycle::{
    ensure_privileged, install_signal_handlers, CancellationToken, ConsoleWaiter,
    CrosstermTerminal, InputWaiter, Session, SleepWaiter, TerminalGuard, TerminalMode,
};
use crate::nvml::{GpuManager, NvmlManager};
use crate::pci::{PciBus, SysfsPciBus};
use crate::register::{DevMem, PhysicalMemory, RegisterReader};
use crate::services::{Monitor, MonitorConfig, Sampler, TerminationReason};

use std::io::{self, IsTerminal, Write};

/// Where the refresh loop writes frames and waits for keys
pub struct Frontend<'a> {
    pub renderer: Box<dyn Renderer>,
    pub waiter: Box<dyn InputWaiter>,
    pub out: &'a mut dyn Write,
}

/// Execute the watch command
pub fn run_watch(config: &Config, format: OutputFormat, once: bool) -> Result<()> {
    let mode = match format {
        OutputFormat::Table => Some(CrosstermTerminal::new()),
        OutputFormat::Json => None,
    };

    // Installed before the terminal changes mode, so a signal during startup
    // still ends the run through the session's teardown.
    let cancel = CancellationToken::new();
    install_signal_handlers(&cancel)?;

    let bus = SysfsPciBus::new(&config.hardware.pci_sysfs_path);
    let (session, device_count) = open_session(mode, ensure_privileged, &bus, NvmlManager::new)?;

    log::info!("Monitoring {} GPU(s)", device_count);
    log::debug!("  Interval: {:?}", config.interval());
    log::debug!("  Register layout: {}", config.hardware.generation);
    log::debug!("  Physical memory: {}", config.hardware.memory_path.display());

    let reader = RegisterReader::new(
        DevMem::new(&config.hardware.memory_path),
        config.hardware.generation.layout(),
    );

    let renderer: Box<dyn Renderer> = match format {
        OutputFormat::Table => Box::new(TableRenderer::new(config.thresholds)),
        OutputFormat::Json => Box::new(RecordRenderer::new()),
    };

    // Piped or redirected input has no key presses to wait for.
    let waiter: Box<dyn InputWaiter> = if session.has_terminal() || io::stdin().is_terminal() {
        Box::new(ConsoleWaiter::new())
    } else {
        Box::new(SleepWaiter::new())
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let frontend = Frontend {
        renderer,
        waiter,
        out: &mut out,
    };

    let monitor_config = MonitorConfig {
        interval: config.interval(),
        once,
    };

    let reason = monitor_session(
        session,
        device_count,
        reader,
        monitor_config,
        frontend,
        &cancel,
    )?;
    log::debug!("Stopped: {:?}", reason);

    Ok(())
}

/// Acquire the terminal, check privilege, scan PCI, open NVML, count devices
///
/// Whatever was acquired before a failing step is released on the way out.
pub fn open_session<T, M, B>(
    mode: Option<T>,
    privilege: impl FnOnce() -> Result<()>,
    bus: &B,
    init: impl FnOnce() -> std::result::Result<M, NvmlError>,
) -> Result<(Session<T, M>, u32)>
where
    T: TerminalMode,
    M: GpuManager,
    B: PciBus + ?Sized,
{
    let terminal = mode.map(TerminalGuard::acquire).transpose()?;

    privilege()?;

    let pci = bus.scan()?;
    log::debug!("PCI scan found {} device(s)", pci.records().len());

    let manager = init().map_err(AppError::NvmlInit)?;

    let session = Session::new(terminal, manager, pci);
    let device_count = session.device_count()?;

    Ok((session, device_count))
}

/// Run the refresh loop over an open session, then release it
///
/// The session is consumed so teardown has happened by the time this
/// returns, on success and on error alike.
pub fn monitor_session<T, M, P>(
    session: Session<T, M>,
    device_count: u32,
    reader: RegisterReader<P>,
    config: MonitorConfig,
    mut frontend: Frontend<'_>,
    cancel: &CancellationToken,
) -> Result<TerminationReason>
where
    T: TerminalMode,
    M: GpuManager,
    P: PhysicalMemory,
{
    let result = {
        let sampler = Sampler::new(
            session.manager(),
            session.pci().records(),
            reader,
            device_count,
        );
        Monitor::new(config).run(
            &sampler,
            &mut *frontend.renderer,
            &mut *frontend.waiter,
            &mut *frontend.out,
            cancel,
        )
    };

    drop(session);
    result
}
