//! The terminal side of a running countdown.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use pomodoro_core::{Event, NotifyError, PauseChoice, SessionHost, TickSignal};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, warn};

use crate::display;
use crate::notify::Notifier;
use crate::prompt::{is_closed, Prompt};

/// Waits out one countdown second.
pub trait Ticker {
    fn wait(&mut self) -> TickSignal;

    /// Forget interrupts that arrived while nothing was waiting.
    fn drain(&mut self) {}
}

#[cfg(unix)]
type Interrupts = tokio::signal::unix::Signal;

#[cfg(unix)]
fn listen() -> io::Result<Interrupts> {
    use tokio::signal::unix::{signal, SignalKind};
    signal(SignalKind::interrupt())
}

#[cfg(windows)]
type Interrupts = tokio::signal::windows::CtrlC;

#[cfg(windows)]
fn listen() -> io::Result<Interrupts> {
    tokio::signal::windows::ctrl_c()
}

/// How long `drain` lets the signal driver deliver what is queued.
const DRAIN_WINDOW: Duration = Duration::from_millis(20);

/// Real-time ticker that reports Ctrl+C as an interrupt.
///
/// The Ctrl+C listener lives as long as the ticker, so from construction on
/// tokio owns SIGINT and a Ctrl+C outside a countdown does not end the
/// program. Such presses queue up until [`Ticker::drain`] drops them.
pub struct SignalTicker {
    runtime: Runtime,
    interval: Duration,
    interrupts: Option<Interrupts>,
}

impl SignalTicker {
    pub fn new() -> io::Result<Self> {
        Self::with_interval(Duration::from_secs(1))
    }

    pub fn with_interval(interval: Duration) -> io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let interrupts = {
            let _guard = runtime.enter();
            match listen() {
                Ok(interrupts) => Some(interrupts),
                Err(e) => {
                    warn!("cannot listen for Ctrl+C, countdowns cannot be paused: {e}");
                    None
                }
            }
        };
        Ok(Self {
            runtime,
            interval,
            interrupts,
        })
    }
}

impl Ticker for SignalTicker {
    fn wait(&mut self) -> TickSignal {
        let interval = self.interval;
        let Some(interrupts) = self.interrupts.as_mut() else {
            self.runtime.block_on(tokio::time::sleep(interval));
            return TickSignal::Elapsed;
        };
        self.runtime.block_on(async move {
            tokio::select! {
                () = tokio::time::sleep(interval) => TickSignal::Elapsed,
                Some(()) = interrupts.recv() => TickSignal::Interrupted,
            }
        })
    }

    fn drain(&mut self) {
        let Some(interrupts) = self.interrupts.as_mut() else {
            return;
        };
        let dropped = self.runtime.block_on(async move {
            let mut dropped = 0u32;
            while let Ok(Some(())) = tokio::time::timeout(DRAIN_WINDOW, interrupts.recv()).await {
                dropped += 1;
            }
            dropped
        });
        if dropped > 0 {
            debug!(dropped, "discarded Ctrl+C pressed outside a countdown");
        }
    }
}

pub struct TerminalHost<'h, R, W> {
    prompt: &'h mut Prompt<R, W>,
    ticker: &'h mut dyn Ticker,
    notifier: &'h dyn Notifier,
}

impl<'h, R: BufRead, W: Write> TerminalHost<'h, R, W> {
    pub fn new(
        prompt: &'h mut Prompt<R, W>,
        ticker: &'h mut dyn Ticker,
        notifier: &'h dyn Notifier,
    ) -> Self {
        Self {
            prompt,
            ticker,
            notifier,
        }
    }
}

impl<R: BufRead, W: Write> SessionHost for TerminalHost<'_, R, W> {
    fn wait_tick(&mut self) -> TickSignal {
        self.ticker.wait()
    }

    fn pause_choice(&mut self, remaining_secs: u64) -> PauseChoice {
        let shown = self
            .prompt
            .line(format!("{} left.", display::format_clock(remaining_secs)))
            .and_then(|()| self.prompt.line("(1) Continue"))
            .and_then(|()| self.prompt.line("(2) Finish early"));
        if let Err(e) = shown {
            debug!("pause menu not shown: {e}");
        }
        let choice = match self.prompt.read_choice("> ", 1..=2) {
            Ok(1) => PauseChoice::Resume,
            Ok(_) => PauseChoice::FinishEarly,
            Err(e) => {
                if !is_closed(&e) {
                    warn!("reading pause choice failed: {e}");
                }
                PauseChoice::FinishEarly
            }
        };
        // Ctrl+C pressed at the prompt must not pause the resumed countdown.
        self.ticker.drain();
        choice
    }

    fn emit(&mut self, event: &Event) {
        if let Err(e) = display::render_event(self.prompt.out(), event) {
            debug!("render failed: {e}");
        }
    }

    fn notify(&mut self, title: &str, body: &str) -> Result<(), NotifyError> {
        self.notifier.notify(title, body)
    }
}
