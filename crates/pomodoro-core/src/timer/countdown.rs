//! Countdown implementation.
//!
//! The countdown is a per-second state machine. It does not sleep on its own;
//! the caller's [`SessionHost`] decides when a second has passed and whether
//! the user broke in.
//!
//! ## State Transitions
//!
//! ```text
//! Running --tick--> Running | FinishedNatural
//! Running --pause--> Paused --resume--> Running
//!                    Paused --finish_early--> FinishedEarly
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let outcome = run_countdown(25 * 60, &mut host);
//! if outcome.completed {
//!     // advance the rotation
//! }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::events::Event;

pub const NOTIFY_TITLE: &str = "Cli-Pomodoro";
pub const NOTIFY_BODY: &str = "Your session has ended!";

pub type NotifyError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownState {
    Running,
    Paused,
    FinishedNatural,
    FinishedEarly,
}

/// What the host observed while the countdown waited for the next second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSignal {
    Elapsed,
    Interrupted,
}

/// Answer to the pause menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseChoice {
    Resume,
    FinishEarly,
}

/// Collaborators a running countdown talks to.
pub trait SessionHost {
    /// Block for about one second, or until the user interrupts.
    fn wait_tick(&mut self) -> TickSignal;

    /// Ask the user what to do with a paused countdown.
    fn pause_choice(&mut self, remaining_secs: u64) -> PauseChoice;

    fn emit(&mut self, event: &Event);

    /// Best-effort desktop notification. Failures are logged, never fatal.
    fn notify(&mut self, title: &str, body: &str) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownOutcome {
    pub elapsed_secs: u64,
    /// True iff the countdown reached zero on its own.
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    duration_secs: u64,
    remaining_secs: u64,
    state: CountdownState,
}

impl Countdown {
    /// A zero-length countdown is finished from the start.
    pub fn new(duration_secs: u64) -> Self {
        let state = if duration_secs == 0 {
            CountdownState::FinishedNatural
        } else {
            CountdownState::Running
        };
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            state,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.duration_secs - self.remaining_secs
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            CountdownState::FinishedNatural | CountdownState::FinishedEarly
        )
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// One second passed. Returns `CountdownCompleted` on reaching zero.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != CountdownState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = CountdownState::FinishedNatural;
            return Some(Event::CountdownCompleted {
                duration_secs: self.duration_secs,
                at: Utc::now(),
            });
        }
        Some(Event::Tick {
            remaining_secs: self.remaining_secs,
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            CountdownState::Running => {
                self.state = CountdownState::Paused;
                Some(Event::CountdownPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<Event> {
        match self.state {
            CountdownState::Paused => {
                self.state = CountdownState::Running;
                Some(Event::CountdownResumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn finish_early(&mut self) -> Option<Event> {
        match self.state {
            CountdownState::Paused => {
                self.state = CountdownState::FinishedEarly;
                Some(Event::CountdownFinishedEarly {
                    elapsed_secs: self.elapsed_secs(),
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }
}

/// Run a countdown of `duration_secs` to its end and report the time spent.
///
/// Natural completion returns the full duration and fires the desktop
/// notification. Finishing early from the pause menu returns the seconds
/// that actually elapsed, which is always less than the duration.
pub fn run_countdown<H: SessionHost + ?Sized>(duration_secs: u64, host: &mut H) -> CountdownOutcome {
    let mut countdown = Countdown::new(duration_secs);
    host.emit(&Event::Tick {
        remaining_secs: countdown.remaining_secs(),
    });

    while !countdown.is_finished() {
        let event = match countdown.state() {
            CountdownState::Paused => match host.pause_choice(countdown.remaining_secs()) {
                PauseChoice::Resume => countdown.resume(),
                PauseChoice::FinishEarly => countdown.finish_early(),
            },
            _ => match host.wait_tick() {
                TickSignal::Elapsed => countdown.tick(),
                TickSignal::Interrupted => countdown.pause(),
            },
        };
        if let Some(event) = event {
            host.emit(&event);
        }
    }

    let completed = countdown.state() == CountdownState::FinishedNatural;
    if completed {
        if let Err(e) = host.notify(NOTIFY_TITLE, NOTIFY_BODY) {
            warn!("desktop notification failed: {e}");
        }
    }

    let outcome = CountdownOutcome {
        elapsed_secs: countdown.elapsed_secs(),
        completed,
    };
    debug!(
        duration_secs = countdown.duration_secs(),
        elapsed_secs = outcome.elapsed_secs,
        completed,
        "countdown finished"
    );
    outcome
}
