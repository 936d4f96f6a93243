//! Per-run statistics and the auto-start loop.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::Event;
use crate::storage::Settings;
use crate::timer::{next_session, run_countdown, CountdownOutcome, SessionHost, SessionType};

/// Totals of the current process run. Never persisted as such; folded into
/// the profile on exit by [`crate::merge_and_save`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    session_type: SessionType,
    /// Pomodoros started this run, counting the current one.
    session_num: u32,
    /// Seconds of Pomodoro time this run.
    total_time_studied: u64,
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStats {
    /// Pomodoro #1, nothing studied yet.
    pub fn new() -> Self {
        Self {
            session_type: SessionType::Pomodoro,
            session_num: 1,
            total_time_studied: 0,
        }
    }

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn session_num(&self) -> u32 {
        self.session_num
    }

    pub fn total_time_studied(&self) -> u64 {
        self.total_time_studied
    }

    /// The session counter runs one ahead of the Pomodoros actually finished.
    pub fn completed_pomodoros(&self) -> u32 {
        self.session_num.saturating_sub(1)
    }

    /// Add time spent in a session. Break time is not study time.
    pub fn record_elapsed(&mut self, session_type: SessionType, elapsed_secs: u64) {
        if session_type.is_study() {
            self.total_time_studied = self.total_time_studied.saturating_add(elapsed_secs);
        }
    }

    /// The run as it looks after the current session rotates.
    pub fn advanced(&self, settings: &Settings) -> RunStats {
        let (session_type, session_num) =
            next_session(settings, self.session_type, self.session_num);
        RunStats {
            session_type,
            session_num,
            total_time_studied: self.total_time_studied,
        }
    }

    pub fn advance(&mut self, settings: &Settings) -> Event {
        let from = self.session_type;
        *self = self.advanced(settings);
        debug!(%from, to = %self.session_type, session_num = self.session_num, "session advanced");
        Event::SessionAdvanced {
            from,
            to: self.session_type,
            session_num: self.session_num,
            at: Utc::now(),
        }
    }

    /// Jump to `session_type` without touching the counter.
    pub fn change_session(&mut self, session_type: SessionType) -> Event {
        self.session_type = session_type;
        Event::SessionChanged {
            to: session_type,
            session_num: self.session_num,
            at: Utc::now(),
        }
    }
}

/// Run the current session and, with auto-start on, every following one.
///
/// A session that reaches zero rotates the run to the next session type. The
/// loop stops after a session finished early from the pause menu, or after
/// the first completed one when auto-start is off. Returns the outcome of
/// the last countdown.
pub fn start_session<H: SessionHost + ?Sized>(
    run: &mut RunStats,
    settings: &Settings,
    host: &mut H,
) -> CountdownOutcome {
    loop {
        let session_type = run.session_type();
        let duration_secs = settings.session_secs(session_type);
        host.emit(&Event::SessionStarted {
            session_type,
            session_num: run.session_num(),
            duration_secs,
            at: Utc::now(),
        });

        let outcome = run_countdown(duration_secs, host);
        run.record_elapsed(session_type, outcome.elapsed_secs);
        if !outcome.completed {
            return outcome;
        }

        let advanced = run.advance(settings);
        host.emit(&advanced);
        if !settings.auto_start() {
            return outcome;
        }
        debug!(next = %run.session_type(), "auto-start");
    }
}
