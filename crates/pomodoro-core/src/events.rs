use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::SessionType;

/// Every state change of a countdown or of the session rotation produces an
/// Event. The terminal front end renders them; nothing else subscribes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SessionStarted {
        session_type: SessionType,
        session_num: u32,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// One second went by; `remaining_secs` is what is left.
    Tick {
        remaining_secs: u64,
    },
    CountdownPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownCompleted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownFinishedEarly {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// Rotation moved on after a naturally completed session.
    SessionAdvanced {
        from: SessionType,
        to: SessionType,
        session_num: u32,
        at: DateTime<Utc>,
    },
    /// User picked a session type from the menu.
    SessionChanged {
        to: SessionType,
        session_num: u32,
        at: DateTime<Utc>,
    },
}
