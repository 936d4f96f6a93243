//! # cli-pomodoro Core Library
//!
//! Business logic for the cli-pomodoro study timer. The terminal binary is a
//! thin shell over this crate: it renders [`Event`]s, reads menu choices and
//! supplies a [`SessionHost`] for ticks, pause prompts and notifications.
//!
//! ## Architecture
//!
//! - **Rotation**: pure state machine picking the next session type
//!   (Pomodoro → short/long break → Pomodoro …)
//! - **Countdown**: per-second state machine with pause/resume/finish-early,
//!   driven by the host's tick source
//! - **Session**: transient per-run totals and the auto-start loop
//! - **Storage**: the persisted user profile (settings plus per-day
//!   aggregates) in a JSON document, and the TOML application config
//!
//! ## Key Components
//!
//! - [`Countdown`]: countdown state machine
//! - [`RunStats`]: statistics of the current process run
//! - [`UserProfile`]: the single persisted root object
//! - [`ProfileStore`]: key-value persistence of profiles
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod session;
pub mod stats;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use session::{start_session, RunStats};
pub use stats::StatsSummary;
pub use storage::{
    load_or_create, merge_and_save, today_key, Config, DayRecord, JsonStore, MemoryStore,
    ProfileStore, SettingField, SettingUpdate, Settings, UserProfile, DEFAULT_USER,
};
pub use timer::{
    next_session, run_countdown, Countdown, CountdownOutcome, CountdownState, NotifyError,
    PauseChoice, SessionHost, SessionType, TickSignal,
};
