//! The persisted user profile.
//!
//! One [`UserProfile`] holds the timer [`Settings`], the lifetime study total
//! and one [`DayRecord`] per calendar date. All three structs refuse unknown
//! or missing fields when read back from disk.

use std::num::NonZeroU32;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::store::ProfileStore;
use crate::error::{Result, ValidationError};
use crate::session::RunStats;
use crate::timer::SessionType;

pub const DEFAULT_USER: &str = "base_user";

/// Date key of a [`DayRecord`], e.g. `06/01/24`.
pub const DATE_FORMAT: &str = "%m/%d/%y";

/// Today's date key in local time.
pub fn today_key() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// Numeric settings the menu can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    Pomodoro,
    ShortBreak,
    LongBreak,
    SessionsUntilLong,
}

impl SettingField {
    pub const ALL: [SettingField; 4] = [
        SettingField::Pomodoro,
        SettingField::ShortBreak,
        SettingField::LongBreak,
        SettingField::SessionsUntilLong,
    ];

    /// Field name as stored on disk.
    pub fn key(self) -> &'static str {
        match self {
            SettingField::Pomodoro => "pomodoro_minutes",
            SettingField::ShortBreak => "short_break_minutes",
            SettingField::LongBreak => "long_break_minutes",
            SettingField::SessionsUntilLong => "sessions_until_long",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SettingField::Pomodoro => "Pomodoro",
            SettingField::ShortBreak => "Short break",
            SettingField::LongBreak => "Long break",
            SettingField::SessionsUntilLong => "Sessions until each long break",
        }
    }

    /// Suggested upper bound shown in prompts. Not enforced.
    pub fn advisory_max(self) -> u32 {
        match self {
            SettingField::Pomodoro => 150,
            SettingField::ShortBreak => 20,
            SettingField::LongBreak => 40,
            SettingField::SessionsUntilLong => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingUpdate {
    Number(SettingField, i64),
    AutoStart(bool),
}

/// Timer settings. Durations are whole minutes.
///
/// Fields are only changed through [`Settings::apply`], so every value in
/// memory is positive; zeros in a stored document fail deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pomodoro_minutes: NonZeroU32,
    short_break_minutes: NonZeroU32,
    long_break_minutes: NonZeroU32,
    sessions_until_long: NonZeroU32,
    auto_start: bool,
}

const fn nz(n: u32) -> NonZeroU32 {
    match NonZeroU32::new(n) {
        Some(v) => v,
        None => panic!("zero default"),
    }
}

const DEFAULT_POMODORO: NonZeroU32 = nz(25);
const DEFAULT_SHORT_BREAK: NonZeroU32 = nz(5);
const DEFAULT_LONG_BREAK: NonZeroU32 = nz(10);
const DEFAULT_SESSIONS_UNTIL_LONG: NonZeroU32 = nz(4);

impl Default for Settings {
    fn default() -> Self {
        Self {
            pomodoro_minutes: DEFAULT_POMODORO,
            short_break_minutes: DEFAULT_SHORT_BREAK,
            long_break_minutes: DEFAULT_LONG_BREAK,
            sessions_until_long: DEFAULT_SESSIONS_UNTIL_LONG,
            auto_start: false,
        }
    }
}

impl Settings {
    pub fn get(&self, field: SettingField) -> u32 {
        match field {
            SettingField::Pomodoro => self.pomodoro_minutes.get(),
            SettingField::ShortBreak => self.short_break_minutes.get(),
            SettingField::LongBreak => self.long_break_minutes.get(),
            SettingField::SessionsUntilLong => self.sessions_until_long.get(),
        }
    }

    pub fn sessions_until_long(&self) -> NonZeroU32 {
        self.sessions_until_long
    }

    pub fn auto_start(&self) -> bool {
        self.auto_start
    }

    pub fn session_minutes(&self, session_type: SessionType) -> u32 {
        match session_type {
            SessionType::Pomodoro => self.pomodoro_minutes.get(),
            SessionType::ShortBreak => self.short_break_minutes.get(),
            SessionType::LongBreak => self.long_break_minutes.get(),
        }
    }

    pub fn session_secs(&self, session_type: SessionType) -> u64 {
        u64::from(self.session_minutes(session_type)) * 60
    }

    /// The single validated setter. A rejected update leaves the settings
    /// untouched.
    pub fn apply(&mut self, update: SettingUpdate) -> Result<(), ValidationError> {
        match update {
            SettingUpdate::AutoStart(on) => self.auto_start = on,
            SettingUpdate::Number(field, value) => {
                let value = positive(field, value)?;
                match field {
                    SettingField::Pomodoro => self.pomodoro_minutes = value,
                    SettingField::ShortBreak => self.short_break_minutes = value,
                    SettingField::LongBreak => self.long_break_minutes = value,
                    SettingField::SessionsUntilLong => self.sessions_until_long = value,
                }
            }
        }
        Ok(())
    }
}

fn positive(field: SettingField, value: i64) -> Result<NonZeroU32, ValidationError> {
    let key = field.key();
    if value <= 0 {
        return Err(ValidationError::NotPositive { field: key, value });
    }
    u32::try_from(value)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(ValidationError::TooLarge { field: key, value })
}

/// Aggregate of one calendar day. `time_studied` is in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DayRecord {
    pub date: String,
    pub time_studied: u64,
    pub sessions_completed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserProfile {
    pub name: String,
    /// Lifetime seconds studied, not counting the current run.
    pub total_time_studied: u64,
    pub days: Vec<DayRecord>,
    pub settings: Settings,
}

impl UserProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_time_studied: 0,
            days: Vec::new(),
            settings: Settings::default(),
        }
    }

    pub fn find_day(&self, date: &str) -> Option<&DayRecord> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Fold a run into the profile under the date key `today`.
    ///
    /// An existing record for `today` is removed and re-appended with the
    /// run added, so the most recently touched day is always last.
    pub fn merge_run(&mut self, run: &RunStats, today: &str) {
        let studied = run.total_time_studied();
        let completed = run.completed_pomodoros();

        self.total_time_studied = self.total_time_studied.saturating_add(studied);

        let record = match self.days.iter().position(|d| d.date == today) {
            Some(index) => {
                let old = self.days.remove(index);
                DayRecord {
                    date: old.date,
                    time_studied: old.time_studied.saturating_add(studied),
                    sessions_completed: old.sessions_completed.saturating_add(completed),
                }
            }
            None => DayRecord {
                date: today.to_string(),
                time_studied: studied,
                sessions_completed: completed,
            },
        };
        self.days.push(record);
    }
}

/// Merge the run into the profile under today's date and write the whole
/// profile back through `store`.
///
/// # Errors
/// Returns an error if the store cannot persist the profile.
pub fn merge_and_save<S: ProfileStore + ?Sized>(
    store: &mut S,
    profile: &mut UserProfile,
    run: &RunStats,
) -> Result<()> {
    let today = today_key();
    profile.merge_run(run, &today);
    store.upsert(profile)?;
    info!(
        user = %profile.name,
        date = %today,
        studied_secs = run.total_time_studied(),
        "profile saved"
    );
    Ok(())
}
