//! Read-only statistics over a profile and, optionally, the run in progress.

use serde::{Deserialize, Serialize};

use crate::session::RunStats;
use crate::storage::{DayRecord, UserProfile};

/// How many trailing day records a summary carries.
pub const RECENT_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Lifetime seconds studied, current run included.
    pub total_time_studied: u64,
    /// Completed Pomodoros over all recorded days, current run included.
    pub total_sessions: u64,
    pub today_time_studied: u64,
    pub today_sessions: u32,
    pub run_time_studied: u64,
    pub run_sessions: u32,
    pub days_tracked: usize,
    /// Mean seconds per recorded day.
    pub average_daily_time: u64,
    /// Most recently touched days, oldest first.
    pub recent_days: Vec<DayRecord>,
}

impl StatsSummary {
    /// Summarise `profile` as if `run` had already been merged under `today`.
    /// The profile itself is left untouched.
    pub fn compute(profile: &UserProfile, run: Option<&RunStats>, today: &str) -> Self {
        let mut merged = profile.clone();
        let (run_time_studied, run_sessions) = match run {
            Some(run) => (run.total_time_studied(), run.completed_pomodoros()),
            None => (0, 0),
        };
        if let Some(run) = run {
            if run_time_studied > 0 || run_sessions > 0 {
                merged.merge_run(run, today);
            }
        }

        let today_record = merged.find_day(today);
        let days_tracked = merged.days.len();
        let day_time: u64 = merged.days.iter().map(|d| d.time_studied).sum();
        let average_daily_time = if days_tracked == 0 {
            0
        } else {
            day_time / days_tracked as u64
        };
        let skip = days_tracked.saturating_sub(RECENT_DAYS);

        Self {
            total_time_studied: merged.total_time_studied,
            total_sessions: merged
                .days
                .iter()
                .map(|d| u64::from(d.sessions_completed))
                .sum(),
            today_time_studied: today_record.map(|d| d.time_studied).unwrap_or(0),
            today_sessions: today_record.map(|d| d.sessions_completed).unwrap_or(0),
            run_time_studied,
            run_sessions,
            days_tracked,
            average_daily_time,
            recent_days: merged.days[skip..].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Settings, DEFAULT_USER};
    use crate::timer::SessionType;

    fn day(date: &str, time_studied: u64, sessions_completed: u32) -> DayRecord {
        DayRecord {
            date: date.into(),
            time_studied,
            sessions_completed,
        }
    }

    #[test]
    fn empty_profile_without_run() {
        let profile = UserProfile::new(DEFAULT_USER);
        let s = StatsSummary::compute(&profile, None, "06/01/24");
        assert_eq!(s.total_time_studied, 0);
        assert_eq!(s.days_tracked, 0);
        assert_eq!(s.average_daily_time, 0);
        assert!(s.recent_days.is_empty());
    }

    #[test]
    fn idle_run_adds_no_day() {
        let profile = UserProfile::new(DEFAULT_USER);
        let run = RunStats::new();
        let s = StatsSummary::compute(&profile, Some(&run), "06/01/24");
        assert_eq!(s.days_tracked, 0);
    }

    #[test]
    fn run_is_counted_into_today() {
        let mut profile = UserProfile::new(DEFAULT_USER);
        profile.total_time_studied = 700;
        profile.days = vec![day("05/31/24", 100, 1), day("06/01/24", 600, 2)];

        let mut run = RunStats::new();
        run.record_elapsed(SessionType::Pomodoro, 300);
        run.advance(&Settings::default());

        let s = StatsSummary::compute(&profile, Some(&run), "06/01/24");
        assert_eq!(s.total_time_studied, 1000);
        assert_eq!(s.total_sessions, 4);
        assert_eq!(s.today_time_studied, 900);
        assert_eq!(s.today_sessions, 3);
        assert_eq!(s.run_time_studied, 300);
        assert_eq!(s.run_sessions, 1);
        assert_eq!(s.average_daily_time, 500);
        assert_eq!(profile.days[1].time_studied, 600);
    }

    #[test]
    fn recent_days_keeps_the_tail() {
        let mut profile = UserProfile::new(DEFAULT_USER);
        profile.days = (1..=10)
            .map(|d| day(&format!("06/{d:02}/24"), 60, 1))
            .collect();
        let s = StatsSummary::compute(&profile, None, "06/10/24");
        assert_eq!(s.recent_days.len(), RECENT_DAYS);
        assert_eq!(s.recent_days[0].date, "06/04/24");
        assert_eq!(s.today_sessions, 1);
    }
}
