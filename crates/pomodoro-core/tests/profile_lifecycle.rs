//! Integration tests for the profile load → run → merge → save cycle.

use pomodoro_core::{
    load_or_create, merge_and_save, start_session, today_key, DayRecord, Event, JsonStore,
    MemoryStore, NotifyError, PauseChoice, ProfileStore, RunStats, SessionHost, SessionType,
    SettingUpdate, StatsSummary, TickSignal, UserProfile, DEFAULT_USER,
};
use tempfile::TempDir;

/// Lets every second pass and never pauses.
struct InstantHost;

impl SessionHost for InstantHost {
    fn wait_tick(&mut self) -> TickSignal {
        TickSignal::Elapsed
    }

    fn pause_choice(&mut self, _remaining_secs: u64) -> PauseChoice {
        PauseChoice::Resume
    }

    fn emit(&mut self, _event: &Event) {}

    fn notify(&mut self, _title: &str, _body: &str) -> Result<(), NotifyError> {
        Err("headless".into())
    }
}

#[test]
fn first_run_creates_profile_on_save() {
    let tmp = TempDir::new().unwrap();
    let mut store = JsonStore::new(tmp.path().join("profile.json"));

    let mut profile = load_or_create(&store, DEFAULT_USER).unwrap();
    let mut run = RunStats::new();
    start_session(&mut run, &profile.settings.clone(), &mut InstantHost);
    merge_and_save(&mut store, &mut profile, &run).unwrap();

    let stored = store.load(DEFAULT_USER).unwrap().unwrap();
    assert_eq!(stored.total_time_studied, 1500);
    assert_eq!(
        stored.days,
        vec![DayRecord {
            date: today_key(),
            time_studied: 1500,
            sessions_completed: 1,
        }]
    );

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(raw["profiles"][0]["name"], "base_user");
    assert_eq!(raw["profiles"][0]["settings"]["sessions_until_long"], 4);
}

#[test]
fn saving_twice_in_one_run_keeps_one_record_for_today() {
    let mut store = MemoryStore::new();
    let mut profile = UserProfile::new(DEFAULT_USER);
    let mut run = RunStats::new();
    run.record_elapsed(SessionType::Pomodoro, 300);

    merge_and_save(&mut store, &mut profile, &run).unwrap();
    merge_and_save(&mut store, &mut profile, &run).unwrap();

    let stored = store.load(DEFAULT_USER).unwrap().unwrap();
    let today = today_key();
    assert_eq!(stored.days.iter().filter(|d| d.date == today).count(), 1);
    assert_eq!(store.writes(), 2);
}

#[test]
fn existing_day_is_updated_and_moved_last() {
    let today = today_key();
    let mut profile = UserProfile::new(DEFAULT_USER);
    profile.total_time_studied = 700;
    profile.days = vec![
        DayRecord {
            date: today.clone(),
            time_studied: 600,
            sessions_completed: 2,
        },
        DayRecord {
            date: "01/01/99".into(),
            time_studied: 100,
            sessions_completed: 1,
        },
    ];
    let mut store = MemoryStore::with_profile(profile.clone());

    let mut run = RunStats::new();
    run.record_elapsed(SessionType::Pomodoro, 300);
    run.advance(&profile.settings);

    merge_and_save(&mut store, &mut profile, &run).unwrap();
    let stored = store.load(DEFAULT_USER).unwrap().unwrap();
    assert_eq!(stored.total_time_studied, 1000);
    assert_eq!(stored.days[0].date, "01/01/99");
    assert_eq!(
        stored.days[1],
        DayRecord {
            date: today,
            time_studied: 900,
            sessions_completed: 3,
        }
    );
}

#[test]
fn settings_survive_a_save_and_reload() {
    let tmp = TempDir::new().unwrap();
    let mut store = JsonStore::new(tmp.path().join("profile.json"));
    let mut profile = load_or_create(&store, DEFAULT_USER).unwrap();
    profile.settings.apply(SettingUpdate::AutoStart(true)).unwrap();
    merge_and_save(&mut store, &mut profile, &RunStats::new()).unwrap();

    let reloaded = load_or_create(&store, DEFAULT_USER).unwrap();
    assert!(reloaded.settings.auto_start());
    assert_eq!(reloaded, profile);
}

#[test]
fn stats_after_auto_started_sessions() {
    let mut profile = UserProfile::new(DEFAULT_USER);
    profile.settings.apply(SettingUpdate::AutoStart(false)).unwrap();
    let mut run = RunStats::new();
    let settings = profile.settings;
    start_session(&mut run, &settings, &mut InstantHost);
    start_session(&mut run, &settings, &mut InstantHost);
    start_session(&mut run, &settings, &mut InstantHost);

    let summary = StatsSummary::compute(&profile, Some(&run), "06/01/24");
    assert_eq!(summary.run_time_studied, 3000);
    assert_eq!(summary.run_sessions, 2);
    assert_eq!(summary.today_sessions, 2);
    assert_eq!(run.session_type(), SessionType::ShortBreak);
}
