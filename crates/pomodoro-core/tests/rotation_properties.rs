//! Property tests for the session rotation.

use pomodoro_core::{next_session, SessionType, SettingField, SettingUpdate, Settings};
use proptest::prelude::*;

fn settings_with_long_every(k: u32) -> Settings {
    let mut s = Settings::default();
    s.apply(SettingUpdate::Number(SettingField::SessionsUntilLong, i64::from(k)))
        .unwrap();
    s
}

proptest! {
    #[test]
    fn long_break_exactly_every_kth_pomodoro(k in 1u32..=12, rounds in 1u32..=5) {
        let settings = settings_with_long_every(k);
        let mut state = (SessionType::Pomodoro, 1u32);

        for _ in 0..(k * rounds) {
            let finished = state.1;
            let brk = next_session(&settings, state.0, state.1);
            prop_assert_eq!(brk.1, finished + 1);
            if finished % k == 0 {
                prop_assert_eq!(brk.0, SessionType::LongBreak);
            } else {
                prop_assert_eq!(brk.0, SessionType::ShortBreak);
            }

            state = next_session(&settings, brk.0, brk.1);
            prop_assert_eq!(state, (SessionType::Pomodoro, finished + 1));
        }
    }

    #[test]
    fn breaks_never_count(num in 1u32..10_000, k in 1u32..=10) {
        let settings = settings_with_long_every(k);
        for brk in [SessionType::ShortBreak, SessionType::LongBreak] {
            prop_assert_eq!(next_session(&settings, brk, num), (SessionType::Pomodoro, num));
        }
    }

    #[test]
    fn non_positive_sessions_until_long_is_rejected(value in i64::MIN..=0) {
        let mut s = Settings::default();
        prop_assert!(s.apply(SettingUpdate::Number(SettingField::SessionsUntilLong, value)).is_err());
        prop_assert_eq!(s.sessions_until_long().get(), 4);
    }
}

#[test]
fn four_session_cycle_example() {
    let settings = Settings::default();
    let mut state = (SessionType::Pomodoro, 1);
    let mut trail = Vec::new();
    for _ in 0..8 {
        state = next_session(&settings, state.0, state.1);
        trail.push(state.0);
    }
    assert_eq!(
        trail,
        vec![
            SessionType::ShortBreak,
            SessionType::Pomodoro,
            SessionType::ShortBreak,
            SessionType::Pomodoro,
            SessionType::ShortBreak,
            SessionType::Pomodoro,
            SessionType::LongBreak,
            SessionType::Pomodoro,
        ]
    );
    assert_eq!(state, (SessionType::Pomodoro, 5));
}
