use std::fmt;

use serde::{Deserialize, Serialize};

use crate::storage::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl SessionType {
    pub const ALL: [SessionType; 3] = [
        SessionType::Pomodoro,
        SessionType::ShortBreak,
        SessionType::LongBreak,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Pomodoro => "pomodoro",
            SessionType::ShortBreak => "short break",
            SessionType::LongBreak => "long break",
        }
    }

    /// Only Pomodoro time counts towards time studied.
    pub fn is_study(&self) -> bool {
        matches!(self, SessionType::Pomodoro)
    }

    /// Menu numbering: 1 Pomodoro, 2 short break, 3 long break.
    pub fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(SessionType::Pomodoro),
            2 => Some(SessionType::ShortBreak),
            3 => Some(SessionType::LongBreak),
            _ => None,
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Next session type and number after `current` finishes.
///
/// Breaks always lead back to a Pomodoro with the same number. A Pomodoro
/// leads to a long break every `sessions_until_long` Pomodoros and to a
/// short break otherwise; either way the number moves on by one.
pub fn next_session(
    settings: &Settings,
    current: SessionType,
    session_num: u32,
) -> (SessionType, u32) {
    match current {
        SessionType::ShortBreak | SessionType::LongBreak => (SessionType::Pomodoro, session_num),
        SessionType::Pomodoro => {
            let next = if session_num % settings.sessions_until_long().get() == 0 {
                SessionType::LongBreak
            } else {
                SessionType::ShortBreak
            };
            (next, session_num.saturating_add(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{SettingField, SettingUpdate};

    fn settings_with_long_every(k: i64) -> Settings {
        let mut s = Settings::default();
        s.apply(SettingUpdate::Number(SettingField::SessionsUntilLong, k))
            .unwrap();
        s
    }

    #[test]
    fn breaks_return_to_pomodoro_without_counting() {
        let s = Settings::default();
        assert_eq!(
            next_session(&s, SessionType::ShortBreak, 3),
            (SessionType::Pomodoro, 3)
        );
        assert_eq!(
            next_session(&s, SessionType::LongBreak, 5),
            (SessionType::Pomodoro, 5)
        );
    }

    #[test]
    fn default_cycle_of_four() {
        let s = Settings::default();
        let mut state = (SessionType::Pomodoro, 1);
        let mut seen = vec![state];
        for _ in 0..8 {
            state = next_session(&s, state.0, state.1);
            seen.push(state);
        }
        assert_eq!(
            seen,
            vec![
                (SessionType::Pomodoro, 1),
                (SessionType::ShortBreak, 2),
                (SessionType::Pomodoro, 2),
                (SessionType::ShortBreak, 3),
                (SessionType::Pomodoro, 3),
                (SessionType::ShortBreak, 4),
                (SessionType::Pomodoro, 4),
                (SessionType::LongBreak, 5),
                (SessionType::Pomodoro, 5),
            ]
        );
    }

    #[test]
    fn long_break_every_pomodoro_when_k_is_one() {
        let s = settings_with_long_every(1);
        assert_eq!(
            next_session(&s, SessionType::Pomodoro, 1),
            (SessionType::LongBreak, 2)
        );
        assert_eq!(
            next_session(&s, SessionType::Pomodoro, 7),
            (SessionType::LongBreak, 8)
        );
    }

    #[test]
    fn from_choice_maps_menu_numbers() {
        assert_eq!(SessionType::from_choice(1), Some(SessionType::Pomodoro));
        assert_eq!(SessionType::from_choice(3), Some(SessionType::LongBreak));
        assert_eq!(SessionType::from_choice(0), None);
        assert_eq!(SessionType::from_choice(4), None);
    }
}
