mod countdown;
mod rotation;

pub use countdown::{
    run_countdown, Countdown, CountdownOutcome, CountdownState, NotifyError, PauseChoice,
    SessionHost, TickSignal, NOTIFY_BODY, NOTIFY_TITLE,
};
pub use rotation::{next_session, SessionType};
