//! Terminal rendering of events, menus and statistics.

use std::io::{self, Write};

use pomodoro_core::{Event, SessionType, SettingField, Settings, StatsSummary};

pub const RULE: &str = "--------------------------------";

/// `H:MM:SS`, the way the countdown is drawn.
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
}

/// Human duration for statistics: `2h 05m 09s`, `4m 10s`, `12s`.
pub fn format_duration(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, secs % 3600 / 60, secs % 60);
    if h > 0 {
        format!("{h}h {m:02}m {s:02}s")
    } else if m > 0 {
        format!("{m}m {s:02}s")
    } else {
        format!("{s}s")
    }
}

fn unit(field: SettingField) -> &'static str {
    match field {
        SettingField::SessionsUntilLong => "",
        _ => " min",
    }
}

pub fn setting_prompt(field: SettingField) -> String {
    format!(
        "New {} (suggested max {}{}): ",
        field.label().to_lowercase(),
        field.advisory_max(),
        unit(field)
    )
}

pub fn render_event<W: Write>(out: &mut W, event: &Event) -> io::Result<()> {
    match event {
        Event::SessionStarted {
            session_type,
            session_num,
            duration_secs,
            ..
        } => {
            let which = match session_type {
                SessionType::Pomodoro => format!("pomodoro #{session_num}"),
                other => other.label().to_string(),
            };
            writeln!(
                out,
                "Starting {which} ({}). Press Ctrl+C to pause.",
                format_duration(*duration_secs)
            )?;
        }
        Event::Tick { remaining_secs } => {
            write!(out, "\r{}  ", format_clock(*remaining_secs))?;
            out.flush()?;
        }
        Event::CountdownPaused { .. } => writeln!(out, "\nTime interrupted!")?,
        Event::CountdownResumed { remaining_secs, .. } => {
            writeln!(out, "Resuming with {} left.", format_clock(*remaining_secs))?
        }
        Event::CountdownCompleted { .. } => writeln!(out, "\nTime is up!")?,
        Event::CountdownFinishedEarly { elapsed_secs, .. } => writeln!(
            out,
            "Session finished early after {}.",
            format_duration(*elapsed_secs)
        )?,
        Event::SessionAdvanced { to, .. } => writeln!(out, "Next session: {to}")?,
        Event::SessionChanged { to, .. } => writeln!(out, "Current session set to {to}.")?,
    }
    Ok(())
}

pub fn render_menu<W: Write>(
    out: &mut W,
    session_type: SessionType,
    session_num: u32,
    settings: &Settings,
) -> io::Result<()> {
    writeln!(out, "Pomodoro Timer")?;
    match session_type {
        SessionType::Pomodoro => writeln!(out, "Current session: pomodoro #{session_num}")?,
        other => writeln!(out, "Current session: {other}")?,
    }
    writeln!(
        out,
        "Session length: {} minutes",
        settings.session_minutes(session_type)
    )?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "(1) Start session")?;
    writeln!(out, "(2) Adjust settings")?;
    writeln!(out, "(3) Change current session")?;
    writeln!(out, "(4) View statistics")?;
    writeln!(out, "(0) Save and quit")?;
    Ok(())
}

pub fn render_settings<W: Write>(out: &mut W, settings: &Settings) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "Settings")?;
    for (i, field) in SettingField::ALL.iter().enumerate() {
        writeln!(
            out,
            "({}) {}: {}{}",
            i + 1,
            field.label(),
            settings.get(*field),
            unit(*field)
        )?;
    }
    let auto = if settings.auto_start() { "on" } else { "off" };
    writeln!(out, "(5) Auto start: {auto}")?;
    writeln!(out, "(0) Return to menu")?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

pub fn render_stats<W: Write>(out: &mut W, stats: &StatsSummary) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "Statistics")?;
    writeln!(
        out,
        "Total time studied: {}",
        format_duration(stats.total_time_studied)
    )?;
    writeln!(out, "Completed pomodoros: {}", stats.total_sessions)?;
    writeln!(
        out,
        "Today: {} over {} pomodoro(s)",
        format_duration(stats.today_time_studied),
        stats.today_sessions
    )?;
    writeln!(
        out,
        "This run: {} over {} pomodoro(s)",
        format_duration(stats.run_time_studied),
        stats.run_sessions
    )?;
    writeln!(
        out,
        "Days tracked: {} (average {} per day)",
        stats.days_tracked,
        format_duration(stats.average_daily_time)
    )?;
    if !stats.recent_days.is_empty() {
        writeln!(out, "Recent days:")?;
        for day in &stats.recent_days {
            writeln!(
                out,
                "  {}  {:>11}  {} pomodoro(s)",
                day.date,
                format_duration(day.time_studied),
                day.sessions_completed
            )?;
        }
    }
    writeln!(out, "{RULE}")?;
    Ok(())
}
