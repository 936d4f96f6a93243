//! The interactive menu.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::Path;

use pomodoro_core::{
    load_or_create, merge_and_save, start_session, today_key, Config, CoreError, JsonStore,
    ProfileStore, RunStats, SessionType, SettingField, SettingUpdate, StatsSummary, UserProfile,
};
use tracing::{debug, info};

use crate::display;
use crate::host::{SignalTicker, TerminalHost, Ticker};
use crate::notify::{self, Notifier};
use crate::prompt::{is_closed, Prompt};

/// Run the menu on stdin/stdout against the profile file in `dir`.
pub fn run(dir: &Path, config: &Config, no_notify: bool) -> Result<(), Box<dyn Error>> {
    let mut store = JsonStore::new(dir.join(&config.storage.profile_file));
    let profile = load_or_create(&store, &config.storage.user)?;
    let notifier = notify::from_config(&config.notifications, no_notify);
    let mut ticker = SignalTicker::new()?;

    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock(), io::stdout());
    let run = Shell::new(
        &mut store,
        profile,
        &mut prompt,
        &mut ticker,
        notifier.as_ref(),
    )
    .run()?;
    debug!(
        studied_secs = run.total_time_studied(),
        completed = run.completed_pomodoros(),
        "run finished"
    );
    Ok(())
}

enum Flow {
    Continue,
    Quit,
}

pub struct Shell<'a, S: ?Sized, R, W> {
    store: &'a mut S,
    profile: UserProfile,
    run: RunStats,
    prompt: &'a mut Prompt<R, W>,
    ticker: &'a mut dyn Ticker,
    notifier: &'a dyn Notifier,
}

impl<'a, S, R, W> Shell<'a, S, R, W>
where
    S: ProfileStore + ?Sized,
    R: BufRead,
    W: Write,
{
    pub fn new(
        store: &'a mut S,
        profile: UserProfile,
        prompt: &'a mut Prompt<R, W>,
        ticker: &'a mut dyn Ticker,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            store,
            profile,
            run: RunStats::new(),
            prompt,
            ticker,
            notifier,
        }
    }

    /// Loop until the user quits or input ends, then save the run.
    ///
    /// The profile is saved even when the loop stops on an I/O error; the
    /// error is returned afterwards.
    ///
    /// # Errors
    /// Returns an error if the profile cannot be saved or the terminal fails.
    pub fn run(mut self) -> Result<RunStats, CoreError> {
        let looped = self.menu_loop();
        merge_and_save(self.store, &mut self.profile, &self.run)?;
        looped?;
        self.prompt.line("Progress saved. Goodbye!")?;
        Ok(self.run)
    }

    fn menu_loop(&mut self) -> io::Result<()> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(e) if is_closed(&e) => {
                    info!("input closed, quitting");
                    return self.prompt.line("");
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn step(&mut self) -> io::Result<Flow> {
        self.prompt.line("")?;
        display::render_menu(
            self.prompt.out(),
            self.run.session_type(),
            self.run.session_num(),
            &self.profile.settings,
        )?;
        match self.prompt.read_choice("> ", 0..=4)? {
            1 => self.start()?,
            2 => self.edit_settings()?,
            3 => self.change_session()?,
            4 => self.show_stats()?,
            _ => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn start(&mut self) -> io::Result<()> {
        self.ticker.drain();
        let mut host = TerminalHost::new(&mut *self.prompt, &mut *self.ticker, self.notifier);
        let outcome = start_session(&mut self.run, &self.profile.settings, &mut host);
        debug!(
            elapsed_secs = outcome.elapsed_secs,
            completed = outcome.completed,
            "back at menu"
        );
        Ok(())
    }

    fn edit_settings(&mut self) -> io::Result<()> {
        loop {
            display::render_settings(self.prompt.out(), &self.profile.settings)?;
            match self.prompt.read_choice("> ", 0..=5)? {
                0 => return Ok(()),
                5 => {
                    let on = self
                        .prompt
                        .read_yes_no("Start the next session automatically? (y/n): ")?;
                    self.apply(SettingUpdate::AutoStart(on))?;
                }
                n => {
                    let Some(&field) = usize::try_from(n - 1)
                        .ok()
                        .and_then(|i| SettingField::ALL.get(i))
                    else {
                        continue;
                    };
                    self.edit_number(field)?;
                }
            }
        }
    }

    /// Ask for `field` until the value is accepted.
    fn edit_number(&mut self, field: SettingField) -> io::Result<()> {
        let message = display::setting_prompt(field);
        loop {
            let value = self.prompt.read_int(&message)?;
            if self.apply(SettingUpdate::Number(field, value))? {
                if value > i64::from(field.advisory_max()) {
                    self.prompt.line(format!(
                        "Note: {value} is above the suggested maximum of {}.",
                        field.advisory_max()
                    ))?;
                }
                return Ok(());
            }
        }
    }

    /// Returns whether the update was accepted.
    fn apply(&mut self, update: SettingUpdate) -> io::Result<bool> {
        match self.profile.settings.apply(update) {
            Ok(()) => {
                info!(?update, "setting changed");
                Ok(true)
            }
            Err(e) => {
                self.prompt.line(format!("Invalid value: {e}"))?;
                Ok(false)
            }
        }
    }

    fn change_session(&mut self) -> io::Result<()> {
        for (i, session_type) in SessionType::ALL.iter().enumerate() {
            self.prompt.line(format!("({}) {session_type}", i + 1))?;
        }
        let choice = self.prompt.read_choice("> ", 1..=3)?;
        if let Some(session_type) = SessionType::from_choice(choice) {
            let event = self.run.change_session(session_type);
            display::render_event(self.prompt.out(), &event)?;
        }
        Ok(())
    }

    fn show_stats(&mut self) -> io::Result<()> {
        let summary = StatsSummary::compute(&self.profile, Some(&self.run), &today_key());
        display::render_stats(self.prompt.out(), &summary)
    }
}
