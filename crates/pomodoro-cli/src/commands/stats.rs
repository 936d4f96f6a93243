use std::io;
use std::path::Path;

use pomodoro_core::{load_or_create, today_key, Config, JsonStore, StatsSummary};

use crate::display;

/// Print statistics of the stored profile. Nothing is written.
pub fn run(dir: &Path, config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonStore::new(dir.join(&config.storage.profile_file));
    let profile = load_or_create(&store, &config.storage.user)?;
    let summary = StatsSummary::compute(&profile, None, &today_key());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        display::render_stats(&mut io::stdout().lock(), &summary)?;
    }
    Ok(())
}
