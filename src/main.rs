use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use std::rc::Rc;
use tracing::warn;

use famboard::cli::{Cli, Commands};
use famboard::{Config, Profile, Roster, logging, utils};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // --dev keeps config and logs apart from the real profile
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(&utils::expand_path(path))?,
        None => Config::load_with_profile(profile)?,
    };

    let log_dir = utils::get_data_dir(profile).ok_or_else(|| eyre!("Could not determine data directory"))?;
    if let Err(e) = logging::init_logging(&config.log_level, &log_dir) {
        // The dashboard still works without a log file
        eprintln!("Warning: {}", e);
    }

    let roster = Rc::new(Roster::seeded());

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = famboard::tui::App::new(config, roster);
            if let Err(e) = famboard::tui::run_event_loop(app) {
                warn!(error = %e, "TUI exited with an error");
                return Err(e.into());
            }
        }
        Commands::Roster => famboard::cli::handle_roster(&roster)?,
        Commands::Month { date } => famboard::cli::handle_month(date)?,
    }

    Ok(())
}
