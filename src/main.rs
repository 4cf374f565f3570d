mod app;
mod catalog;
mod config;
mod controls;
mod error;
mod input;
mod logging;
mod orbit;
mod render;
mod scene;
mod starfield;
mod view;

use anyhow::{Context, Result};
use catalog::Catalog;
use clap::Parser;
use config::{load_settings, project_paths, save_settings_atomic};
use logging::LogTarget;
use std::{io, path::PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(name = "solsim")]
#[command(about = "Terminal solar system: circular orbits, a time slider and a speed slider")]
pub(crate) struct Cli {
    /// Frame rate cap
    #[arg(long)]
    pub(crate) fps: Option<u32>,

    /// Number of background stars
    #[arg(long)]
    pub(crate) stars: Option<usize>,

    /// Fixed starfield seed (default: new field every session)
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Initial simulated time (0-100)
    #[arg(long)]
    pub(crate) time: Option<f64>,

    /// Initial orbit speed multiplier (0.1-10)
    #[arg(long)]
    pub(crate) speed: Option<f64>,

    /// Initially selected body, e.g. Earth
    #[arg(long, value_name = "BODY")]
    pub(crate) select: Option<String>,

    /// Start with planet labels hidden
    #[arg(long)]
    pub(crate) no_labels: bool,

    /// Chat widget URL shown in the sidebar
    #[arg(long, value_name = "URL", conflicts_with = "no_chat")]
    pub(crate) chat_url: Option<String>,

    /// Hide the chat panel
    #[arg(long)]
    pub(crate) no_chat: bool,

    /// Settings file (default: the per-user config directory)
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Print the scene as JSON and exit
    #[arg(long, conflicts_with = "init_config")]
    pub(crate) snapshot: bool,

    /// Write the effective settings to the settings file and exit
    #[arg(long)]
    pub(crate) init_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = project_paths()?;
    let settings_path = cli.config.clone().unwrap_or_else(|| paths.settings_path.clone());

    let mut settings =
        load_settings(&settings_path).with_context(|| format!("could not read {}", settings_path.display()))?;
    settings.apply_cli(&cli);

    let catalog = Catalog::solar_system();
    settings.validate(&catalog)?;

    if cli.init_config {
        save_settings_atomic(&settings_path, &settings)
            .with_context(|| format!("could not write {}", settings_path.display()))?;
        println!("wrote {}", settings_path.display());
        return Ok(());
    }

    let target = if cli.snapshot { LogTarget::Stderr } else { LogTarget::File(&paths.log_path) };
    logging::init(target, &settings.log_level)?;
    tracing::debug!(bodies = ?catalog.names().collect::<Vec<_>>(), "catalog loaded");

    if cli.snapshot {
        return app::snapshot(&settings, &catalog, &mut io::stdout().lock());
    }

    tracing::info!(settings = %settings_path.display(), "starting");
    app::run(&settings, &catalog)
}
