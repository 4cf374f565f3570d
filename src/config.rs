use crate::catalog::Catalog;
use crate::controls::{SPEED_RANGE, TIME_RANGE};
use crate::error::{Result, SolsimError};
use crate::Cli;
use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

pub(crate) const DEFAULT_CHAT_URL: &str = "https://tawk.to/chat/67c46f4b93258c190db04199/1ilbl5g8i";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) fps_cap: u32,
    pub(crate) star_count: usize,
    /// Fixed starfield seed; `None` samples a new field each session.
    pub(crate) star_seed: Option<u64>,
    pub(crate) show_labels: bool,
    pub(crate) speed: f64,
    pub(crate) time: f64,
    /// Time units per real second while playing.
    pub(crate) play_rate: f64,
    pub(crate) selected: String,
    pub(crate) chat_url: Option<String>,
    pub(crate) log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps_cap: 30,
            star_count: 1000,
            star_seed: None,
            show_labels: true,
            speed: 1.0,
            time: 0.0,
            play_rate: 2.0,
            selected: "Sun".to_string(),
            chat_url: Some(DEFAULT_CHAT_URL.to_string()),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Command-line flags win over whatever the settings file said.
    pub(crate) fn apply_cli(&mut self, cli: &Cli) {
        if let Some(fps) = cli.fps {
            self.fps_cap = fps;
        }
        if let Some(stars) = cli.stars {
            self.star_count = stars;
        }
        if cli.seed.is_some() {
            self.star_seed = cli.seed;
        }
        if let Some(time) = cli.time {
            self.time = time;
        }
        if let Some(speed) = cli.speed {
            self.speed = speed;
        }
        if let Some(name) = &cli.select {
            self.selected = name.clone();
        }
        if cli.no_labels {
            self.show_labels = false;
        }
        if let Some(url) = &cli.chat_url {
            self.chat_url = Some(url.clone());
        }
        if cli.no_chat {
            self.chat_url = None;
        }
    }

    pub(crate) fn validate(&self, catalog: &Catalog) -> Result<()> {
        if self.fps_cap == 0 {
            return Err(SolsimError::invalid("fps_cap", "must be at least 1"));
        }
        if !self.speed.is_finite() || !SPEED_RANGE.contains(&self.speed) {
            return Err(SolsimError::invalid(
                "speed",
                format!("{} is outside {:?}", self.speed, SPEED_RANGE),
            ));
        }
        if !self.time.is_finite() || !TIME_RANGE.contains(&self.time) {
            return Err(SolsimError::invalid(
                "time",
                format!("{} is outside {:?}", self.time, TIME_RANGE),
            ));
        }
        if !self.play_rate.is_finite() || self.play_rate < 0.0 {
            return Err(SolsimError::invalid("play_rate", "must be a non-negative number"));
        }
        if let Some(url) = &self.chat_url {
            if url.trim().is_empty() {
                return Err(SolsimError::invalid("chat_url", "must not be empty"));
            }
        }
        catalog.get(&self.selected)?;
        Ok(())
    }
}

pub(crate) struct Paths {
    pub(crate) settings_path: PathBuf,
    pub(crate) log_path: PathBuf,
}

pub(crate) fn project_paths() -> anyhow::Result<Paths> {
    let proj = ProjectDirs::from("com", "solsim", "Solsim").context("could not resolve project directories")?;
    let config_dir = proj.config_dir().to_path_buf();
    let data_dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&data_dir).ok();
    Ok(Paths {
        settings_path: config_dir.join("settings.json"),
        log_path: data_dir.join("solsim.log"),
    })
}

/// A missing file yields defaults; a file that exists but does not parse is an error.
pub(crate) fn load_settings(path: &Path) -> Result<Settings> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(serde_json::from_str(&s)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, data)?;
    atomic_rename(&tmp, path)?;
    Ok(())
}

fn atomic_rename(from: &Path, to: &Path) -> io::Result<()> {
    // rename() replaces atomically on unix; Windows refuses to rename over an existing file.
    if cfg!(windows) && to.exists() {
        fs::remove_file(to)?;
    }
    fs::rename(from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings(&dir.path().join("nope.json")).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "speed": 2.5, "chat_url": null }"#).unwrap();
        let s = load_settings(&path).unwrap();
        assert_eq!(s.speed, 2.5);
        assert_eq!(s.chat_url, None);
        assert_eq!(s.star_count, 1000);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ speed: ").unwrap();
        assert!(matches!(load_settings(&path), Err(SolsimError::Json(_))));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let s = Settings { star_seed: Some(99), selected: "Mars".into(), ..Settings::default() };
        save_settings_atomic(&path, &s).unwrap();
        assert_eq!(load_settings(&path).unwrap(), s);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn cli_overrides_file_values() {
        let mut s = Settings { speed: 3.0, time: 10.0, ..Settings::default() };
        let cli = Cli::parse_from(["solsim", "--speed", "0.5", "--select", "neptune", "--no-labels", "--no-chat"]);
        s.apply_cli(&cli);
        assert_eq!(s.speed, 0.5);
        assert_eq!(s.time, 10.0);
        assert_eq!(s.selected, "neptune");
        assert!(!s.show_labels);
        assert_eq!(s.chat_url, None);
        assert!(s.validate(&Catalog::solar_system()).is_ok());
    }

    #[test]
    fn chat_url_can_be_replaced() {
        let mut s = Settings::default();
        let cli = Cli::parse_from(["solsim", "--chat-url", "https://example.org/chat"]);
        s.apply_cli(&cli);
        assert_eq!(s.chat_url.as_deref(), Some("https://example.org/chat"));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let catalog = Catalog::solar_system();
        let bad_speed = Settings { speed: 0.0, ..Settings::default() };
        assert!(matches!(
            bad_speed.validate(&catalog),
            Err(SolsimError::InvalidSetting { name: "speed", .. })
        ));
        let bad_time = Settings { time: f64::NAN, ..Settings::default() };
        assert!(bad_time.validate(&catalog).is_err());
        let bad_fps = Settings { fps_cap: 0, ..Settings::default() };
        assert!(bad_fps.validate(&catalog).is_err());
        let bad_body = Settings { selected: "Vulcan".into(), ..Settings::default() };
        assert!(matches!(bad_body.validate(&catalog), Err(SolsimError::UnknownBody(_))));
        assert!(Settings::default().validate(&catalog).is_ok());
    }
}
