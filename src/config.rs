use crate::{CONFIG_DIRECTORY, CONFIG_FILE, expand_tilde};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "CARPLAY_MUSIC_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub assets_dir: PathBuf,
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
    pub tracks: Vec<TrackEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    pub audio: PathBuf,
    pub artwork: PathBuf,
}

impl TrackEntry {
    fn bundled(title: &str, author: &str, audio: &str, artwork: &str) -> Self {
        TrackEntry {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            audio: PathBuf::from(audio),
            artwork: PathBuf::from(artwork),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let assets_dir = dirs::audio_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join(CONFIG_DIRECTORY))
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIRECTORY));

        Config {
            assets_dir,
            log_filter: String::from("info"),
            log_file: None,
            tracks: vec![
                TrackEntry::bundled("Europe Travel", "Cesar", "europe-travel.mp3", "author1.png"),
                TrackEntry::bundled(
                    "Forest Lullaby",
                    "Amanda",
                    "forest-lullaby.mp3",
                    "author2.png",
                ),
                TrackEntry::bundled("Wanderer's life", "Jakaya", "wanderer.mp3", "author3.png"),
                TrackEntry::bundled("Dark world", "Renee", "dark-world.mp3", "author4.png"),
                TrackEntry::bundled(
                    "Snowflakes Pattern",
                    "Pietro Schellino",
                    "snowflakes-pattern.mp3",
                    "author5.png",
                ),
            ],
        }
    }
}

impl Config {
    /// Load the user's config, falling back to the bundled defaults when no
    /// file exists yet.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_str = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Could not read {}", path.as_ref().display()))?;
        Self::from_toml(&file_str)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let mut config = toml::from_str::<Config>(s)?;
        config.assets_dir = expand_tilde(&config.assets_dir)?;
        if let Some(log_file) = &config.log_file {
            config.log_file = Some(expand_tilde(log_file)?);
        }
        Ok(config)
    }

    pub fn path() -> Option<PathBuf> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::config_dir().map(|dir| dir.join(CONFIG_DIRECTORY).join(CONFIG_FILE)),
        }
    }
}
