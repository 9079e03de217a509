use anyhow::{Result, anyhow};
use ratatui::crossterm::{
    ExecutableCommand,
    cursor::MoveToColumn,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::{
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

pub mod app_core;
pub mod bridge;
pub mod catalog;
pub mod config;
pub mod error;
pub mod key_handler;
pub mod logging;
pub mod now_playing;
pub mod player;
pub mod surfaces;
pub mod tui;
pub mod ui_state;

pub use catalog::Catalog;
pub use error::PlayerError;
pub use player::PlayerHandle;
pub use ui_state::UiState;

pub const CONFIG_DIRECTORY: &str = "carplay-music";
pub const CONFIG_FILE: &str = "config.toml";

// ~30fps
pub const REFRESH_RATE: Duration = Duration::from_millis(33);

pub enum DurationStyle {
    Clean,
    Compact,
}

pub fn get_readable_duration(duration: Duration, style: DurationStyle) -> String {
    let mut secs = duration.as_secs();
    let mins = secs / 60;
    secs %= 60;

    match style {
        DurationStyle::Clean => match mins {
            0 => format!("{secs:02}s"),
            _ => format!("{mins}m {secs:02}s"),
        },
        DurationStyle::Compact => format!("{mins}:{secs:02}"),
    }
}

pub fn overwrite_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout
        .execute(MoveToColumn(0))?
        .execute(Clear(ClearType::CurrentLine))?
        .execute(Print(message))?;
    stdout.flush()
}

pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    if path_str == "~" {
        return Ok(dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory!"))?);
    }

    if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory!"))?;
        return Ok(home.join(&path_str[2..]));
    }

    Err(anyhow!("Cannot expand {path_str}, only ~/ is supported"))
}
