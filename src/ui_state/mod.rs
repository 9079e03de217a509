mod notice;
mod pane;
mod theme;

pub use notice::Notice;
pub use pane::{Mode, Pane};
pub use theme::{DisplayTheme, GOLD_DIM};

use theme::Theme;

use crate::{
    bridge::RemoteCommand,
    error::Result,
    now_playing::{Capability, NowPlayingBoard, NowPlayingInfo},
    player::PlayerHandle,
    surfaces::{CarSurface, ListSurface},
};
use anyhow::{Error, anyhow};
use ratatui::widgets::ListState;
use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

pub struct UiState {
    pub(crate) player: PlayerHandle,
    board: Arc<Mutex<NowPlayingBoard>>,

    // Surfaces
    pub(crate) list: ListSurface,
    pub(crate) car: CarSurface,
    pub(crate) car_cursor: ListState,

    // Visual Elements
    pub(crate) theme: Theme,
    pane: Pane,
    mode: Mode,
    error: Option<Notice>,
}

impl UiState {
    pub fn new(player: PlayerHandle, board: Arc<Mutex<NowPlayingBoard>>) -> Result<Self> {
        let list = ListSurface::attach(player.clone())?;
        let car = CarSurface::attach(player.clone())?;

        let mut car_cursor = ListState::default();
        if !car.items().is_empty() {
            car_cursor.select(Some(0));
        }

        Ok(UiState {
            player,
            board,
            list,
            car,
            car_cursor,
            theme: Theme::default(),
            pane: Pane::default(),
            mode: Mode::default(),
            error: None,
        })
    }

    /// Pulls pending notifications into both surfaces.
    pub fn sync(&mut self) {
        self.list.sync();
        self.car.sync();
    }

    /// Unsubscribes both surfaces from the coordinator.
    pub fn detach(&self) -> Result<()> {
        self.list.detach()?;
        self.car.detach()
    }
}

impl UiState {
    pub fn get_pane(&self) -> Pane {
        self.pane
    }

    pub fn switch_pane(&mut self) {
        self.pane = self.pane.other();
    }

    pub fn get_mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn set_error(&mut self, e: Error) {
        tracing::warn!("{e:#}");
        self.error = Some(Notice::from(&e));
    }

    pub fn get_error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

impl UiState {
    pub fn scroll_up(&mut self, by: usize) {
        match self.pane {
            Pane::Phone => self.list.scroll_up(by),
            Pane::Car => {
                if let Some(row) = self.car_cursor.selected() {
                    self.car_cursor.select(Some(row.saturating_sub(by)));
                }
            }
        }
    }

    pub fn scroll_down(&mut self, by: usize) {
        match self.pane {
            Pane::Phone => self.list.scroll_down(by),
            Pane::Car => {
                if let Some(row) = self.car_cursor.selected() {
                    let last = self.car.items().len().saturating_sub(1);
                    self.car_cursor.select(Some((row + by).min(last)));
                }
            }
        }
    }

    /// A tap on the highlighted row of whichever surface has focus.
    pub fn tap(&mut self) -> Result<()> {
        match self.pane {
            Pane::Phone => self.list.tap_cursor(),
            Pane::Car => match self.car_cursor.selected() {
                Some(row) => self.car.tap(row),
                None => Ok(()),
            },
        }
    }
}

impl UiState {
    pub fn now_playing(&self) -> Option<NowPlayingInfo> {
        self.lock_board().info.clone()
    }

    /// Elapsed time of the published item, advanced while it plays.
    pub fn elapsed(&self) -> Option<Duration> {
        self.lock_board().elapsed()
    }

    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.lock_board().is_enabled(capability)
    }

    /// Presses a button on the OS media controls.
    pub fn press(&self, command: RemoteCommand) -> anyhow::Result<()> {
        self.lock_board().press(command)
    }

    /// Scrubs relative to the last published position.
    pub fn scrub(&self, forward: bool, by: Duration) -> anyhow::Result<()> {
        let elapsed = self
            .elapsed()
            .ok_or_else(|| anyhow!("Nothing is playing"))?;

        let target = match forward {
            true => elapsed + by,
            false => elapsed.saturating_sub(by),
        };
        self.press(RemoteCommand::ChangePlaybackPosition(target))
    }

    fn lock_board(&self) -> std::sync::MutexGuard<'_, NowPlayingBoard> {
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
