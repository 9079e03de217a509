use super::{SurfaceLink, SurfaceModel};
use crate::{
    error::Result,
    player::{PlayerHandle, SurfaceId},
};
use ratatui::widgets::TableState;

/// The phone-style track list. A tap on the highlighted row toggles
/// play/pause, a tap anywhere else starts that track.
pub struct ListSurface {
    link: SurfaceLink,
    pub(crate) cursor: TableState,
    rows: usize,
}

impl ListSurface {
    pub fn attach(player: PlayerHandle) -> Result<Self> {
        let rows = player.catalog().len();
        let link = SurfaceLink::attach(player)?;

        let mut cursor = TableState::default();
        if rows > 0 {
            cursor.select(Some(link.model().selected.unwrap_or(0)));
        }

        Ok(ListSurface { link, cursor, rows })
    }

    pub fn tap(&mut self, row: usize) -> Result<()> {
        self.link.player().select(self.link.id(), row)?;
        self.link.reconcile();

        self.cursor.select(Some(row));
        Ok(())
    }

    pub fn tap_cursor(&mut self) -> Result<()> {
        match self.cursor.selected() {
            Some(row) => self.tap(row),
            None => Ok(()),
        }
    }

    pub fn scroll_up(&mut self, by: usize) {
        if let Some(row) = self.cursor.selected() {
            self.cursor.select(Some(row.saturating_sub(by)));
        }
    }

    pub fn scroll_down(&mut self, by: usize) {
        if let Some(row) = self.cursor.selected() {
            let last = self.rows.saturating_sub(1);
            self.cursor.select(Some((row + by).min(last)));
        }
    }

    /// Catches up with notifications. Returns whether anything changed.
    pub fn sync(&mut self) -> bool {
        let changed = self.link.drain() > 0;
        if changed {
            if let Some(row) = self.link.model().selected {
                self.cursor.select(Some(row));
            }
        }
        changed
    }

    pub fn model(&self) -> &SurfaceModel {
        self.link.model()
    }

    pub fn id(&self) -> SurfaceId {
        self.link.id()
    }

    pub fn detach(&self) -> Result<()> {
        self.link.detach()
    }
}
