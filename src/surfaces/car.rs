use super::{SurfaceLink, SurfaceModel};
use crate::{
    error::Result,
    player::{PlayerHandle, SurfaceId},
};
use std::path::PathBuf;

pub const LIST_TITLE: &str = "Music";
pub const SECTION_HEADER: &str = "Music";
pub const TAB_IMAGE: &str = "♫";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarListItem {
    pub text: String,
    pub detail_text: String,
    pub image: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarTemplate {
    List,
    NowPlaying,
}

/// The in-car screen: a template stack with the song list at the bottom.
pub struct CarSurface {
    link: SurfaceLink,
    items: Vec<CarListItem>,
    stack: Vec<CarTemplate>,
}

impl CarSurface {
    pub fn attach(player: PlayerHandle) -> Result<Self> {
        let items = player
            .catalog()
            .iter()
            .map(|track| CarListItem {
                text: track.title().to_string(),
                detail_text: track.author().to_string(),
                image: track.artwork().to_path_buf(),
            })
            .collect();

        Ok(CarSurface {
            link: SurfaceLink::attach(player)?,
            items,
            stack: vec![CarTemplate::List],
        })
    }

    /// Row taps always start the track, then show the now-playing screen.
    pub fn tap(&mut self, index: usize) -> Result<()> {
        self.link.player().play_from(self.link.id(), index)?;
        self.link.reconcile();

        if self.top() != CarTemplate::NowPlaying {
            self.stack.push(CarTemplate::NowPlaying);
        }
        Ok(())
    }

    /// Pops the top template. The root list cannot be popped.
    pub fn back(&mut self) -> bool {
        match self.stack.len() > 1 {
            true => self.stack.pop().is_some(),
            false => false,
        }
    }

    pub fn top(&self) -> CarTemplate {
        self.stack.last().copied().unwrap_or(CarTemplate::List)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn items(&self) -> &[CarListItem] {
        &self.items
    }

    pub fn sync(&mut self) -> bool {
        self.link.drain() > 0
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
