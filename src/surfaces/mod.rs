//! Presentation surfaces. Each keeps its own copy of "which row is selected
//! and which one plays" and brings it back in line with the coordinator
//! whenever a notification arrives.

mod car;
mod list;

pub use car::{CarListItem, CarSurface, CarTemplate, LIST_TITLE, SECTION_HEADER, TAB_IMAGE};
pub use list::ListSurface;

use crate::{
    error::Result,
    player::{Notification, Observer, PlaybackSession, PlayerHandle, SurfaceId},
};
use anyhow::anyhow;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// What a surface believes about selection and playback.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceModel {
    pub selected: Option<usize>,
    pub in_play: Option<usize>,
    pub last_in_play: Option<usize>,
}

impl SurfaceModel {
    pub fn apply(&mut self, notification: Notification, session: &PlaybackSession) {
        match notification {
            Notification::FullReset => {
                self.selected = session.selected;
                self.in_play = session.playing;
                self.last_in_play = session.last_playing;
            }
            Notification::ResetToIndex(index) => self.played(index),
            Notification::ResumeToLast => {
                self.selected = self.last_in_play;
                self.in_play = self.last_in_play;
            }
        }
    }

    pub fn played(&mut self, index: usize) {
        self.selected = Some(index);
        self.in_play = Some(index);
        self.last_in_play = Some(index);
    }
}

/// Observer living on the coordinator thread that forwards notifications to
/// a surface owned by another thread.
pub struct ChannelObserver {
    tx: Sender<Notification>,
}

impl ChannelObserver {
    pub fn new(tx: Sender<Notification>) -> Self {
        ChannelObserver { tx }
    }

    fn forward(&self, notification: Notification) -> anyhow::Result<()> {
        self.tx
            .send(notification)
            .map_err(|_| anyhow!("surface is gone but still subscribed"))
    }
}

impl Observer for ChannelObserver {
    fn on_full_reset(&mut self) -> anyhow::Result<()> {
        self.forward(Notification::FullReset)
    }

    fn on_reset_to_index(&mut self, index: usize) -> anyhow::Result<()> {
        self.forward(Notification::ResetToIndex(index))
    }

    fn on_resume_to_last(&mut self) -> anyhow::Result<()> {
        self.forward(Notification::ResumeToLast)
    }
}

/// Subscription plumbing shared by every surface.
pub struct SurfaceLink {
    player: PlayerHandle,
    id: SurfaceId,
    inbox: Receiver<Notification>,
    model: SurfaceModel,
}

impl SurfaceLink {
    pub fn attach(player: PlayerHandle) -> Result<Self> {
        let (tx, inbox) = unbounded();
        let id = player.subscribe(Box::new(ChannelObserver::new(tx)))?;

        // Whatever happened before we subscribed
        let mut model = SurfaceModel::default();
        model.apply(Notification::FullReset, &player.session());

        Ok(SurfaceLink {
            player,
            id,
            inbox,
            model,
        })
    }

    /// Applies pending notifications, returns how many there were.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(notification) = self.inbox.try_recv() {
            self.model.apply(notification, &self.player.session());
            applied += 1;
        }
        applied
    }

    /// Catches up after a command of our own has been applied: drains what
    /// is pending, then takes the coordinator's session as it stands.
    pub fn reconcile(&mut self) {
        self.drain();
        self.model.apply(Notification::FullReset, &self.player.session());
    }

    pub fn detach(&self) -> Result<()> {
        self.player.unsubscribe(self.id)
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn player(&self) -> &PlayerHandle {
        &self.player
    }

    pub fn model(&self) -> &SurfaceModel {
        &self.model
    }
}
