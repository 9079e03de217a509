use super::{
    Observer, PlaybackSession, PlayerCommand, SurfaceId, Transport,
    core::{self, PlayerCore},
};
use crate::{
    PlayerError,
    bridge::{RemoteCommandSender, TransportCommandBridge},
    catalog::Catalog,
    error::Result,
    now_playing::{ControlSurface, NowPlayingPublisher},
};
use crossbeam_channel::{Sender, bounded, unbounded};
use std::{
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

/// Cheap, cloneable entry point to the playback coordinator.
///
/// Mutating calls are applied in order on the coordinator thread and return
/// once their transition is done, so a query issued right after sees it.
///
/// Observers run on the coordinator thread. Calls made from there cannot wait
/// for themselves, so they are only queued behind the current transition.
#[derive(Clone)]
pub struct PlayerHandle {
    commands: Sender<PlayerCommand>,
    remote: RemoteCommandSender,
    session: Arc<Mutex<PlaybackSession>>,
    catalog: Arc<Catalog>,
    next_surface: Arc<AtomicU64>,
}

impl PlayerHandle {
    pub fn spawn<F>(
        catalog: Arc<Catalog>,
        make_transport: F,
        control_surface: Box<dyn ControlSurface>,
    ) -> Result<Self>
    where
        F: FnOnce() -> Result<Box<dyn Transport>> + Send + 'static,
    {
        let (commands, inbox) = unbounded();
        let (bridge, remote) = TransportCommandBridge::new();
        let session = Arc::new(Mutex::new(PlaybackSession::default()));

        let mut publisher = NowPlayingPublisher::new(control_surface);
        publisher.attach(remote.clone());

        PlayerCore::spawn(
            Arc::clone(&catalog),
            make_transport,
            bridge,
            publisher,
            inbox,
            Arc::clone(&session),
        )
        .map_err(|e| {
            tracing::error!("could not start playback thread: {e}");
            PlayerError::Disconnected
        })?;

        tracing::info!(tracks = catalog.len(), "playback coordinator started");

        Ok(PlayerHandle {
            commands,
            remote,
            session,
            catalog,
            next_surface: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Start playing `index` from the beginning. Does nothing if that item
    /// is already playing.
    pub fn play(&self, index: usize) -> Result<()> {
        self.check(index)?;
        self.apply(PlayerCommand::Play {
            index,
            origin: None,
        })
    }

    /// Like [`PlayerHandle::play`], but `origin` will not be told about the
    /// transition it caused.
    pub fn play_from(&self, origin: SurfaceId, index: usize) -> Result<()> {
        self.check(index)?;
        self.apply(PlayerCommand::Play {
            index,
            origin: Some(origin),
        })
    }

    /// A tap on a row: toggles play/pause for the selected row, plays any
    /// other.
    pub fn select(&self, origin: SurfaceId, index: usize) -> Result<()> {
        self.check(index)?;
        self.apply(PlayerCommand::Select {
            index,
            origin: Some(origin),
        })
    }

    pub fn pause(&self) -> Result<()> {
        self.apply(PlayerCommand::Pause)
    }

    pub fn resume(&self) -> Result<()> {
        self.apply(PlayerCommand::Resume)
    }

    pub fn stop(&self) -> Result<()> {
        self.apply(PlayerCommand::Stop)
    }

    pub fn seek(&self, position: Duration) -> Result<()> {
        self.apply(PlayerCommand::Seek(position))
    }

    pub fn is_playing(&self) -> bool {
        self.session().is_playing
    }

    pub fn current_index(&self) -> Option<usize> {
        self.session().playing
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.session().selected
    }

    pub fn session(&self) -> PlaybackSession {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn subscribe(&self, observer: Box<dyn Observer>) -> Result<SurfaceId> {
        let id = SurfaceId(self.next_surface.fetch_add(1, Ordering::Relaxed));
        self.apply(PlayerCommand::Subscribe(id, observer))?;
        Ok(id)
    }

    pub fn unsubscribe(&self, id: SurfaceId) -> Result<()> {
        self.apply(PlayerCommand::Unsubscribe(id))
    }

    /// Sender that behaves like the OS media buttons.
    pub fn remote(&self) -> RemoteCommandSender {
        self.remote.clone()
    }

    /// Blocks until every command sent before this call has been applied.
    /// Returns at once on the coordinator thread.
    pub fn sync(&self) -> Result<()> {
        if core::on_coordinator_thread() {
            return Ok(());
        }

        let (ack, done) = bounded(1);
        self.send(PlayerCommand::Sync(ack))?;
        done.recv()?;
        Ok(())
    }

    /// Pauses output and stops the coordinator. Every handle is unusable
    /// afterwards and reports [`PlayerError::Disconnected`].
    pub fn shutdown(&self) -> Result<()> {
        let (ack, done) = bounded(1);
        self.send(PlayerCommand::Shutdown(ack))?;
        if core::on_coordinator_thread() {
            return Ok(());
        }

        done.recv()?;
        Ok(())
    }

    fn check(&self, index: usize) -> Result<()> {
        self.catalog.get(index).map(|_| ())
    }

    /// Queues `command`, then waits for the coordinator to get past it.
    fn apply(&self, command: PlayerCommand) -> Result<()> {
        self.send(command)?;
        self.sync()
    }

    fn send(&self, command: PlayerCommand) -> Result<()> {
        self.commands.send(command)?;
        Ok(())
    }
}
