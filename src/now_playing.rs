use crate::{
    bridge::{RemoteCommand, RemoteCommandSender},
    catalog::Track,
    player::{PlaybackSession, Transport},
};
use anyhow::{Result, anyhow};
use std::{
    collections::HashSet,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Play,
    Pause,
    TogglePlayPause,
    ChangePlaybackPosition,
}

impl Capability {
    fn of(command: &RemoteCommand) -> Self {
        match command {
            RemoteCommand::Play => Capability::Play,
            RemoteCommand::Pause => Capability::Pause,
            RemoteCommand::TogglePlayPause => Capability::TogglePlayPause,
            RemoteCommand::ChangePlaybackPosition(_) => Capability::ChangePlaybackPosition,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    #[default]
    Stopped,
}

/// One atomic update of the OS "now playing" display. Fields the transport
/// cannot provide are left empty rather than failing the update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NowPlayingInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub artwork: Option<PathBuf>,
    pub rate: f32,
    pub elapsed: Option<Duration>,
    pub duration: Option<Duration>,
    pub status: PlaybackStatus,
    pub is_live_stream: bool,
}

impl NowPlayingInfo {
    pub fn derive(
        track: Option<&Track>,
        session: &PlaybackSession,
        transport: &dyn Transport,
    ) -> Self {
        let status = match (session.is_playing, track.is_some()) {
            (true, _) => PlaybackStatus::Playing,
            (false, true) => PlaybackStatus::Paused,
            (false, false) => PlaybackStatus::Stopped,
        };

        NowPlayingInfo {
            title: track.map(|t| t.title().to_string()),
            author: track.map(|t| t.author().to_string()),
            artwork: track.map(|t| t.artwork().to_path_buf()),
            rate: match session.is_playing {
                true => 1.0,
                false => 0.0,
            },
            elapsed: track.map(|_| transport.position()),
            duration: track.and_then(|_| transport.duration()),
            status,
            is_live_stream: false,
        }
    }
}

/// The OS-level media control surface: lock screen, car media buttons.
#[cfg_attr(test, mockall::automock)]
pub trait ControlSurface: Send {
    fn publish(&mut self, info: &NowPlayingInfo) -> Result<()>;
    fn set_enabled(&mut self, capability: Capability, enabled: bool);
    /// Where button presses should be forwarded.
    fn register_commands(&mut self, commands: RemoteCommandSender);
}

pub struct NowPlayingPublisher {
    surface: Box<dyn ControlSurface>,
    scrubbing_enabled: bool,
}

impl NowPlayingPublisher {
    pub fn new(surface: Box<dyn ControlSurface>) -> Self {
        NowPlayingPublisher {
            surface,
            scrubbing_enabled: false,
        }
    }

    pub fn attach(&mut self, commands: RemoteCommandSender) {
        self.surface.register_commands(commands);
        for capability in [
            Capability::Play,
            Capability::Pause,
            Capability::TogglePlayPause,
        ] {
            self.surface.set_enabled(capability, true);
        }
    }

    pub fn publish(
        &mut self,
        track: Option<&Track>,
        session: &PlaybackSession,
        transport: &dyn Transport,
    ) {
        if !self.scrubbing_enabled {
            self.surface
                .set_enabled(Capability::ChangePlaybackPosition, true);
            self.scrubbing_enabled = true;
        }

        let info = NowPlayingInfo::derive(track, session, transport);
        if let Err(e) = self.surface.publish(&info) {
            tracing::warn!("now playing update dropped: {e:#}");
        }
    }
}

/// What the desktop "lock screen" currently shows.
#[derive(Default)]
pub struct NowPlayingBoard {
    pub info: Option<NowPlayingInfo>,
    pub enabled: HashSet<Capability>,
    pub updates: u64,
    published_at: Option<Instant>,
    commands: Option<RemoteCommandSender>,
}

impl NowPlayingBoard {
    pub fn shared() -> Arc<Mutex<NowPlayingBoard>> {
        Arc::new(Mutex::new(NowPlayingBoard::default()))
    }

    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.enabled.contains(&capability)
    }

    /// Elapsed time as the OS would display it now: the published position
    /// advanced by the published rate, capped at the item's duration.
    pub fn elapsed(&self) -> Option<Duration> {
        let info = self.info.as_ref()?;
        let mut elapsed = info.elapsed?;

        if let Some(at) = self.published_at {
            elapsed += at.elapsed().mul_f32(info.rate);
        }

        Some(match info.duration {
            Some(duration) => elapsed.min(duration),
            None => elapsed,
        })
    }

    /// Press a media button. Presses on disabled controls are swallowed, the
    /// same way a greyed-out OS control would be.
    pub fn press(&self, command: RemoteCommand) -> Result<()> {
        if !self.is_enabled(Capability::of(&command)) {
            tracing::debug!(?command, "ignoring press on disabled control");
            return Ok(());
        }

        let commands = self
            .commands
            .as_ref()
            .ok_or_else(|| anyhow!("Media controls are not connected"))?;
        commands.send(command)?;
        Ok(())
    }
}

/// Desktop stand-in for the OS now-playing center.
pub struct DesktopControlSurface {
    board: Arc<Mutex<NowPlayingBoard>>,
}

impl DesktopControlSurface {
    pub fn new(board: Arc<Mutex<NowPlayingBoard>>) -> Self {
        DesktopControlSurface { board }
    }
}

impl ControlSurface for DesktopControlSurface {
    fn publish(&mut self, info: &NowPlayingInfo) -> Result<()> {
        let mut board = self
            .board
            .lock()
            .map_err(|_| anyhow!("Now playing board is poisoned"))?;

        tracing::info!(
            title = info.title.as_deref().unwrap_or("-"),
            rate = info.rate,
            status = ?info.status,
            "now playing"
        );

        board.info = Some(info.clone());
        board.published_at = Some(Instant::now());
        board.updates += 1;
        Ok(())
    }

    fn set_enabled(&mut self, capability: Capability, enabled: bool) {
        if let Ok(mut board) = self.board.lock() {
            match enabled {
                true => board.enabled.insert(capability),
                false => board.enabled.remove(&capability),
            };
        }
    }

    fn register_commands(&mut self, commands: RemoteCommandSender) {
        if let Ok(mut board) = self.board.lock() {
            board.commands = Some(commands);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bridge::TransportCommandBridge, player::SilentTransport};

    fn dark_world() -> Track {
        Track::new("Dark world", "Renee", "dark-world.mp3", "author4.png")
    }

    fn playing(index: usize) -> PlaybackSession {
        PlaybackSession {
            selected: Some(index),
            playing: Some(index),
            last_playing: Some(index),
            is_playing: true,
        }
    }

    #[test]
    fn enables_scrubbing_once_at_first_publish() {
        let mut surface = MockControlSurface::new();
        surface
            .expect_set_enabled()
            .withf(|capability, enabled| {
                *capability == Capability::ChangePlaybackPosition && *enabled
            })
            .times(1)
            .return_const(());
        surface.expect_publish().times(3).returning(|_| Ok(()));

        let mut publisher = NowPlayingPublisher::new(Box::new(surface));
        let transport = SilentTransport::default();

        for _ in 0..3 {
            publisher.publish(None, &PlaybackSession::default(), &transport);
        }
    }

    #[test]
    fn publishes_track_metadata_and_rate() {
        let mut surface = MockControlSurface::new();
        surface.expect_set_enabled().return_const(());
        surface
            .expect_publish()
            .withf(|info| {
                info.title.as_deref() == Some("Dark world")
                    && info.author.as_deref() == Some("Renee")
                    && info.rate == 1.0
                    && info.status == PlaybackStatus::Playing
                    && !info.is_live_stream
            })
            .times(1)
            .returning(|_| Ok(()));

        let mut publisher = NowPlayingPublisher::new(Box::new(surface));
        let track = dark_world();
        publisher.publish(Some(&track), &playing(3), &SilentTransport::default());
    }

    #[test]
    fn publish_failure_is_not_fatal() {
        let mut surface = MockControlSurface::new();
        surface.expect_set_enabled().return_const(());
        surface
            .expect_publish()
            .times(2)
            .returning(|_| Err(anyhow!("no player item")));

        let mut publisher = NowPlayingPublisher::new(Box::new(surface));
        let transport = SilentTransport::default();
        publisher.publish(None, &PlaybackSession::default(), &transport);
        publisher.publish(None, &PlaybackSession::default(), &transport);
    }

    #[test]
    fn attach_registers_for_remote_commands() {
        let mut surface = MockControlSurface::new();
        surface.expect_register_commands().times(1).return_const(());
        surface
            .expect_set_enabled()
            .withf(|capability, enabled| {
                *capability != Capability::ChangePlaybackPosition && *enabled
            })
            .times(3)
            .return_const(());

        let (_bridge, sender) = TransportCommandBridge::new();
        NowPlayingPublisher::new(Box::new(surface)).attach(sender);
    }

    #[test]
    fn paused_track_keeps_metadata_without_rate() {
        let track = dark_world();
        let session = PlaybackSession {
            selected: Some(3),
            last_playing: Some(3),
            ..Default::default()
        };
        let info = NowPlayingInfo::derive(Some(&track), &session, &SilentTransport::default());

        assert_eq!(info.status, PlaybackStatus::Paused);
        assert_eq!(info.rate, 0.0);
        assert_eq!(info.title.as_deref(), Some("Dark world"));
        assert_eq!(info.duration, None);
    }

    #[test]
    fn board_only_forwards_enabled_controls() {
        let (bridge, sender) = TransportCommandBridge::new();
        let board = NowPlayingBoard::shared();
        let mut surface = DesktopControlSurface::new(Arc::clone(&board));
        surface.register_commands(sender);
        surface.set_enabled(Capability::Pause, true);

        let board = board.lock().unwrap();
        board.press(RemoteCommand::Play).unwrap();
        board.press(RemoteCommand::Pause).unwrap();

        let received: Vec<_> = bridge.remote_commands().try_iter().collect();
        assert_eq!(received, vec![RemoteCommand::Pause]);
    }

    #[test]
    fn paused_board_does_not_advance() {
        let board = NowPlayingBoard::shared();
        let mut surface = DesktopControlSurface::new(Arc::clone(&board));
        surface
            .publish(&NowPlayingInfo {
                elapsed: Some(Duration::from_secs(30)),
                duration: Some(Duration::from_secs(200)),
                rate: 0.0,
                status: PlaybackStatus::Paused,
                ..Default::default()
            })
            .unwrap();

        let board = board.lock().unwrap();
        assert_eq!(board.updates, 1);
        assert_eq!(board.elapsed(), Some(Duration::from_secs(30)));
    }
}
