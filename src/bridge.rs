//! Inbound side of the OS media controls.
//!
//! Lock-screen or steering-wheel buttons have no idea which row a surface has
//! selected, so their commands are translated into resume/pause semantics
//! before they reach the coordinator. End-of-media signals raised on audio
//! threads take the same route, which puts every external event on the
//! coordinator thread in arrival order.

use crate::{
    error::Result,
    player::{PlaybackSession, PlayerCommand, TransportEvent},
};
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCommand {
    Play,
    Pause,
    TogglePlayPause,
    ChangePlaybackPosition(Duration),
}

/// Handed to the control surface so it can forward button presses.
#[derive(Clone)]
pub struct RemoteCommandSender {
    tx: Sender<RemoteCommand>,
}

impl RemoteCommandSender {
    pub fn send(&self, command: RemoteCommand) -> Result<()> {
        self.tx.send(command)?;
        Ok(())
    }
}

pub struct TransportCommandBridge {
    remote: Receiver<RemoteCommand>,
    events: Receiver<TransportEvent>,
    events_tx: Sender<TransportEvent>,
}

impl TransportCommandBridge {
    pub fn new() -> (Self, RemoteCommandSender) {
        let (remote_tx, remote) = unbounded();
        let (events_tx, events) = unbounded();

        let bridge = TransportCommandBridge {
            remote,
            events,
            events_tx,
        };

        (bridge, RemoteCommandSender { tx: remote_tx })
    }

    pub fn remote_commands(&self) -> &Receiver<RemoteCommand> {
        &self.remote
    }

    pub fn transport_events(&self) -> &Receiver<TransportEvent> {
        &self.events
    }

    /// Where the transport's finished signals are delivered.
    pub fn event_sender(&self) -> Sender<TransportEvent> {
        self.events_tx.clone()
    }

    pub fn translate_remote(command: RemoteCommand, session: &PlaybackSession) -> PlayerCommand {
        match command {
            RemoteCommand::Play => PlayerCommand::Resume,
            RemoteCommand::Pause => PlayerCommand::Pause,
            RemoteCommand::TogglePlayPause => match session.is_playing {
                true => PlayerCommand::Pause,
                false => PlayerCommand::Resume,
            },
            RemoteCommand::ChangePlaybackPosition(position) => PlayerCommand::Seek(position),
        }
    }

    pub fn translate_event(event: TransportEvent) -> PlayerCommand {
        match event {
            TransportEvent::Finished { generation } => PlayerCommand::Finished { generation },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> PlaybackSession {
        PlaybackSession {
            selected: Some(1),
            playing: Some(1),
            last_playing: Some(1),
            is_playing: true,
        }
    }

    #[test]
    fn remote_play_means_resume() {
        let cmd = TransportCommandBridge::translate_remote(RemoteCommand::Play, &playing());
        assert!(matches!(cmd, PlayerCommand::Resume));

        let cmd = TransportCommandBridge::translate_remote(RemoteCommand::Pause, &playing());
        assert!(matches!(cmd, PlayerCommand::Pause));
    }

    #[test]
    fn toggle_follows_session() {
        let cmd =
            TransportCommandBridge::translate_remote(RemoteCommand::TogglePlayPause, &playing());
        assert!(matches!(cmd, PlayerCommand::Pause));

        let idle = PlaybackSession::default();
        let cmd = TransportCommandBridge::translate_remote(RemoteCommand::TogglePlayPause, &idle);
        assert!(matches!(cmd, PlayerCommand::Resume));
    }

    #[test]
    fn scrubbing_becomes_seek() {
        let pos = Duration::from_secs(42);
        let cmd = TransportCommandBridge::translate_remote(
            RemoteCommand::ChangePlaybackPosition(pos),
            &playing(),
        );
        assert!(matches!(cmd, PlayerCommand::Seek(p) if p == pos));
    }

    #[test]
    fn sender_feeds_the_bridge_queue() {
        let (bridge, sender) = TransportCommandBridge::new();
        sender.send(RemoteCommand::Pause).unwrap();
        sender.send(RemoteCommand::Play).unwrap();

        let received: Vec<_> = bridge.remote_commands().try_iter().collect();
        assert_eq!(received, vec![RemoteCommand::Pause, RemoteCommand::Play]);
    }

    #[test]
    fn finished_events_keep_their_generation() {
        let (bridge, _sender) = TransportCommandBridge::new();
        bridge
            .event_sender()
            .send(TransportEvent::Finished { generation: 9 })
            .unwrap();

        let event = bridge.transport_events().recv().unwrap();
        let cmd = TransportCommandBridge::translate_event(event);
        assert!(matches!(cmd, PlayerCommand::Finished { generation: 9 }));
    }
}
