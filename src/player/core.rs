use super::{
    FinishedSignal, Intent, ObserverRegistry, PlaybackSession, PlayerCommand, SilentTransport,
    SurfaceId, Transport, TransportOp,
};
use crate::{
    bridge::TransportCommandBridge, catalog::Catalog, error::Result,
    now_playing::NowPlayingPublisher,
};
use crossbeam_channel::{Receiver, Sender, never, select};
use std::{
    cell::Cell,
    sync::{Arc, Mutex, PoisonError},
    thread::{self, JoinHandle},
    time::Duration,
};

thread_local! {
    static ON_COORDINATOR: Cell<bool> = const { Cell::new(false) };
}

/// True on the coordinator thread, where observers run.
pub(crate) fn on_coordinator_thread() -> bool {
    ON_COORDINATOR.with(Cell::get)
}

enum Inbound {
    Command(PlayerCommand),
    RemoteClosed,
    Closed,
}

/// Single owner of the playback session.
///
/// Every command, remote button press and transport event is handled here,
/// one at a time, so a transition (state, transport call, fan-out, publish)
/// is never interleaved with another.
pub(crate) struct PlayerCore {
    catalog: Arc<Catalog>,
    transport: Box<dyn Transport>,
    bridge: TransportCommandBridge,
    publisher: NowPlayingPublisher,
    registry: ObserverRegistry,
    shared: Arc<Mutex<PlaybackSession>>,

    session: PlaybackSession,
    loaded: Option<usize>,
    generation: u64,
}

impl PlayerCore {
    pub(crate) fn spawn<F>(
        catalog: Arc<Catalog>,
        make_transport: F,
        bridge: TransportCommandBridge,
        publisher: NowPlayingPublisher,
        commands: Receiver<PlayerCommand>,
        shared: Arc<Mutex<PlaybackSession>>,
    ) -> std::io::Result<JoinHandle<()>>
    where
        F: FnOnce() -> Result<Box<dyn Transport>> + Send + 'static,
    {
        thread::Builder::new()
            .name("playback".to_string())
            .spawn(move || {
                ON_COORDINATOR.with(|flag| flag.set(true));

                // Audio output handles are not always Send, build them here
                let transport = make_transport().unwrap_or_else(|e| {
                    tracing::warn!("{e}; continuing without audio output");
                    Box::new(SilentTransport::default())
                });

                let mut core = PlayerCore {
                    catalog,
                    transport,
                    bridge,
                    publisher,
                    registry: ObserverRegistry::new(),
                    shared,

                    session: PlaybackSession::default(),
                    loaded: None,
                    generation: 0,
                };

                core.run(commands);
            })
    }

    fn run(&mut self, commands: Receiver<PlayerCommand>) {
        let mut remote = self.bridge.remote_commands().clone();
        let events = self.bridge.transport_events().clone();

        loop {
            let inbound = select! {
                recv(commands) -> msg => msg.map_or(Inbound::Closed, Inbound::Command),
                recv(remote) -> msg => match msg {
                    Ok(cmd) => Inbound::Command(
                        TransportCommandBridge::translate_remote(cmd, &self.session)
                    ),
                    Err(_) => Inbound::RemoteClosed,
                },
                recv(events) -> msg => match msg {
                    Ok(event) => Inbound::Command(TransportCommandBridge::translate_event(event)),
                    Err(_) => Inbound::Closed,
                },
            };

            match inbound {
                Inbound::Command(cmd) => {
                    if let Some(ack) = self.handle(cmd) {
                        self.shutdown();
                        // Handles must see the disconnect once acknowledged
                        drop(commands);
                        let _ = ack.send(());
                        return;
                    }
                }
                Inbound::RemoteClosed => remote = never(),
                Inbound::Closed => break,
            }
        }

        self.shutdown();
    }

    /// Returns the acknowledgement channel when asked to shut down.
    fn handle(&mut self, command: PlayerCommand) -> Option<Sender<()>> {
        match command {
            PlayerCommand::Play { index, origin } => self.apply(Intent::Play(index), origin),
            PlayerCommand::Select { index, origin } => self.apply(Intent::Select(index), origin),
            PlayerCommand::Pause => self.apply(Intent::Pause, None),
            PlayerCommand::Resume => self.apply(Intent::Resume, None),
            PlayerCommand::Stop => self.apply(Intent::Stop, None),
            PlayerCommand::Seek(position) => self.seek(position),
            PlayerCommand::Finished { generation } => self.finished(generation),

            PlayerCommand::Subscribe(id, observer) => {
                self.registry.subscribe(id, observer);
                tracing::debug!(%id, observers = self.registry.len(), "surface subscribed");
            }
            PlayerCommand::Unsubscribe(id) => {
                if self.registry.unsubscribe(id) {
                    tracing::debug!(%id, observers = self.registry.len(), "surface unsubscribed");
                }
            }

            PlayerCommand::Sync(ack) => {
                let _ = ack.send(());
            }
            PlayerCommand::Shutdown(ack) => return Some(ack),
        }
        None
    }

    fn apply(&mut self, intent: Intent, origin: Option<SurfaceId>) {
        if let Intent::Play(index) | Intent::Select(index) = intent {
            if let Err(e) = self.catalog.get(index) {
                tracing::warn!(?intent, "rejected: {e}");
                return;
            }
        }

        let Some(transition) = self.session.transition(intent, self.loaded) else {
            tracing::trace!(?intent, session = ?self.session, "nothing to do");
            return;
        };

        self.drive_transport(transition.op);
        if intent == Intent::Finished {
            self.loaded = None;
        }

        self.session = transition.next;
        *self.shared.lock().unwrap_or_else(PoisonError::into_inner) = self.session;

        let except = match transition.skip_origin {
            true => origin,
            false => None,
        };
        self.registry.notify(transition.notification, except);
        self.publish();

        tracing::debug!(
            ?intent,
            notification = ?transition.notification,
            session = ?self.session,
            "transition"
        );
    }

    fn drive_transport(&mut self, op: TransportOp) {
        let result = match op {
            TransportOp::Start(index) => self.start(index),
            TransportOp::Resume => self.transport.play(),
            TransportOp::Pause => self.transport.pause(),
        };

        if let Err(e) = result {
            tracing::warn!(?op, "{e}");
        }
    }

    fn start(&mut self, index: usize) -> Result<()> {
        let catalog = Arc::clone(&self.catalog);
        let track = catalog.get(index)?;

        self.generation += 1;
        self.loaded = None;

        let signal = FinishedSignal::new(self.generation, self.bridge.event_sender());
        self.transport.load(track.audio(), signal)?;
        self.loaded = Some(index);

        self.transport.play()
    }

    fn finished(&mut self, generation: u64) {
        if generation != self.generation || self.loaded.is_none() {
            tracing::trace!(generation, "ignoring finish of a replaced item");
            return;
        }

        self.apply(Intent::Finished, None);
        self.loaded = None;
    }

    fn seek(&mut self, position: Duration) {
        if self.loaded.is_none() {
            return;
        }

        if let Err(e) = self.transport.seek(position) {
            tracing::warn!(?position, "seek failed: {e}");
        }
        self.publish();
    }

    fn publish(&mut self) {
        let track = self.loaded.and_then(|index| self.catalog.tracks().get(index));
        self.publisher
            .publish(track, &self.session, self.transport.as_ref());
    }

    fn shutdown(&mut self) {
        if let Err(e) = self.transport.pause() {
            tracing::warn!("could not pause transport on shutdown: {e}");
        }
        tracing::info!("playback coordinator stopped");
    }
}
