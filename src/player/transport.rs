use crate::error::Result;
use crossbeam_channel::Sender;
use std::{path::Path, time::Duration};

pub enum TransportEvent {
    Finished { generation: u64 },
}

/// The "item reached its end" callback handed to the transport with every
/// load. Safe to fire from an audio thread; the event is marshaled onto the
/// coordinator thread.
#[derive(Clone)]
pub struct FinishedSignal {
    generation: u64,
    events: Sender<TransportEvent>,
}

impl FinishedSignal {
    pub(crate) fn new(generation: u64, events: Sender<TransportEvent>) -> Self {
        FinishedSignal { generation, events }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn fire(&self) {
        let _ = self.events.send(TransportEvent::Finished {
            generation: self.generation,
        });
    }
}

/// The audio engine driven by the coordinator.
///
/// Calls are fire-and-forget: the coordinator logs failures and carries on
/// with its optimistic view of the session.
pub trait Transport {
    /// Replace the current item with `audio`, paused at the start.
    fn load(&mut self, audio: &Path, on_finished: FinishedSignal) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// 0.0 while paused or empty.
    fn rate(&self) -> f32;
    fn position(&self) -> Duration;
    fn duration(&self) -> Option<Duration>;
}

/// Stand-in used when no audio device is available. Tracks play/pause so
/// the published rate stays truthful, but never produces sound or ends.
#[derive(Default)]
pub struct SilentTransport {
    loaded: bool,
    playing: bool,
}

impl Transport for SilentTransport {
    fn load(&mut self, _audio: &Path, _on_finished: FinishedSignal) -> Result<()> {
        self.loaded = true;
        self.playing = false;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.playing = self.loaded;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.playing = false;
        Ok(())
    }

    fn seek(&mut self, _position: Duration) -> Result<()> {
        Ok(())
    }

    fn rate(&self) -> f32 {
        match self.playing {
            true => 1.0,
            false => 0.0,
        }
    }

    fn position(&self) -> Duration {
        Duration::ZERO
    }

    fn duration(&self) -> Option<Duration> {
        None
    }
}
