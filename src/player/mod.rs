mod backend_rodio;
mod core;
mod handle;
mod registry;
mod session;
mod transport;

pub use backend_rodio::RodioTransport;
pub use handle::PlayerHandle;
pub use registry::{Observer, ObserverRegistry, SurfaceId};
pub use session::{Intent, PlaybackSession, Transition, TransportOp};
pub use transport::{FinishedSignal, SilentTransport, Transport, TransportEvent};

use crossbeam_channel::Sender;
use std::time::Duration;

/// The three shapes in which surfaces learn about a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    FullReset,
    ResetToIndex(usize),
    ResumeToLast,
}

pub enum PlayerCommand {
    Play {
        index: usize,
        origin: Option<SurfaceId>,
    },
    Select {
        index: usize,
        origin: Option<SurfaceId>,
    },
    Pause,
    Resume,
    Stop,
    Seek(Duration),
    Finished {
        generation: u64,
    },
    Subscribe(SurfaceId, Box<dyn Observer>),
    Unsubscribe(SurfaceId),
    Sync(Sender<()>),
    Shutdown(Sender<()>),
}
