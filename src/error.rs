use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlayerError>;

#[derive(Error, Debug)]
pub enum PlayerError {
    /// Command referenced a track that is not in the catalog.
    #[error("Track index {index} is outside the catalog (0..{len})")]
    InvalidIndex { index: i64, len: usize },

    /// A catalog entry could not be resolved at startup.
    #[error("Could not resolve {}: {reason}", path.display())]
    ResourceResolution { path: PathBuf, reason: String },

    /// The audio transport rejected or could not perform a request.
    #[error("Transport unavailable: {0}")]
    TransportUnavailable(String),

    /// The coordinator thread has shut down.
    #[error("Playback coordinator is no longer running")]
    Disconnected,
}

impl PlayerError {
    pub(crate) fn invalid_index(index: impl TryInto<i64>, len: usize) -> Self {
        PlayerError::InvalidIndex {
            index: index.try_into().unwrap_or(i64::MAX),
            len,
        }
    }
}

impl<T> From<crossbeam_channel::SendError<T>> for PlayerError {
    fn from(_: crossbeam_channel::SendError<T>) -> Self {
        PlayerError::Disconnected
    }
}

impl From<crossbeam_channel::RecvError> for PlayerError {
    fn from(_: crossbeam_channel::RecvError) -> Self {
        PlayerError::Disconnected
    }
}
