use crate::PlayerError;
use anyhow::Error;

/// What the error popup shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub headline: &'static str,
    pub detail: String,
}

impl From<&Error> for Notice {
    fn from(e: &Error) -> Self {
        let headline = match e.downcast_ref::<PlayerError>() {
            Some(PlayerError::InvalidIndex { .. }) => "No such track",
            Some(PlayerError::ResourceResolution { .. }) => "Missing file",
            Some(PlayerError::TransportUnavailable(_)) => "Audio output",
            Some(PlayerError::Disconnected) => "Playback stopped",
            None => "Error",
        };

        Notice {
            headline,
            detail: format!("{e:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};

    #[test]
    fn player_errors_get_their_own_headline() {
        let e = Error::from(PlayerError::invalid_index(7usize, 5));
        let notice = Notice::from(&e);
        assert_eq!(notice.headline, "No such track");
        assert!(notice.detail.contains("7"));

        let wrapped: anyhow::Result<()> = Err(PlayerError::Disconnected).context("tap");
        let notice = Notice::from(&wrapped.unwrap_err());
        assert_eq!(notice.headline, "Playback stopped");
        assert!(notice.detail.starts_with("tap: "));
    }

    #[test]
    fn other_errors_fall_back() {
        let notice = Notice::from(&anyhow!("Nothing is playing"));
        assert_eq!(
            notice,
            Notice {
                headline: "Error",
                detail: "Nothing is playing".to_string(),
            }
        );
    }
}
