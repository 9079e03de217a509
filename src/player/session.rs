use super::Notification;

/// The coordinator's view of "what is selected, what is playing".
///
/// `playing` is cleared on pause even though the transport keeps the item
/// loaded, so `selected` and `last_playing` are what a resume works from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackSession {
    pub selected: Option<usize>,
    pub playing: Option<usize>,
    pub last_playing: Option<usize>,
    pub is_playing: bool,
}

/// A request to change the session, already validated against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Start track `i` from the beginning.
    Play(usize),
    /// A surface tapped track `i`: toggles when `i` is the selected track.
    Select(usize),
    Pause,
    /// Resume the paused track, or the last played one.
    Resume,
    Stop,
    /// The loaded item reached its end.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportOp {
    /// Load track `i` and start it.
    Start(usize),
    /// Continue the loaded item from its current position.
    Resume,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: PlaybackSession,
    pub op: TransportOp,
    pub notification: Notification,
    /// The surface that asked for a fresh `Play` already shows it.
    pub skip_origin: bool,
}

impl PlaybackSession {
    /// Work out the transition for `intent`.
    ///
    /// `loaded` is the track the transport currently holds, if any. Returns
    /// `None` when the intent would not change observable state.
    pub fn transition(&self, intent: Intent, loaded: Option<usize>) -> Option<Transition> {
        match intent {
            Intent::Play(index) => self.play(index),
            Intent::Select(index) => match (self.selected == Some(index), self.is_playing) {
                (true, true) => self.pause(),
                (true, false) => self.resume_to(index, loaded),
                // Taps are echoed to their own surface too
                (false, _) => self.play(index).map(|t| Transition {
                    skip_origin: false,
                    ..t
                }),
            },
            Intent::Pause => self.pause(),
            Intent::Resume => self
                .playing
                .or(self.last_playing)
                .and_then(|target| self.resume_to(target, loaded)),
            Intent::Stop => self.stop(),
            Intent::Finished => match self.playing {
                Some(_) => self.stop(),
                None => None,
            },
        }
    }

    fn play(&self, index: usize) -> Option<Transition> {
        if self.playing == Some(index) && self.is_playing {
            return None;
        }

        Some(Transition {
            next: PlaybackSession::active(index),
            op: TransportOp::Start(index),
            notification: Notification::ResetToIndex(index),
            skip_origin: true,
        })
    }

    fn pause(&self) -> Option<Transition> {
        if self.playing.is_none() || !self.is_playing {
            return None;
        }

        Some(Transition {
            next: PlaybackSession {
                playing: None,
                is_playing: false,
                ..*self
            },
            op: TransportOp::Pause,
            notification: Notification::FullReset,
            skip_origin: false,
        })
    }

    fn resume_to(&self, target: usize, loaded: Option<usize>) -> Option<Transition> {
        if self.is_playing {
            return None;
        }

        let op = match loaded == Some(target) {
            true => TransportOp::Resume,
            false => TransportOp::Start(target),
        };

        let notification = match self.selected == Some(target) {
            true => Notification::ResetToIndex(target),
            false => Notification::ResumeToLast,
        };

        Some(Transition {
            next: PlaybackSession::active(target),
            op,
            notification,
            skip_origin: false,
        })
    }

    fn stop(&self) -> Option<Transition> {
        let next = PlaybackSession {
            selected: None,
            playing: None,
            last_playing: self.last_playing,
            is_playing: false,
        };

        if next == *self {
            return None;
        }

        Some(Transition {
            next,
            op: TransportOp::Pause,
            notification: Notification::FullReset,
            skip_origin: false,
        })
    }

    fn active(index: usize) -> Self {
        PlaybackSession {
            selected: Some(index),
            playing: Some(index),
            last_playing: Some(index),
            is_playing: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(
        session: &mut PlaybackSession,
        loaded: &mut Option<usize>,
        intent: Intent,
    ) -> Option<Transition> {
        let transition = session.transition(intent, *loaded)?;
        *session = transition.next;
        match transition.op {
            TransportOp::Start(i) => *loaded = Some(i),
            TransportOp::Resume | TransportOp::Pause => (),
        }
        if intent == Intent::Finished {
            *loaded = None;
        }
        Some(transition)
    }

    #[test]
    fn play_selects_and_starts() {
        let session = PlaybackSession::default();
        let t = session.transition(Intent::Play(2), None).unwrap();

        assert_eq!(t.next, PlaybackSession::active(2));
        assert_eq!(t.op, TransportOp::Start(2));
        assert_eq!(t.notification, Notification::ResetToIndex(2));
        assert!(t.skip_origin);
    }

    #[test]
    fn replaying_the_playing_track_is_a_no_op() {
        let session = PlaybackSession::active(1);
        assert_eq!(session.transition(Intent::Play(1), Some(1)), None);
    }

    #[test]
    fn tapping_the_same_track_toggles() {
        let mut session = PlaybackSession::default();
        let mut loaded = None;

        apply(&mut session, &mut loaded, Intent::Select(0)).unwrap();
        assert_eq!(session, PlaybackSession::active(0));

        let pause = apply(&mut session, &mut loaded, Intent::Select(0)).unwrap();
        assert_eq!(pause.op, TransportOp::Pause);
        assert_eq!(pause.notification, Notification::FullReset);
        assert_eq!(
            session,
            PlaybackSession {
                selected: Some(0),
                playing: None,
                last_playing: Some(0),
                is_playing: false,
            }
        );

        let resume = apply(&mut session, &mut loaded, Intent::Select(0)).unwrap();
        assert_eq!(resume.op, TransportOp::Resume);
        assert_eq!(resume.notification, Notification::ResetToIndex(0));
        assert_eq!(session, PlaybackSession::active(0));

        let fresh = apply(&mut session, &mut loaded, Intent::Select(3)).unwrap();
        assert_eq!(fresh.op, TransportOp::Start(3));
        assert!(!fresh.skip_origin);
        assert_eq!(session, PlaybackSession::active(3));
    }

    #[test]
    fn pause_requires_active_playback() {
        assert_eq!(PlaybackSession::default().transition(Intent::Pause, None), None);

        let paused = PlaybackSession {
            selected: Some(1),
            last_playing: Some(1),
            ..Default::default()
        };
        assert_eq!(paused.transition(Intent::Pause, Some(1)), None);
    }

    #[test]
    fn stop_is_idempotent_and_keeps_last_playing() {
        let mut session = PlaybackSession::active(4);
        let mut loaded = Some(4);

        let first = apply(&mut session, &mut loaded, Intent::Stop).unwrap();
        assert_eq!(first.notification, Notification::FullReset);
        assert_eq!(
            session,
            PlaybackSession {
                last_playing: Some(4),
                ..Default::default()
            }
        );

        assert!(apply(&mut session, &mut loaded, Intent::Stop).is_none());
        assert_eq!(session.last_playing, Some(4));
    }

    #[test]
    fn resume_after_stop_returns_to_last_track() {
        let mut session = PlaybackSession::default();
        let mut loaded = None;

        apply(&mut session, &mut loaded, Intent::Play(2));
        apply(&mut session, &mut loaded, Intent::Stop);
        let resume = apply(&mut session, &mut loaded, Intent::Resume).unwrap();

        assert_eq!(resume.op, TransportOp::Resume);
        assert_eq!(resume.notification, Notification::ResumeToLast);
        assert_eq!(session.playing, Some(2));
        assert!(session.is_playing);
    }

    #[test]
    fn resume_reloads_a_released_item() {
        let mut session = PlaybackSession::default();
        let mut loaded = None;

        apply(&mut session, &mut loaded, Intent::Play(1));
        apply(&mut session, &mut loaded, Intent::Finished);
        assert_eq!(loaded, None);

        let resume = apply(&mut session, &mut loaded, Intent::Resume).unwrap();
        assert_eq!(resume.op, TransportOp::Start(1));
    }

    #[test]
    fn resume_with_nothing_to_resume_is_a_no_op() {
        assert_eq!(PlaybackSession::default().transition(Intent::Resume, None), None);
        assert_eq!(PlaybackSession::active(0).transition(Intent::Resume, Some(0)), None);
    }

    #[test]
    fn finished_matches_stop() {
        let session = PlaybackSession::active(1);

        let finished = session.transition(Intent::Finished, Some(1)).unwrap();
        let stopped = session.transition(Intent::Stop, Some(1)).unwrap();

        assert_eq!(finished, stopped);
        assert_eq!(finished.next.last_playing, Some(1));
    }

    #[test]
    fn finished_while_idle_is_ignored() {
        let paused = PlaybackSession {
            selected: Some(1),
            last_playing: Some(1),
            ..Default::default()
        };
        assert_eq!(paused.transition(Intent::Finished, Some(1)), None);
    }

    #[test]
    fn invariants_hold_across_transitions() {
        let intents = [
            Intent::Select(0),
            Intent::Select(0),
            Intent::Resume,
            Intent::Select(2),
            Intent::Pause,
            Intent::Stop,
            Intent::Resume,
            Intent::Finished,
            Intent::Play(4),
            Intent::Select(4),
            Intent::Play(1),
        ];
        let mut session = PlaybackSession::default();
        let mut loaded = None;

        for intent in intents {
            apply(&mut session, &mut loaded, intent);

            if session.playing.is_some() {
                assert_eq!(session.selected, session.playing);
            }
            if session.is_playing {
                assert!(session.playing.is_some());
            }
        }
    }
}
