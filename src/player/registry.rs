use super::Notification;
use anyhow::Result;
use std::{
    collections::BTreeMap,
    fmt,
    panic::{self, AssertUnwindSafe},
};

/// Identifies a subscribed surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub(crate) u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Implemented by every surface that renders playback state.
///
/// Handlers run on the coordinator thread. Commands sent from inside a
/// handler are queued behind the transition being delivered.
pub trait Observer: Send {
    /// Re-read the whole session; anything may have changed.
    fn on_full_reset(&mut self) -> Result<()>;

    /// Track `index` is now selected and playing.
    fn on_reset_to_index(&mut self, index: usize) -> Result<()>;

    /// The last played track resumed.
    fn on_resume_to_last(&mut self) -> Result<()>;
}

/// Surfaces listening for playback transitions.
///
/// Entries are only dropped through `unsubscribe`; a surface that is torn
/// down without unsubscribing keeps receiving notifications.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: BTreeMap<SurfaceId, Box<dyn Observer>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, id: SurfaceId, observer: Box<dyn Observer>) {
        if self.observers.insert(id, observer).is_some() {
            tracing::warn!(%id, "surface subscribed twice, replacing previous observer");
        }
    }

    /// Returns whether `id` was subscribed.
    pub fn unsubscribe(&mut self, id: SurfaceId) -> bool {
        self.observers.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn notify_full_reset(&mut self) {
        self.deliver(None, "full reset", |o| o.on_full_reset());
    }

    pub fn notify_reset_to_index(&mut self, index: usize, except: Option<SurfaceId>) {
        self.deliver(except, "reset to index", |o| o.on_reset_to_index(index));
    }

    pub fn notify_resume_to_last(&mut self) {
        self.deliver(None, "resume to last", |o| o.on_resume_to_last());
    }

    pub fn notify(&mut self, notification: Notification, except: Option<SurfaceId>) {
        match notification {
            Notification::FullReset => self.notify_full_reset(),
            Notification::ResetToIndex(index) => self.notify_reset_to_index(index, except),
            Notification::ResumeToLast => self.notify_resume_to_last(),
        }
    }

    // A failing observer is logged and skipped, it never stops the fan-out.
    fn deliver<F>(&mut self, except: Option<SurfaceId>, label: &str, mut f: F)
    where
        F: FnMut(&mut dyn Observer) -> Result<()>,
    {
        for (id, observer) in self.observers.iter_mut() {
            if Some(*id) == except {
                continue;
            }

            match panic::catch_unwind(AssertUnwindSafe(|| f(observer.as_mut()))) {
                Ok(Ok(())) => (),
                Ok(Err(e)) => tracing::warn!(%id, "observer failed on {label}: {e:#}"),
                Err(_) => tracing::error!(%id, "observer panicked on {label}"),
            }
        }
    }
}
