mod source;

pub use source::{CatalogSource, FsCatalogSource, StaticCatalogSource};

use crate::{PlayerError, error::Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    title: String,
    author: String,
    audio: PathBuf,
    artwork: PathBuf,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        audio: impl Into<PathBuf>,
        artwork: impl Into<PathBuf>,
    ) -> Self {
        Track {
            title: title.into(),
            author: author.into(),
            audio: audio.into(),
            artwork: artwork.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn audio(&self) -> &Path {
        &self.audio
    }

    pub fn artwork(&self) -> &Path {
        &self.artwork
    }
}

/// Fixed, ordered list of playable tracks.
///
/// A track's position is its identity for the lifetime of the process, so the
/// catalog exposes no way to reorder or mutate entries once loaded.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    /// Resolve every entry of `source`. Any failure aborts the whole load, an
    /// app cannot present a partially broken catalog.
    pub fn load<S: CatalogSource + ?Sized>(source: &S) -> Result<Self> {
        let tracks = source.resolve()?;
        tracing::info!(tracks = tracks.len(), "catalog loaded");
        Ok(Catalog { tracks })
    }

    pub fn get(&self, index: usize) -> Result<&Track> {
        self.tracks
            .get(index)
            .ok_or_else(|| PlayerError::invalid_index(index, self.len()))
    }

    /// Validate an index that arrived as a signed integer, e.g. from a host
    /// binding or a config value.
    pub fn checked_index(&self, raw: i64) -> Result<usize> {
        match usize::try_from(raw) {
            Ok(index) if index < self.len() => Ok(index),
            _ => Err(PlayerError::InvalidIndex {
                index: raw,
                len: self.len(),
            }),
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
