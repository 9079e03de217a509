use super::Track;
use crate::{PlayerError, config::TrackEntry, error::Result};
use lofty::{file::TaggedFileExt, probe::Probe, tag::Accessor};
use std::path::{Path, PathBuf};

const UNKNOWN_AUTHOR: &str = "Unknown Artist";

/// Resolves the `(title, author, audio, artwork)` tuples a catalog is built from.
pub trait CatalogSource {
    fn resolve(&self) -> Result<Vec<Track>>;
}

/// Tracks that are already resolved, no filesystem access.
pub struct StaticCatalogSource {
    tracks: Vec<Track>,
}

impl StaticCatalogSource {
    pub fn new(tracks: Vec<Track>) -> Self {
        StaticCatalogSource { tracks }
    }
}

impl CatalogSource for StaticCatalogSource {
    fn resolve(&self) -> Result<Vec<Track>> {
        Ok(self.tracks.clone())
    }
}

/// Tracks bundled as files below an assets directory.
pub struct FsCatalogSource {
    assets_dir: PathBuf,
    entries: Vec<TrackEntry>,
}

impl FsCatalogSource {
    pub fn new(assets_dir: impl Into<PathBuf>, entries: Vec<TrackEntry>) -> Self {
        FsCatalogSource {
            assets_dir: assets_dir.into(),
            entries,
        }
    }

    fn resolve_entry(&self, entry: &TrackEntry) -> Result<Track> {
        let audio = self.locate(&entry.audio)?;
        let artwork = self.locate(&entry.artwork)?;

        let (tag_title, tag_author) = match (&entry.title, &entry.author) {
            (Some(_), Some(_)) => (None, None),
            _ => read_tags(&audio),
        };

        let title = entry
            .title
            .clone()
            .or(tag_title)
            .or_else(|| {
                audio
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_default();

        let author = entry
            .author
            .clone()
            .or(tag_author)
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        Ok(Track::new(title, author, audio, artwork))
    }

    fn locate(&self, relative: &Path) -> Result<PathBuf> {
        let path = self.assets_dir.join(relative);
        match path.is_file() {
            true => Ok(path),
            false => Err(PlayerError::ResourceResolution {
                path,
                reason: "file not found".to_string(),
            }),
        }
    }
}

impl CatalogSource for FsCatalogSource {
    fn resolve(&self) -> Result<Vec<Track>> {
        self.entries
            .iter()
            .map(|entry| self.resolve_entry(entry))
            .collect()
    }
}

fn read_tags(path: &Path) -> (Option<String>, Option<String>) {
    let tagged = match Probe::open(path).and_then(|probe| probe.read()) {
        Ok(tagged) => tagged,
        Err(e) => {
            tracing::debug!(path = %path.display(), "no readable tags: {e}");
            return (None, None);
        }
    };

    match tagged.primary_tag().or_else(|| tagged.first_tag()) {
        Some(tag) => (
            tag.title().map(|t| t.into_owned()),
            tag.artist().map(|a| a.into_owned()),
        ),
        None => (None, None),
    }
}
