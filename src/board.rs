use crate::{DirectoryEntry, Error, entry};
use regex::bytes::Regex;
use std::{
    ffi::OsStr,
    fmt::Debug,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, trace};

/// Finds the single device node a connected board shows up as.
pub struct BoardFinder {
    dir: Arc<Path>,
    pattern: Regex,
}

impl Debug for BoardFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardFinder")
            .field("dir", &self.dir)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

impl BoardFinder {
    /// Compiles `pattern`. Nothing is read from `dir` until [`BoardFinder::find`].
    pub fn new(dir: impl Into<Arc<Path>>, pattern: &str) -> Result<Self, Error> {
        let pattern = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.into(),
            source,
        })?;

        Ok(Self {
            dir: dir.into(),
            pattern,
        })
    }

    pub fn dir(&self) -> &Path {
        self.dir.as_ref()
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Lists the device directory and resolves the board from it.
    pub fn find(&self) -> Result<PathBuf, Error> {
        let entries = entry::read_dir(&self.dir).map_err(|source| Error::ReadDir {
            dir: self.dir.to_path_buf(),
            source,
        })?;
        debug!(dir = %self.dir.display(), entries = entries.len(), "listed device directory");

        self.find_in(&entries)
    }

    /// Resolves the board from an already listed device directory.
    ///
    /// Exactly one device entry may match; anything else is an error.
    pub fn find_in(&self, entries: &[DirectoryEntry]) -> Result<PathBuf, Error> {
        let mut candidates = self.candidates(entries);

        match candidates.len() {
            0 => Err(Error::NoMatch {
                pattern: self.pattern().into(),
                dir: self.dir.to_path_buf(),
            }),
            1 => {
                #[allow(clippy::unwrap_used, reason = "length checked above")]
                let name = candidates.pop().unwrap();
                let path = self.dir.join(&*name);
                debug!(path = %path.display(), "found board");
                Ok(path)
            }
            _ => Err(Error::MultipleMatches {
                pattern: self.pattern().into(),
                dir: self.dir.to_path_buf(),
                candidates,
            }),
        }
    }

    fn candidates(&self, entries: &[DirectoryEntry]) -> Vec<Arc<OsStr>> {
        entries
            .iter()
            .filter(|e| {
                let matches = e.kind.is_device() && self.pattern.is_match(e.name_bytes());
                trace!(name = ?e.name, kind = %e.kind, matches);
                matches
            })
            .map(|e| e.name.clone())
            .collect()
    }
}
