//! Grouping of tick files into ask/bid batches.

use candlewick_types::{Result, Side};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::filename::{extract_key, sort_by_hour};

/// The ask and bid files of one batch, each sorted by hour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    /// Files carrying the `_ASK_` marker.
    pub ask: Vec<String>,
    /// Files carrying the `_BID_` marker.
    pub bid: Vec<String>,
}

impl Batch {
    /// Returns true if neither side has any files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ask.is_empty() && self.bid.is_empty()
    }

    /// Returns the files for one side.
    #[must_use]
    pub fn side(&self, side: Side) -> &[String] {
        match side {
            Side::Ask => &self.ask,
            Side::Bid => &self.bid,
        }
    }

    /// Splits the batch into `(ask, bid)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.ask, self.bid)
    }
}

/// Groups the files of a directory by batch key.
///
/// Built once per processing run. Groups are read-only while a batch is
/// processed and can be evicted afterwards to release their filename lists.
#[derive(Debug, Clone, Default)]
pub struct BatchOrganizer {
    dir: PathBuf,
    groups: HashMap<String, Vec<String>>,
}

impl BatchOrganizer {
    /// Scans `dir` and groups every regular file by its batch key.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed, or a filename does
    /// not carry a key and an hour.
    pub fn build(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let filenames = list_files(&dir)?;
        debug!(dir = %dir.display(), files = filenames.len(), "scanned tick directory");
        Self::from_filenames(dir, filenames)
    }

    /// Groups an explicit list of filenames that live in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a filename does not carry a key and an hour.
    pub fn from_filenames<I, S>(dir: impl Into<PathBuf>, filenames: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut groups: HashMap<String, Vec<String>> = HashMap::new();

        for filename in filenames {
            let filename = filename.into();
            let key = extract_key(&filename)?.to_string();
            groups.entry(key).or_default().push(filename);
        }

        for files in groups.values_mut() {
            sort_by_hour(files)?;
        }

        Ok(Self {
            dir: dir.into(),
            groups,
        })
    }

    /// Returns the directory the files live in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the ask and bid files of the batch `filename` belongs to.
    ///
    /// An unknown (or already evicted) key yields an empty batch, not an
    /// error. Files carrying neither side marker are left out.
    ///
    /// # Errors
    ///
    /// Returns an error if `filename` itself has no batch key.
    pub fn get_batch(&self, filename: &str) -> Result<Batch> {
        let key = extract_key(filename)?;
        let Some(files) = self.groups.get(key) else {
            return Ok(Batch::default());
        };

        let mut batch = Batch {
            ask: Vec::with_capacity(files.len() / 2 + 1),
            bid: Vec::with_capacity(files.len() / 2 + 1),
        };
        for file in files {
            if Side::Ask.matches(file) {
                batch.ask.push(file.clone());
            }
            if Side::Bid.matches(file) {
                batch.bid.push(file.clone());
            }
        }
        Ok(batch)
    }

    /// Drops the group `filename` belongs to. Returns true if a group was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if `filename` has no batch key.
    pub fn evict(&mut self, filename: &str) -> Result<bool> {
        let key = extract_key(filename)?;
        Ok(self.groups.remove(key).is_some())
    }

    /// Returns the hour-sorted files of a group.
    #[must_use]
    pub fn group(&self, key: &str) -> Option<&[String]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Returns all batch keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.groups.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Returns the number of groups still held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no groups are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Lists the names of the regular files in `dir`, sorted by name.
///
/// Symlinks are followed, so a link to a tick file is listed and a dangling
/// link is not.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
