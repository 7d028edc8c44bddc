//! Chaining an ordered list of files into one line stream.

use candlewick_types::{CandlewickError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lifecycle of a [`MultiFileStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// No file is open; the next read opens the next file in order.
    Closed,
    /// A file is open and being read.
    Open,
    /// Every file has been read, or a read failed. No handle is held.
    Exhausted,
}

/// Internal state; `Open` owns the only live handle.
#[derive(Debug)]
enum Handle {
    Closed,
    Open {
        reader: BufReader<File>,
        path: PathBuf,
    },
    Exhausted,
}

/// Presents an ordered list of files as one forward-only line source.
///
/// Files are opened lazily, one at a time. A file's handle is released
/// before the next one is opened, when the stream is exhausted, when an
/// error occurs, and when the stream is dropped.
#[derive(Debug)]
pub struct MultiFileStream {
    dir: PathBuf,
    files: Vec<String>,
    next_index: usize,
    handle: Handle,
    line: String,
}

impl MultiFileStream {
    /// Creates a stream over `files`, resolved relative to `dir`.
    ///
    /// No file is opened until the first call to [`Self::next_line`].
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, files: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            files,
            next_index: 0,
            handle: Handle::Closed,
            line: String::new(),
        }
    }

    /// Returns the next line with its terminator stripped, or None at the end
    /// of the last file.
    ///
    /// # Errors
    ///
    /// Returns [`CandlewickError::Open`] if a file cannot be opened and
    /// [`CandlewickError::Read`] if reading fails. Both leave the stream
    /// exhausted.
    pub fn next_line(&mut self) -> Result<Option<&str>> {
        loop {
            match &mut self.handle {
                Handle::Exhausted => return Ok(None),
                Handle::Closed => {
                    let Some(name) = self.files.get(self.next_index) else {
                        self.handle = Handle::Exhausted;
                        return Ok(None);
                    };
                    let path = self.dir.join(name);
                    self.next_index += 1;

                    match File::open(&path) {
                        Ok(file) => {
                            debug!(path = %path.display(), "opened tick file");
                            self.handle = Handle::Open {
                                reader: BufReader::new(file),
                                path,
                            };
                        }
                        Err(source) => {
                            self.handle = Handle::Exhausted;
                            return Err(CandlewickError::Open { path, source });
                        }
                    }
                }
                Handle::Open { reader, path } => {
                    self.line.clear();
                    match reader.read_line(&mut self.line) {
                        Ok(0) => {
                            debug!(path = %path.display(), "closed tick file");
                            self.handle = Handle::Closed;
                        }
                        Ok(_) => {
                            let line = self.line.strip_suffix('\n').unwrap_or(&self.line);
                            return Ok(Some(line.strip_suffix('\r').unwrap_or(line)));
                        }
                        Err(source) => {
                            let path = path.clone();
                            self.handle = Handle::Exhausted;
                            return Err(CandlewickError::Read { path, source });
                        }
                    }
                }
            }
        }
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> StreamState {
        match self.handle {
            Handle::Closed => StreamState::Closed,
            Handle::Open { .. } => StreamState::Open,
            Handle::Exhausted => StreamState::Exhausted,
        }
    }

    /// Returns the path of the file currently open, if any.
    #[must_use]
    pub fn current_file(&self) -> Option<&Path> {
        match &self.handle {
            Handle::Open { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Returns how many files have been opened (or attempted) so far.
    #[must_use]
    pub const fn files_opened(&self) -> usize {
        self.next_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_files(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, contents) in files {
            fs::write(dir.path().join(name), contents).unwrap();
        }
        dir
    }

    fn collect(stream: &mut MultiFileStream) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = stream.next_line().unwrap() {
            lines.push(line.to_string());
        }
        lines
    }

    #[test]
    fn test_reads_across_files() {
        let dir = write_files(&[("a.csv", "1\n2\n"), ("b.csv", "3\n"), ("c.csv", "4")]);
        let files = vec!["a.csv".into(), "b.csv".into(), "c.csv".into()];
        let mut stream = MultiFileStream::new(dir.path(), files);

        assert_eq!(stream.state(), StreamState::Closed);
        assert_eq!(collect(&mut stream), vec!["1", "2", "3", "4"]);
        assert_eq!(stream.state(), StreamState::Exhausted);
        assert_eq!(stream.files_opened(), 3);
        assert!(stream.next_line().unwrap().is_none());
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.csv"), b"1,1.0,1.0\n\xff\xfe,2.0,1.0\n").unwrap();
        let mut stream = MultiFileStream::new(dir.path(), vec!["a.csv".into()]);

        assert_eq!(stream.next_line().unwrap(), Some("1,1.0,1.0"));

        let err = stream.next_line().unwrap_err();
        assert!(matches!(
            err,
            CandlewickError::Read { ref path, ref source }
                if path.ends_with("a.csv") && source.kind() == std::io::ErrorKind::InvalidData
        ));
        assert_eq!(stream.state(), StreamState::Exhausted);
        assert!(stream.current_file().is_none());
    }

    #[test]
    fn test_skips_empty_files() {
        let dir = write_files(&[("a.csv", ""), ("b.csv", "x\n"), ("c.csv", "")]);
        let files = vec!["a.csv".into(), "b.csv".into(), "c.csv".into()];
        let mut stream = MultiFileStream::new(dir.path(), files);

        assert_eq!(collect(&mut stream), vec!["x"]);
    }

    #[test]
    fn test_strips_crlf() {
        let dir = write_files(&[("a.csv", "1,2,3\r\n\r\n")]);
        let mut stream = MultiFileStream::new(dir.path(), vec!["a.csv".into()]);

        assert_eq!(stream.next_line().unwrap(), Some("1,2,3"));
        assert_eq!(stream.next_line().unwrap(), Some(""));
        assert_eq!(stream.next_line().unwrap(), None);
    }

    #[test]
    fn test_one_handle_at_a_time() {
        let dir = write_files(&[("a.csv", "1\n"), ("b.csv", "2\n")]);
        let files = vec!["a.csv".into(), "b.csv".into()];
        let mut stream = MultiFileStream::new(dir.path(), files);

        assert_eq!(stream.next_line().unwrap(), Some("1"));
        assert_eq!(stream.current_file(), Some(dir.path().join("a.csv").as_path()));

        assert_eq!(stream.next_line().unwrap(), Some("2"));
        assert_eq!(stream.current_file(), Some(dir.path().join("b.csv").as_path()));
        assert_eq!(stream.state(), StreamState::Open);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = write_files(&[("a.csv", "1\n")]);
        let files = vec!["a.csv".into(), "missing.csv".into()];
        let mut stream = MultiFileStream::new(dir.path(), files);

        assert_eq!(stream.next_line().unwrap(), Some("1"));
        let err = stream.next_line().unwrap_err();
        assert!(matches!(err, CandlewickError::Open { ref path, .. } if path.ends_with("missing.csv")));
        assert_eq!(stream.state(), StreamState::Exhausted);
        assert!(stream.next_line().unwrap().is_none());
    }

    #[test]
    fn test_empty_file_list() {
        let mut stream = MultiFileStream::new("/nonexistent", Vec::new());
        assert!(stream.next_line().unwrap().is_none());
        assert_eq!(stream.files_opened(), 0);
    }
}
