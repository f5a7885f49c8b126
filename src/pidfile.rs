/// Single-instance guard for poll mode.
///
/// A plain pid marker file: creation fails when the file already exists,
/// which is how a second daemon instance against the same database is
/// refused. The marker is removed on drop, so a controlled shutdown always
/// cleans up. A marker left behind by a crashed instance must be removed by
/// the operator, matching the conservative behavior of most pid-file tools.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    /// Writes the current pid to `path`. Fails with `AlreadyExists` when the
    /// marker is present.
    pub fn create(path: PathBuf) -> io::Result<Self> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        write!(file, "{}", std::process::id())?;
        debug!(path = %path.display(), "pid file created");
        Ok(Self { path })
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "failed to remove pid file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_marker(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("vivamon_pid_test_{}_{}", tag, std::process::id()))
    }

    #[test]
    fn test_create_writes_pid_and_drop_removes_it() {
        let path = temp_marker("roundtrip");
        let pidfile = PidFile::create(path.clone()).expect("create should succeed");

        let contents = fs::read_to_string(&path).expect("marker should exist");
        assert_eq!(contents, std::process::id().to_string());

        drop(pidfile);
        assert!(!path.exists(), "marker should be removed on drop");
    }

    #[test]
    fn test_second_instance_is_refused() {
        let path = temp_marker("exclusive");
        let _first = PidFile::create(path.clone()).expect("first create");

        let second = PidFile::create(path);
        assert!(second.is_err(), "existing marker must refuse a second instance");
        assert_eq!(
            second.err().map(|e| e.kind()),
            Some(io::ErrorKind::AlreadyExists)
        );
    }
}
