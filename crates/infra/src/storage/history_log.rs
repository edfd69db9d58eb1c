//! Append-only JSON Lines history log

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use resplan_core::HistoryRecorder;
use resplan_domain::{HistoryEntry, HistoryFilter, ResplanError, Result as DomainResult};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// History recorder writing one JSON object per line
///
/// Lines that fail to parse are skipped with a warning when reading so a
/// torn final write does not hide the rest of the log. The next append
/// starts on a fresh line after such a tail.
#[derive(Debug)]
pub struct JsonlHistoryLog {
    path: PathBuf,
    append_lock: Mutex<()>,
}

impl JsonlHistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), append_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_for_append(&self) -> DomainResult<File> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(InfraError::from)?;
        }
        OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| InfraError::from(err).into())
    }
}

impl HistoryRecorder for JsonlHistoryLog {
    fn record(&self, entry: HistoryEntry) -> DomainResult<()> {
        let mut line =
            serde_json::to_string(&entry).map_err(|err| ResplanError::from(InfraError::from(err)))?;
        line.push('\n');

        let _guard = self.append_lock.lock();
        let mut file = self.open_for_append()?;
        if !ends_with_newline(&mut file).map_err(InfraError::from)? {
            warn!(path = %self.path.display(), "history log ends mid-line; starting a new line");
            line.insert(0, '\n');
        }
        file.write_all(line.as_bytes()).map_err(InfraError::from)?;

        debug!(
            record_id = %entry.record_id,
            collection = %entry.collection,
            action = %entry.action,
            "appended history entry"
        );
        Ok(())
    }

    fn entries(&self, filter: &HistoryFilter) -> DomainResult<Vec<HistoryEntry>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(InfraError::from(err).into()),
        };

        let mut found = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(InfraError::from)?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<HistoryEntry>(&line) {
                Ok(entry) if filter.matches(&entry) => found.push(entry),
                Ok(_) => {}
                Err(err) => {
                    warn!(line = index + 1, error = %err, "skipping unreadable history line");
                }
            }
        }
        Ok(found)
    }
}

/// `true` for an empty file or one whose last byte is a newline.
fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
