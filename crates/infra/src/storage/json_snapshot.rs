//! JSON file implementation of the snapshot port
//!
//! Saves go to a sibling temp file that is renamed over the target, so a
//! crash mid-write leaves the previous plan intact.

use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use resplan_core::{PlanSnapshot, SnapshotStore};
use resplan_domain::{ResplanError, Result as DomainResult};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::InfraError;

/// Plan snapshot stored as one pretty-printed JSON document
#[derive(Debug)]
pub struct JsonSnapshotStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> DomainResult<Option<PlanSnapshot>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot saved yet");
                return Ok(None);
            }
            Err(err) => return Err(InfraError::from(err).into()),
        };

        let snapshot: PlanSnapshot =
            serde_json::from_str(&raw).map_err(|err| ResplanError::from(InfraError::from(err)))?;
        info!(
            path = %self.path.display(),
            projects = snapshot.projects.len(),
            members = snapshot.members.len(),
            allocations = snapshot.allocations.len(),
            "loaded plan snapshot"
        );
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &PlanSnapshot) -> DomainResult<()> {
        let _guard = self.write_lock.lock();

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(InfraError::from)?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(InfraError::from)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, snapshot).map_err(InfraError::from)?;
            writer.flush().map_err(InfraError::from)?;
        }
        tmp.as_file().sync_all().map_err(InfraError::from)?;
        tmp.persist(&self.path).map_err(|err| InfraError::from(err.error))?;

        info!(
            path = %self.path.display(),
            projects = snapshot.projects.len(),
            allocations = snapshot.allocations.len(),
            "saved plan snapshot"
        );
        Ok(())
    }
}
