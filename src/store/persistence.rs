//! Snapshot persistence: save and load the User set to/from disk.
//!
//! Uses bincode for compact binary serialization. Atomic writes
//! (write to .tmp, then rename) prevent corruption from crashes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use super::types::User;
use crate::error::{Result, UserGraphError};

/// Bumped whenever the on-disk layout changes.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    saved_at: DateTime<Utc>,
    users: Vec<User>,
}

/// Write all users to `path`.
pub fn save(path: &Path, users: &BTreeMap<String, User>) -> Result<()> {
    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        saved_at: Utc::now(),
        users: users.values().cloned().collect(),
    };
    let bytes =
        bincode::serialize(&snapshot).map_err(|e| UserGraphError::SerializeError(e.to_string()))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(&bytes)?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;

    info!(path = %path.display(), users = snapshot.users.len(), bytes = bytes.len(), "snapshot saved");
    Ok(())
}

/// Read a snapshot, keyed by id.
pub fn load(path: &Path) -> Result<BTreeMap<String, User>> {
    info!(path = %path.display(), "loading snapshot");

    let bytes = fs::read(path)?;
    let snapshot: Snapshot = bincode::deserialize(&bytes)
        .map_err(|e| UserGraphError::ParseError(format!("bincode: {}", e)))?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(UserGraphError::ParseError(format!(
            "unsupported snapshot version {} (expected {})",
            snapshot.version, SNAPSHOT_VERSION
        )));
    }

    let mut users = BTreeMap::new();
    for user in snapshot.users {
        if users.contains_key(&user.id) {
            return Err(UserGraphError::ParseError(format!(
                "duplicate id {:?} in snapshot",
                user.id
            )));
        }
        users.insert(user.id.clone(), user);
    }

    debug!(users = users.len(), saved_at = %snapshot.saved_at, "snapshot loaded");
    Ok(users)
}
