//! Entity store: the canonical set of User records.
//!
//! All records live behind one `RwLock`, so every operation, including
//! bulk updates and deletes, is atomic with respect to every other. When
//! a snapshot path is set, each mutation that changed rows is written to
//! disk before the write lock is released, and only a saved change
//! becomes visible.

pub mod filter;
pub mod page;
pub mod persistence;
pub mod types;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, UserGraphError};

pub use filter::{QueryMode, StringFilter, UserFilter};
pub use types::{PageRequest, User, UserCreate, UserUpdate};

type UserMap = BTreeMap<String, User>;

/// Shared, injectable User store.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<UserMap>,
    snapshot: Option<PathBuf>,
}

impl UserStore {
    /// Empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store backed by a snapshot file. Loads it if present.
    pub fn open(path: &Path) -> Result<Self> {
        let users = if path.exists() {
            persistence::load(path)?
        } else {
            info!(path = %path.display(), "no snapshot yet, starting empty");
            UserMap::new()
        };
        Ok(Self {
            users: RwLock::new(users),
            snapshot: Some(path.to_path_buf()),
        })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot.as_deref()
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    // ─── Reads ─────────────────────────────────────────────────

    /// Users matching `filter`, in id order.
    pub fn find_many(&self, filter: &UserFilter) -> Result<Vec<User>> {
        let users = self.read()?;
        Ok(users.values().filter(|u| filter.matches(u)).cloned().collect())
    }

    pub fn find_unique(&self, id: &str) -> Result<User> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| UserGraphError::NotFound(id.to_string()))
    }

    /// One page of all users, ordered by id.
    pub fn page(&self, request: &PageRequest) -> Result<Vec<User>> {
        let rows: Vec<User> = self.read()?.values().cloned().collect();
        Ok(page::paginate(rows, request))
    }

    // ─── Writes ────────────────────────────────────────────────

    pub fn create(&self, data: UserCreate) -> Result<User> {
        self.mutate(|users| {
            let id = match data.id {
                Some(id) => {
                    if users.contains_key(&id) {
                        return Err(UserGraphError::Conflict(id));
                    }
                    id
                }
                None => fresh_id(users),
            };

            let user = User {
                id: id.clone(),
                name: data.name,
            };
            users.insert(id, user.clone());
            debug!(id = %user.id, "user created");
            Ok((user, true))
        })
    }

    pub fn update_one(&self, id: &str, data: &UserUpdate) -> Result<User> {
        self.mutate(|users| {
            let user = users
                .get_mut(id)
                .ok_or_else(|| UserGraphError::NotFound(id.to_string()))?;

            let changed = data.apply(user);
            if changed {
                debug!(id = %id, "user updated");
            }
            Ok((user.clone(), changed))
        })
    }

    /// Apply `data` to every match. Returns the number of matching rows.
    pub fn update_many(&self, filter: &UserFilter, data: &UserUpdate) -> Result<usize> {
        self.mutate(|users| {
            let mut count = 0;
            let mut changed = false;
            for user in users.values_mut().filter(|u| filter.matches(u)) {
                changed |= data.apply(user);
                count += 1;
            }
            debug!(count, changed, "users updated");
            Ok((count, changed))
        })
    }

    pub fn delete_one(&self, id: &str) -> Result<User> {
        self.mutate(|users| {
            let user = users
                .remove(id)
                .ok_or_else(|| UserGraphError::NotFound(id.to_string()))?;
            debug!(id = %id, "user deleted");
            Ok((user, true))
        })
    }

    /// Remove every match. Returns the number removed.
    pub fn delete_many(&self, filter: &UserFilter) -> Result<usize> {
        self.mutate(|users| {
            let before = users.len();
            users.retain(|_, u| !filter.matches(u));
            let count = before - users.len();
            debug!(count, "users deleted");
            Ok((count, count > 0))
        })
    }

    // ─── Internals ─────────────────────────────────────────────

    fn read(&self) -> Result<RwLockReadGuard<'_, UserMap>> {
        self.users
            .read()
            .map_err(|e| UserGraphError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, UserMap>> {
        self.users
            .write()
            .map_err(|e| UserGraphError::LockPoisoned(e.to_string()))
    }

    /// Run one mutation under the write lock.
    ///
    /// `op` returns its result and whether it changed any row. With a
    /// snapshot configured, `op` works on a copy that replaces the live
    /// set only once the snapshot is saved, so a failed save leaves the
    /// store untouched. Snapshots land in mutation order.
    fn mutate<T>(&self, op: impl FnOnce(&mut UserMap) -> Result<(T, bool)>) -> Result<T> {
        let mut users = self.write()?;
        match &self.snapshot {
            None => op(&mut *users).map(|(result, _)| result),
            Some(path) => {
                let mut working = (*users).clone();
                let (result, changed) = op(&mut working)?;
                if changed {
                    persistence::save(path, &working)?;
                    *users = working;
                }
                Ok(result)
            }
        }
    }
}

/// Random id not already in use.
fn fresh_id(users: &UserMap) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !users.contains_key(&id) {
            return id;
        }
    }
}
