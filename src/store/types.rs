//! Store record and payload types.
//!
//! Kept free of GraphQL concerns; the schema layer converts into these.

use serde::{Deserialize, Serialize};

/// A stored User.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

/// Data for a new User. `id` is generated when absent.
#[derive(Debug, Clone, Default)]
pub struct UserCreate {
    pub id: Option<String>,
    pub name: String,
}

impl UserCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
        }
    }
}

/// Field changes for update operations. `None` leaves the field as is.
///
/// `id` is immutable and deliberately absent.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
}

impl UserUpdate {
    pub fn set_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Apply to a record. Returns whether the record changed.
    pub(crate) fn apply(&self, user: &mut User) -> bool {
        match &self.name {
            Some(name) if *name != user.name => {
                user.name = name.clone();
                true
            }
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

/// Cursor pagination arguments, keyed by id ordering.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub first: Option<usize>,
    pub last: Option<usize>,
    /// Exclude this id and everything after it
    pub before: Option<String>,
    /// Exclude this id and everything before it
    pub after: Option<String>,
}
