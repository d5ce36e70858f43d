//! Composable User filters.
//!
//! A `UserFilter` ANDs together its field predicates and its logical
//! sub-filters. String predicates compare lexicographically; with
//! `QueryMode::Insensitive` both sides are lowercased first.

use std::borrow::Cow;

use super::types::User;

/// Case sensitivity for string predicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryMode {
    #[default]
    Default,
    Insensitive,
}

/// Predicates over one string field. All set predicates must hold.
#[derive(Debug, Clone, Default)]
pub struct StringFilter {
    pub equals: Option<String>,
    pub in_list: Option<Vec<String>>,
    pub not_in: Option<Vec<String>>,
    pub lt: Option<String>,
    pub lte: Option<String>,
    pub gt: Option<String>,
    pub gte: Option<String>,
    pub contains: Option<String>,
    pub starts_with: Option<String>,
    pub ends_with: Option<String>,
    /// `None` inherits the enclosing mode (for nested `not`) or `Default`.
    pub mode: Option<QueryMode>,
    /// Negated nested predicate
    pub not: Option<Box<StringFilter>>,
}

impl StringFilter {
    pub fn equals(value: impl Into<String>) -> Self {
        Self {
            equals: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn contains(value: impl Into<String>) -> Self {
        Self {
            contains: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn insensitive(mut self) -> Self {
        self.mode = Some(QueryMode::Insensitive);
        self
    }

    pub fn matches(&self, value: &str) -> bool {
        self.matches_in(value, QueryMode::Default)
    }

    fn matches_in(&self, value: &str, inherited: QueryMode) -> bool {
        let mode = self.mode.unwrap_or(inherited);
        let fold = |s: &str| -> String {
            match mode {
                QueryMode::Default => s.to_string(),
                QueryMode::Insensitive => s.to_lowercase(),
            }
        };
        let raw = value;
        let folded: Cow<'_, str> = match mode {
            QueryMode::Default => Cow::Borrowed(raw),
            QueryMode::Insensitive => Cow::Owned(raw.to_lowercase()),
        };
        let value = folded.as_ref();

        if let Some(eq) = &self.equals {
            if value != fold(eq) {
                return false;
            }
        }
        if let Some(list) = &self.in_list {
            if !list.iter().any(|v| fold(v) == value) {
                return false;
            }
        }
        if let Some(list) = &self.not_in {
            if list.iter().any(|v| fold(v) == value) {
                return false;
            }
        }
        if let Some(bound) = &self.lt {
            if value >= fold(bound).as_str() {
                return false;
            }
        }
        if let Some(bound) = &self.lte {
            if value > fold(bound).as_str() {
                return false;
            }
        }
        if let Some(bound) = &self.gt {
            if value <= fold(bound).as_str() {
                return false;
            }
        }
        if let Some(bound) = &self.gte {
            if value < fold(bound).as_str() {
                return false;
            }
        }
        if let Some(needle) = &self.contains {
            if !value.contains(fold(needle).as_str()) {
                return false;
            }
        }
        if let Some(prefix) = &self.starts_with {
            if !value.starts_with(fold(prefix).as_str()) {
                return false;
            }
        }
        if let Some(suffix) = &self.ends_with {
            if !value.ends_with(fold(suffix).as_str()) {
                return false;
            }
        }
        if let Some(not) = &self.not {
            // nested filter folds by its own mode
            if not.matches_in(raw, mode) {
                return false;
            }
        }
        true
    }
}

/// Filter over User rows. The empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Every sub-filter must match. Empty matches all.
    pub and: Vec<UserFilter>,
    /// At least one sub-filter must match. `Some(vec![])` matches nothing.
    pub or: Option<Vec<UserFilter>>,
    /// No sub-filter may match.
    pub not: Vec<UserFilter>,
    pub id: Option<StringFilter>,
    pub name: Option<StringFilter>,
}

impl UserFilter {
    /// Filter that matches every row.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(filter: StringFilter) -> Self {
        Self {
            id: Some(filter),
            ..Self::default()
        }
    }

    pub fn by_name(filter: StringFilter) -> Self {
        Self {
            name: Some(filter),
            ..Self::default()
        }
    }

    pub fn matches(&self, user: &User) -> bool {
        if let Some(f) = &self.id {
            if !f.matches(&user.id) {
                return false;
            }
        }
        if let Some(f) = &self.name {
            if !f.matches(&user.name) {
                return false;
            }
        }
        if !self.and.iter().all(|f| f.matches(user)) {
            return false;
        }
        if let Some(any) = &self.or {
            if !any.iter().any(|f| f.matches(user)) {
                return false;
            }
        }
        !self.not.iter().any(|f| f.matches(user))
    }
}
