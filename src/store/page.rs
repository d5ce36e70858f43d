//! Cursor pagination over id-ordered rows.
//!
//! Cursors are positional: they need not name a live row. `after` drops
//! everything up to and including the cursor, `before` drops the cursor
//! and everything past it. `first` then keeps the head of what is left,
//! `last` the tail.

use super::types::{PageRequest, User};

/// Apply a page request to rows already sorted by id.
pub fn paginate(rows: Vec<User>, page: &PageRequest) -> Vec<User> {
    let mut window: Vec<User> = rows
        .into_iter()
        .filter(|u| match &page.after {
            Some(cursor) => u.id.as_str() > cursor.as_str(),
            None => true,
        })
        .filter(|u| match &page.before {
            Some(cursor) => u.id.as_str() < cursor.as_str(),
            None => true,
        })
        .collect();

    if let Some(first) = page.first {
        window.truncate(first);
    }
    if let Some(last) = page.last {
        let skip = window.len().saturating_sub(last);
        window = window.split_off(skip);
    }
    window
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<User> {
        ["a", "b", "c", "d", "e"]
            .iter()
            .map(|id| User {
                id: id.to_string(),
                name: id.to_uppercase(),
            })
            .collect()
    }

    fn ids(users: &[User]) -> Vec<&str> {
        users.iter().map(|u| u.id.as_str()).collect()
    }

    #[test]
    fn test_no_arguments_returns_all() {
        let page = paginate(rows(), &PageRequest::default());
        assert_eq!(ids(&page), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_first_and_last() {
        let first = PageRequest {
            first: Some(2),
            ..Default::default()
        };
        assert_eq!(ids(&paginate(rows(), &first)), vec!["a", "b"]);

        let last = PageRequest {
            last: Some(2),
            ..Default::default()
        };
        assert_eq!(ids(&paginate(rows(), &last)), vec!["d", "e"]);

        let both = PageRequest {
            first: Some(3),
            last: Some(1),
            ..Default::default()
        };
        assert_eq!(ids(&paginate(rows(), &both)), vec!["c"]);
    }

    #[test]
    fn test_cursors_are_exclusive() {
        let after = PageRequest {
            after: Some("b".into()),
            ..Default::default()
        };
        assert_eq!(ids(&paginate(rows(), &after)), vec!["c", "d", "e"]);

        let before = PageRequest {
            before: Some("d".into()),
            ..Default::default()
        };
        assert_eq!(ids(&paginate(rows(), &before)), vec!["a", "b", "c"]);

        let window = PageRequest {
            after: Some("a".into()),
            before: Some("e".into()),
            first: Some(2),
            ..Default::default()
        };
        assert_eq!(ids(&paginate(rows(), &window)), vec!["b", "c"]);
    }

    #[test]
    fn test_cursor_need_not_exist() {
        let after = PageRequest {
            after: Some("bb".into()),
            ..Default::default()
        };
        assert_eq!(ids(&paginate(rows(), &after)), vec!["c", "d", "e"]);
    }

    #[test]
    fn test_oversized_and_zero_bounds() {
        let big = PageRequest {
            first: Some(100),
            last: Some(100),
            ..Default::default()
        };
        assert_eq!(paginate(rows(), &big).len(), 5);

        let zero = PageRequest {
            first: Some(0),
            ..Default::default()
        };
        assert!(paginate(rows(), &zero).is_empty());
    }
}
