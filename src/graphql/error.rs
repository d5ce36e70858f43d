//! Mapping store errors onto GraphQL errors.

use async_graphql::{Error, ErrorExtensions};

use crate::error::UserGraphError;

impl ErrorExtensions for UserGraphError {
    fn extend(&self) -> Error {
        Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

/// Resolver-side conversions for store results.
pub trait ResolverResult<T> {
    /// Every error becomes a request-level error.
    fn or_error(self) -> async_graphql::Result<T>;

    /// `NotFound` becomes `null`; other errors stay errors.
    fn or_null(self) -> async_graphql::Result<Option<T>>;
}

impl<T> ResolverResult<T> for Result<T, UserGraphError> {
    fn or_error(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.extend())
    }

    fn or_null(self) -> async_graphql::Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(UserGraphError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.extend()),
        }
    }
}
