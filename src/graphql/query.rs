//! GraphQL Query resolvers.
//!
//! Read operations over the User store.

use async_graphql::{Context, Object, Result};
use std::sync::Arc;

use super::blocking;
use super::error::ResolverResult;
use super::schema::{User, UserWhereUniqueInput};
use crate::error::UserGraphError;
use crate::store::{PageRequest, UserFilter, UserStore};

/// Root query type
pub struct Query;

#[Object]
impl Query {
    /// Every User
    async fn all_users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let store = ctx.data::<Arc<UserStore>>()?;
        let users = blocking(store, |s| s.find_many(&UserFilter::all()))
            .await
            .or_error()?;
        Ok(users.into_iter().map(User::from).collect())
    }

    /// A single User, or null when no User has that id
    async fn user(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "where")] filter: UserWhereUniqueInput,
    ) -> Result<Option<User>> {
        let store = ctx.data::<Arc<UserStore>>()?;
        let id = filter.id().or_error()?.to_string();
        let user = blocking(store, move |s| s.find_unique(&id)).await;
        Ok(user.or_null()?.map(User::from))
    }

    /// Users ordered by id, paged with cursors.
    ///
    /// `after` skips up to and including its id, `before` drops its id
    /// and everything past it. `first`/`last` bound the result size.
    async fn users(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        last: Option<i32>,
        before: Option<UserWhereUniqueInput>,
        after: Option<UserWhereUniqueInput>,
    ) -> Result<Vec<User>> {
        let store = ctx.data::<Arc<UserStore>>()?;
        let request = PageRequest {
            first: bound("first", first).or_error()?,
            last: bound("last", last).or_error()?,
            before: cursor(before).or_error()?,
            after: cursor(after).or_error()?,
        };
        let users = blocking(store, move |s| s.page(&request)).await.or_error()?;
        Ok(users.into_iter().map(User::from).collect())
    }
}

fn bound(arg: &str, value: Option<i32>) -> Result<Option<usize>, UserGraphError> {
    value
        .map(|n| {
            usize::try_from(n).map_err(|_| {
                UserGraphError::Validation(format!("`{}` must be non-negative, got {}", arg, n))
            })
        })
        .transpose()
}

fn cursor(input: Option<UserWhereUniqueInput>) -> Result<Option<String>, UserGraphError> {
    input.map(|w| w.id().map(str::to_string)).transpose()
}
