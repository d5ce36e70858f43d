//! GraphQL Mutation resolvers.

use async_graphql::{Context, Object, Result};
use std::sync::Arc;
use tracing::info;

use super::blocking;
use super::error::ResolverResult;
use super::schema::{
    BatchPayload, User, UserCreateInput, UserUpdateInput, UserUpdateManyMutationInput,
    UserWhereInput, UserWhereUniqueInput,
};
use crate::store::{UserFilter, UserStore, UserUpdate};

/// Root mutation type
pub struct Mutation;

#[Object]
impl Mutation {
    /// Delete every User
    async fn big_red_button(&self, ctx: &Context<'_>) -> Result<String> {
        let store = ctx.data::<Arc<UserStore>>()?;
        let count = blocking(store, |s| s.delete_many(&UserFilter::all()))
            .await
            .or_error()?;
        info!(count, "big red button pressed");
        Ok(destroyed_message(count))
    }

    async fn create_one_user(&self, ctx: &Context<'_>, data: UserCreateInput) -> Result<User> {
        let store = ctx.data::<Arc<UserStore>>()?;
        let user = blocking(store, move |s| s.create(data.into())).await;
        Ok(user.or_error()?.into())
    }

    /// Returns null when no User has that id
    async fn delete_one_user(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "where")] filter: UserWhereUniqueInput,
    ) -> Result<Option<User>> {
        let store = ctx.data::<Arc<UserStore>>()?;
        let id = filter.id().or_error()?.to_string();
        let user = blocking(store, move |s| s.delete_one(&id)).await;
        Ok(user.or_null()?.map(User::from))
    }

    async fn delete_many_user(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "where")] filter: Option<UserWhereInput>,
    ) -> Result<BatchPayload> {
        let store = ctx.data::<Arc<UserStore>>()?;
        let filter: UserFilter = filter.map(Into::into).unwrap_or_default();
        let count = blocking(store, move |s| s.delete_many(&filter))
            .await
            .or_error()?;
        Ok(BatchPayload::new(count))
    }

    /// Returns null when no User has that id
    async fn update_one_user(
        &self,
        ctx: &Context<'_>,
        data: UserUpdateInput,
        #[graphql(name = "where")] filter: UserWhereUniqueInput,
    ) -> Result<Option<User>> {
        let store = ctx.data::<Arc<UserStore>>()?;
        let id = filter.id().or_error()?.to_string();
        let data: UserUpdate = data.into();
        let user = blocking(store, move |s| s.update_one(&id, &data)).await;
        Ok(user.or_null()?.map(User::from))
    }

    async fn update_many_user(
        &self,
        ctx: &Context<'_>,
        data: UserUpdateManyMutationInput,
        #[graphql(name = "where")] filter: Option<UserWhereInput>,
    ) -> Result<BatchPayload> {
        let store = ctx.data::<Arc<UserStore>>()?;
        let filter: UserFilter = filter.map(Into::into).unwrap_or_default();
        let data: UserUpdate = data.into();
        let count = blocking(store, move |s| s.update_many(&filter, &data))
            .await
            .or_error()?;
        Ok(BatchPayload::new(count))
    }
}

pub(crate) fn destroyed_message(count: usize) -> String {
    format!("{} user(s) destroyed. Thanos will be proud.", count)
}
