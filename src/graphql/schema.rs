//! GraphQL schema types.
//!
//! Object and input shapes exposed on the wire, plus conversions into
//! the store's own filter and payload types.

use async_graphql::{Enum, InputObject, SimpleObject, ID};

use crate::error::UserGraphError;
use crate::store;

/// A User record
#[derive(SimpleObject, Debug, Clone)]
pub struct User {
    pub id: ID,
    pub name: String,
}

impl From<store::User> for User {
    fn from(user: store::User) -> Self {
        Self {
            id: ID(user.id),
            name: user.name,
        }
    }
}

/// Rows affected by a bulk mutation
#[derive(SimpleObject, Debug, Clone)]
pub struct BatchPayload {
    pub count: i32,
}

impl BatchPayload {
    pub fn new(count: usize) -> Self {
        Self {
            count: i32::try_from(count).unwrap_or(i32::MAX),
        }
    }
}

/// Selects a single User by id
#[derive(InputObject, Debug, Clone, Default)]
pub struct UserWhereUniqueInput {
    pub id: Option<ID>,
}

impl UserWhereUniqueInput {
    /// The id this input names. An input without one is rejected.
    pub fn id(&self) -> Result<&str, UserGraphError> {
        self.id
            .as_ref()
            .map(|id| id.as_str())
            .ok_or_else(|| UserGraphError::Validation("UserWhereUniqueInput requires an id".into()))
    }
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(rename_items = "lowercase")]
pub enum QueryMode {
    Default,
    Insensitive,
}

impl From<QueryMode> for store::QueryMode {
    fn from(mode: QueryMode) -> Self {
        match mode {
            QueryMode::Default => store::QueryMode::Default,
            QueryMode::Insensitive => store::QueryMode::Insensitive,
        }
    }
}

/// Predicates on a string field, ANDed together
#[derive(InputObject, Debug, Clone, Default)]
pub struct StringFilter {
    pub equals: Option<String>,
    #[graphql(name = "in")]
    pub in_list: Option<Vec<String>>,
    pub not_in: Option<Vec<String>>,
    pub lt: Option<String>,
    pub lte: Option<String>,
    pub gt: Option<String>,
    pub gte: Option<String>,
    pub contains: Option<String>,
    pub starts_with: Option<String>,
    pub ends_with: Option<String>,
    pub mode: Option<QueryMode>,
    pub not: Option<Box<StringFilter>>,
}

impl From<StringFilter> for store::StringFilter {
    fn from(f: StringFilter) -> Self {
        Self {
            equals: f.equals,
            in_list: f.in_list,
            not_in: f.not_in,
            lt: f.lt,
            lte: f.lte,
            gt: f.gt,
            gte: f.gte,
            contains: f.contains,
            starts_with: f.starts_with,
            ends_with: f.ends_with,
            mode: f.mode.map(Into::into),
            not: f.not.map(|inner| Box::new((*inner).into())),
        }
    }
}

/// Composable filter over Users
#[derive(InputObject, Debug, Clone, Default)]
pub struct UserWhereInput {
    #[graphql(name = "AND")]
    pub and: Option<Vec<UserWhereInput>>,
    #[graphql(name = "OR")]
    pub or: Option<Vec<UserWhereInput>>,
    #[graphql(name = "NOT")]
    pub not: Option<Vec<UserWhereInput>>,
    pub id: Option<StringFilter>,
    pub name: Option<StringFilter>,
}

impl From<UserWhereInput> for store::UserFilter {
    fn from(w: UserWhereInput) -> Self {
        let convert = |list: Vec<UserWhereInput>| -> Vec<store::UserFilter> {
            list.into_iter().map(Into::into).collect()
        };
        Self {
            and: w.and.map(convert).unwrap_or_default(),
            or: w.or.map(convert),
            not: w.not.map(convert).unwrap_or_default(),
            id: w.id.map(Into::into),
            name: w.name.map(Into::into),
        }
    }
}

#[derive(InputObject, Debug, Clone)]
pub struct UserCreateInput {
    /// Generated when omitted
    pub id: Option<String>,
    pub name: String,
}

impl From<UserCreateInput> for store::UserCreate {
    fn from(input: UserCreateInput) -> Self {
        Self {
            id: input.id,
            name: input.name,
        }
    }
}

#[derive(InputObject, Debug, Clone, Default)]
pub struct StringFieldUpdateOperationsInput {
    pub set: Option<String>,
}

#[derive(InputObject, Debug, Clone, Default)]
pub struct UserUpdateInput {
    pub name: Option<StringFieldUpdateOperationsInput>,
}

#[derive(InputObject, Debug, Clone, Default)]
pub struct UserUpdateManyMutationInput {
    pub name: Option<StringFieldUpdateOperationsInput>,
}

fn name_update(name: Option<StringFieldUpdateOperationsInput>) -> store::UserUpdate {
    store::UserUpdate {
        name: name.and_then(|op| op.set),
    }
}

impl From<UserUpdateInput> for store::UserUpdate {
    fn from(input: UserUpdateInput) -> Self {
        name_update(input.name)
    }
}

impl From<UserUpdateManyMutationInput> for store::UserUpdate {
    fn from(input: UserUpdateManyMutationInput) -> Self {
        name_update(input.name)
    }
}
