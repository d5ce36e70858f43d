//! # usergraph
//!
//! A GraphQL CRUD service for `User` records.
//!
//! usergraph keeps an in-memory, optionally snapshot-backed store of Users
//! and exposes it through a fixed set of GraphQL queries and mutations over
//! HTTP.
//!
//! ## Key Features
//!
//! - **Filterable**: `AND`/`OR`/`NOT` composition with per-field string predicates
//! - **Atomic**: bulk updates and deletes are one consistent change
//! - **Durable**: optional bincode snapshot rewritten on every mutation
//! - **Paged**: cursor pagination ordered by id
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use usergraph::{build_schema, execute, config::GraphQLConfig, UserStore};
//!
//! # async fn demo() {
//! let store = Arc::new(UserStore::new());
//! let schema = build_schema(store, &GraphQLConfig::default());
//!
//! let json = execute(&schema, r#"mutation { createOneUser(data: { name: "Alice" }) { id } }"#).await;
//! # }
//! ```

pub mod config;
pub mod error;
pub mod graphql;
pub mod server;
pub mod store;

// Re-exports for convenience
pub use error::{Result, UserGraphError};

pub use graphql::{build_schema, execute, verify_operations, UserGraphSchema, ROOT_OPERATIONS};
pub use server::prepare;
pub use store::{
    PageRequest, QueryMode, StringFilter, User, UserCreate, UserFilter, UserStore, UserUpdate,
};
