//! GraphQL API for usergraph.
//!
//! CRUD over the User store, shaped after the classic generated-CRUD
//! surface:
//!
//! ```graphql
//! { allUsers { id name } }
//! { user(where: { id: "1" }) { id name } }
//! mutation { createOneUser(data: { name: "Alice" }) { id } }
//! mutation { updateManyUser(data: { name: { set: "x" } }, where: { name: { contains: "b", mode: insensitive } }) { count } }
//! ```

pub mod error;
pub mod mutation;
pub mod query;
pub mod schema;

use async_graphql::{EmptySubscription, Schema};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

use crate::config::GraphQLConfig;
use crate::error::{Result, UserGraphError};
use crate::store::UserStore;
use mutation::Mutation;
use query::Query;

/// The usergraph GraphQL schema type
pub type UserGraphSchema = Schema<Query, Mutation, EmptySubscription>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// Every root field the schema must expose, and nothing else.
pub const ROOT_OPERATIONS: &[(&str, OperationKind)] = &[
    ("allUsers", OperationKind::Query),
    ("user", OperationKind::Query),
    ("users", OperationKind::Query),
    ("bigRedButton", OperationKind::Mutation),
    ("createOneUser", OperationKind::Mutation),
    ("deleteOneUser", OperationKind::Mutation),
    ("deleteManyUser", OperationKind::Mutation),
    ("updateOneUser", OperationKind::Mutation),
    ("updateManyUser", OperationKind::Mutation),
];

const ROOT_FIELDS_QUERY: &str =
    "{ __schema { queryType { fields { name } } mutationType { fields { name } } } }";

/// Build the GraphQL schema with the store as context
pub fn build_schema(store: Arc<UserStore>, config: &GraphQLConfig) -> UserGraphSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(store)
        .limit_depth(config.depth_limit)
        .limit_complexity(config.complexity_limit)
        .finish()
}

/// Execute a GraphQL request and return the JSON response envelope
pub async fn execute(schema: &UserGraphSchema, request: impl Into<async_graphql::Request>) -> String {
    let result = schema.execute(request).await;
    serde_json::to_string_pretty(&result).unwrap_or_else(|_| "{}".to_string())
}

/// Run a store call on the blocking pool.
///
/// Store methods take a std lock and, with a snapshot configured, write the
/// file while holding it. Resolvers must not do either on a runtime worker.
pub(crate) async fn blocking<T, F>(store: &Arc<UserStore>, op: F) -> Result<T>
where
    F: FnOnce(&UserStore) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(store);
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| UserGraphError::TaskFailed(e.to_string()))?
}

/// Check the schema's root fields against `ROOT_OPERATIONS`.
///
/// Introspects a schema built from the same root types without depth or
/// complexity limits, so any configured limits are accepted.
pub async fn verify_operations() -> Result<()> {
    let schema = Schema::build(Query, Mutation, EmptySubscription).finish();
    let response = schema.execute(ROOT_FIELDS_QUERY).await;
    if let Some(err) = response.errors.first() {
        return Err(UserGraphError::ConfigError(format!(
            "schema introspection failed: {}",
            err.message
        )));
    }
    let data = response
        .data
        .into_json()
        .map_err(|e| UserGraphError::SerializeError(e.to_string()))?;

    for (kind, key) in [
        (OperationKind::Query, "queryType"),
        (OperationKind::Mutation, "mutationType"),
    ] {
        let actual = field_names(&data, key);
        let expected: BTreeSet<String> = ROOT_OPERATIONS
            .iter()
            .filter(|(_, k)| *k == kind)
            .map(|(name, _)| name.to_string())
            .collect();

        if let Some(missing) = expected.difference(&actual).next() {
            return Err(UserGraphError::ConfigError(format!(
                "{:?} operation `{}` is not exposed by the schema",
                kind, missing
            )));
        }
        if let Some(extra) = actual.difference(&expected).next() {
            return Err(UserGraphError::ConfigError(format!(
                "{:?} operation `{}` is exposed but not registered",
                kind, extra
            )));
        }
    }

    debug!(operations = ROOT_OPERATIONS.len(), "root operations verified");
    Ok(())
}

fn field_names(data: &Value, root: &str) -> BTreeSet<String> {
    data["__schema"][root]["fields"]
        .as_array()
        .map(|fields| {
            fields
                .iter()
                .filter_map(|f| f["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{UserCreate, UserStore};
    use async_graphql::{Request, Variables};
    use serde_json::json;

    fn schema_with(store: Arc<UserStore>) -> UserGraphSchema {
        build_schema(store, &GraphQLConfig::default())
    }

    async fn run(schema: &UserGraphSchema, query: &str, variables: Value) -> Value {
        let request = Request::new(query).variables(Variables::from_json(variables));
        let response = schema.execute(request).await;
        serde_json::to_value(&response).unwrap()
    }

    fn seeded() -> Arc<UserStore> {
        let store = Arc::new(UserStore::new());
        store.create(UserCreate::with_id("1", "Alice")).unwrap();
        store.create(UserCreate::with_id("2", "bob")).unwrap();
        store
    }

    #[tokio::test]
    async fn test_verify_operations() {
        verify_operations().await.unwrap();
    }

    #[tokio::test]
    async fn test_blocking_returns_store_result() {
        let store = seeded();
        let user = blocking(&store, |s| s.find_unique("1")).await.unwrap();
        assert_eq!(user.name, "Alice");

        let err = blocking(&store, |s| s.find_unique("9")).await.unwrap_err();
        assert!(matches!(err, UserGraphError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_blocking_panic_is_internal() {
        let store = seeded();
        let err = blocking(&store, |_| -> Result<()> { panic!("boom") })
            .await
            .unwrap_err();
        assert!(matches!(err, UserGraphError::TaskFailed(_)));
        assert_eq!(err.code(), "INTERNAL");
        assert_eq!(store.len().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_all_users() {
        let schema = schema_with(seeded());
        let result = execute(&schema, "{ allUsers { id name } }").await;
        assert!(result.contains("Alice"));
        assert!(result.contains("bob"));
        assert!(!result.contains("errors"));
    }

    #[tokio::test]
    async fn test_create_then_lookup_then_delete() {
        let schema = schema_with(Arc::new(UserStore::new()));

        let created = run(
            &schema,
            "mutation($name: String!) { createOneUser(data: { name: $name }) { id name } }",
            json!({ "name": "Alice" }),
        )
        .await;
        let id = created["data"]["createOneUser"]["id"].as_str().unwrap().to_string();
        assert_eq!(created["data"]["createOneUser"]["name"], "Alice");

        let found = run(
            &schema,
            "query($id: ID!) { user(where: { id: $id }) { id name } }",
            json!({ "id": id }),
        )
        .await;
        assert_eq!(found["data"]["user"]["id"], id.as_str());
        assert_eq!(found["data"]["user"]["name"], "Alice");

        let deleted = run(
            &schema,
            "mutation($id: ID!) { deleteOneUser(where: { id: $id }) { id } }",
            json!({ "id": id }),
        )
        .await;
        assert_eq!(deleted["data"]["deleteOneUser"]["id"], id.as_str());

        let gone = run(
            &schema,
            "query($id: ID!) { user(where: { id: $id }) { id name } }",
            json!({ "id": id }),
        )
        .await;
        assert!(gone["data"]["user"].is_null());
        assert!(gone.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_create_is_error() {
        let schema = schema_with(seeded());
        let result = run(
            &schema,
            r#"mutation { createOneUser(data: { id: "1", name: "Mallory" }) { id } }"#,
            json!({}),
        )
        .await;
        assert!(result["data"].is_null());
        assert_eq!(result["errors"][0]["extensions"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_missing_rows_are_null() {
        let schema = schema_with(seeded());
        let result = run(
            &schema,
            r#"mutation {
                deleteOneUser(where: { id: "9" }) { id }
                updateOneUser(data: { name: { set: "x" } }, where: { id: "9" }) { id }
            }"#,
            json!({}),
        )
        .await;
        assert!(result["data"]["deleteOneUser"].is_null());
        assert!(result["data"]["updateOneUser"].is_null());
        assert!(result.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_where_unique_without_id_is_validation_error() {
        let schema = schema_with(seeded());
        let result = run(&schema, "{ user(where: {}) { id } }", json!({})).await;
        assert_eq!(result["errors"][0]["extensions"]["code"], "VALIDATION");
    }

    #[tokio::test]
    async fn test_update_one() {
        let schema = schema_with(seeded());
        let result = run(
            &schema,
            r#"mutation { updateOneUser(data: { name: { set: "Bob" } }, where: { id: "2" }) { id name } }"#,
            json!({}),
        )
        .await;
        assert_eq!(result["data"]["updateOneUser"]["name"], "Bob");
    }

    #[tokio::test]
    async fn test_update_many_and_delete_many() {
        let store = seeded();
        let schema = schema_with(Arc::clone(&store));

        let updated = run(
            &schema,
            r#"mutation {
                updateManyUser(data: { name: { set: "same" } }, where: { name: { contains: "B", mode: insensitive } }) { count }
            }"#,
            json!({}),
        )
        .await;
        assert_eq!(updated["data"]["updateManyUser"]["count"], 1);
        assert_eq!(store.find_unique("2").unwrap().name, "same");
        assert_eq!(store.find_unique("1").unwrap().name, "Alice");

        let deleted = run(
            &schema,
            r#"mutation { deleteManyUser(where: { OR: [{ id: { equals: "1" } }, { name: { equals: "same" } }] }) { count } }"#,
            json!({}),
        )
        .await;
        assert_eq!(deleted["data"]["deleteManyUser"]["count"], 2);
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_delete_many_without_filter_deletes_all() {
        let store = seeded();
        let schema = schema_with(Arc::clone(&store));
        let result = run(&schema, "mutation { deleteManyUser { count } }", json!({})).await;
        assert_eq!(result["data"]["deleteManyUser"]["count"], 2);
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_big_red_button() {
        let schema = schema_with(seeded());
        let first = run(&schema, "mutation { bigRedButton }", json!({})).await;
        assert_eq!(
            first["data"]["bigRedButton"],
            "2 user(s) destroyed. Thanos will be proud."
        );

        let second = run(&schema, "mutation { bigRedButton }", json!({})).await;
        assert_eq!(
            second["data"]["bigRedButton"],
            "0 user(s) destroyed. Thanos will be proud."
        );
    }

    #[tokio::test]
    async fn test_users_pagination() {
        let store = Arc::new(UserStore::new());
        for id in ["a", "b", "c", "d"] {
            store.create(UserCreate::with_id(id, id.to_uppercase())).unwrap();
        }
        let schema = schema_with(store);

        let result = run(
            &schema,
            r#"{ users(first: 2, after: { id: "a" }) { id } }"#,
            json!({}),
        )
        .await;
        assert_eq!(result["data"]["users"], json!([{ "id": "b" }, { "id": "c" }]));

        let result = run(
            &schema,
            r#"{ users(last: 1, before: { id: "d" }) { id } }"#,
            json!({}),
        )
        .await;
        assert_eq!(result["data"]["users"], json!([{ "id": "c" }]));

        let result = run(&schema, "{ users(first: -1) { id } }", json!({})).await;
        assert_eq!(result["errors"][0]["extensions"]["code"], "VALIDATION");
    }

    #[tokio::test]
    async fn test_unknown_field_is_request_error() {
        let schema = schema_with(seeded());
        let result = run(&schema, "{ everyone { id } }", json!({})).await;
        assert!(result["errors"][0]["message"].is_string());
        assert!(result["data"].is_null());
    }

    #[tokio::test]
    async fn test_malformed_document_is_request_error() {
        let schema = schema_with(seeded());
        let result = execute(&schema, "{ allUsers { id ").await;
        assert!(result.contains("errors"));
    }
}
