//! HTTP server: GraphQL over HTTP POST.
//!
//! One route: `POST <server.path>` with `{ query, variables?, operationName? }`.
//! Malformed bodies are rejected with 400 by the extractor; parse and
//! validation failures come back as `{ data: null, errors: [...] }`.

use async_graphql_axum::GraphQL;
use axum::routing::post_service;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::graphql::{build_schema, verify_operations, UserGraphSchema};
use crate::store::UserStore;

/// Router serving `schema` at `path`.
pub fn router(schema: UserGraphSchema, path: &str) -> Router {
    Router::new()
        .route(path, post_service(GraphQL::new(schema)))
        .layer(TraceLayer::new_for_http())
}

/// Check the root operations, then build the schema with the configured limits.
pub async fn prepare(config: &Config, store: Arc<UserStore>) -> Result<UserGraphSchema> {
    verify_operations().await?;
    Ok(build_schema(store, &config.graphql))
}

/// Serve until Ctrl-C.
pub async fn serve(config: &Config, store: Arc<UserStore>) -> Result<()> {
    let schema = prepare(config, store).await?;

    let listener = TcpListener::bind(config.bind_addr()?).await?;
    info!(
        addr = %listener.local_addr()?,
        path = %config.server.path,
        "graphql endpoint listening"
    );

    axum::serve(listener, router(schema, &config.server.path))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
