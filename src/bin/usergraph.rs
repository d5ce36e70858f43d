//! usergraph CLI - GraphQL CRUD service for Users.
//!
//! Usage:
//!   usergraph serve                          # Start the HTTP endpoint
//!   usergraph serve --bind 0.0.0.0:4000      # Override listen address
//!   usergraph exec '{ allUsers { id name } }'
//!   usergraph exec @mutation.graphql --variables '{"name":"Alice"}'

use anyhow::{Context, Result};
use async_graphql::{Request, Variables};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use usergraph::config::Config;
use usergraph::{build_schema, execute, server, UserStore};

#[derive(Parser)]
#[command(name = "usergraph", version)]
#[command(about = "usergraph - GraphQL CRUD service for Users", long_about = None)]
struct Cli {
    /// Config file (default: ./usergraph.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Snapshot file, overrides store.snapshot
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the GraphQL endpoint over HTTP
    Serve {
        /// Listen address, overrides server.bind
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Execute one GraphQL document and print the response
    Exec {
        /// GraphQL document, or @path to read it from a file
        document: String,

        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("loading config")?;
    if let Some(snapshot) = cli.snapshot {
        config.store.snapshot = Some(snapshot);
    }
    setup_tracing(&config);

    let store = match &config.store.snapshot {
        Some(path) => UserStore::open(path)
            .with_context(|| format!("opening snapshot {}", path.display()))?,
        None => UserStore::new(),
    };
    let store = Arc::new(store);

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            info!(users = store.len()?, "starting usergraph");
            server::serve(&config, store).await?;
        }

        Commands::Exec { document, variables } => {
            let document = match document.strip_prefix('@') {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("reading document {}", path))?,
                None => document,
            };
            let mut request = Request::new(document);
            if let Some(vars) = variables {
                let json: serde_json::Value =
                    serde_json::from_str(&vars).context("parsing --variables")?;
                request = request.variables(Variables::from_json(json));
            }

            let schema = build_schema(store, &config.graphql);
            println!("{}", execute(&schema, request).await);
        }
    }

    Ok(())
}

fn setup_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
