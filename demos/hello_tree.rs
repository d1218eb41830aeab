//! Greeting service declared as a route tree.
//!
//! ```text
//! cargo run --example hello_tree [config.toml]
//! curl localhost:3000/hello/world
//! curl localhost:3000/admin/status
//! ```

use std::path::Path;

use axum::extract::Path as Captured;
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use route_tree::config::load_config;
use route_tree::{Method, RouteResult, RouteTree, TreeConfig};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const BIND_ADDRESS: &str = "127.0.0.1:3000";

fn greetings(tree: &RouteTree) -> RouteResult {
    tree.get(|| {
        tree.is("", || async { Redirect::to("/hello") }, &[])?;
        tree.on("hello", || {
            tree.is("world", || async { "Hello world!" }, &[])?;
            tree.is("{name}", |Captured(name): Captured<String>| async move {
                format!("Hello {name}!")
            }, &[])?;
            tree.is("", || async { "Hello!" }, &[])
        })
    })?;
    tree.is("hello", || async { "Greeting noted." }, &[Method::Post])
}

/// Plain axum router mounted under `/admin`; it knows nothing about the prefix.
fn admin() -> Router {
    Router::new()
        .route("/status", get(|| async { "ok" }))
        .route("/", get(|| async { "admin" }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "route_tree=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => TreeConfig::default(),
    };

    tracing::info!(
        subpath_param = %config.subpath_param,
        mount_methods = ?config.mount_methods,
        mount_root = config.mount_root,
        "Configuration loaded"
    );

    let routes = RouteTree::build(config, |tree| {
        greetings(tree)?;
        tree.on_handler("admin", admin())
    })?;

    let app = routes.into_router().layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(BIND_ADDRESS).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "Failed to listen for shutdown signal");
            }
        })
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
