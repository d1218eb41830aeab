//! Declare HTTP routes as a tree.
//!
//! Routes are written as nested path and method scopes instead of a flat
//! list of `(method, path, handler)` triples. Each scope adds to an implicit
//! path prefix or default method; leaves resolve both into concrete
//! registrations on an [`axum::Router`].
//!
//! ```text
//! RouteTree ── on / get / post ... ──→ context (path prefix, default method)
//!     │
//!     ├─ is / handler ──→ Engine::register(method, "/full/path", handler)
//!     └─ on_handler ────→ catch-all per method ──→ StripPrefix ──→ subtree
//!
//! into_routes() ──→ Routes (serve / tower::Service / axum::Router)
//! ```

pub mod config;
pub mod routing;

pub use config::TreeConfig;
pub use routing::{Method, RouteError, RouteResult, RouteTree, Routes};
