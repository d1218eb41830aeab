//! The engine a route tree registers into.
//!
//! # Responsibilities
//! - Accept flat `(method, path, handler)` registrations
//! - Own the compiled matching structure once the tree is built
//!
//! # Design Decisions
//! - The tree only talks to the `Engine` trait; matching, captures and
//!   404/405 policy belong to the engine
//! - `AxumEngine` checks every path before handing it to axum, so a bad
//!   declaration surfaces as a `RouteError` instead of a panic
//! - Duplicate `(method, path)` pairs are rejected, never overwritten

use std::collections::HashMap;
use std::fmt;

use axum::routing::MethodRouter;
use axum::Router;

use crate::routing::types::{Method, RouteError, RouteResult};

/// Destination of the registrations produced by a route tree.
pub trait Engine {
    /// Register a router-native handler under `method` and `path`.
    ///
    /// `route` is already filtered to `method`.
    fn register(&mut self, method: Method, path: &str, route: MethodRouter) -> RouteResult;

    /// Register an external service under `method` and `path`.
    fn register_external(&mut self, method: Method, path: &str, route: MethodRouter) -> RouteResult {
        self.register(method, path, route)
    }
}

/// Engine backed by an [`axum::Router`].
pub struct AxumEngine {
    router: Router,
    matcher: matchit::Router<()>,
    registered: HashMap<String, Vec<Method>>,
}

impl AxumEngine {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            matcher: matchit::Router::new(),
            registered: HashMap::new(),
        }
    }

    /// Methods registered so far for an exact path pattern.
    pub fn methods_for(&self, path: &str) -> &[Method] {
        self.registered.get(path).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of distinct path patterns registered.
    pub fn path_count(&self) -> usize {
        self.registered.len()
    }

    pub fn into_router(self) -> Router {
        self.router
    }

    fn claim(&mut self, method: Method, path: &str) -> RouteResult {
        check_syntax(path)?;

        match self.registered.get_mut(path) {
            Some(methods) if methods.contains(&method) => Err(RouteError::Duplicate {
                method,
                path: path.to_string(),
            }),
            Some(methods) => {
                methods.push(method);
                Ok(())
            }
            None => {
                self.matcher
                    .insert(path, ())
                    .map_err(|source| RouteError::Rejected {
                        path: path.to_string(),
                        source,
                    })?;
                self.registered.insert(path.to_string(), vec![method]);
                Ok(())
            }
        }
    }
}

impl Default for AxumEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AxumEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxumEngine")
            .field("registered", &self.registered)
            .finish_non_exhaustive()
    }
}

impl Engine for AxumEngine {
    fn register(&mut self, method: Method, path: &str, route: MethodRouter) -> RouteResult {
        self.claim(method, path)?;
        // Routes sharing a path are merged by axum; `claim` already ruled out overlaps.
        self.router = std::mem::take(&mut self.router).route(path, route);
        Ok(())
    }
}

/// Rejects patterns axum would panic on.
fn check_syntax(path: &str) -> RouteResult {
    if !path.starts_with('/') {
        return Err(RouteError::InvalidPath {
            path: path.to_string(),
            reason: "paths must start with `/`",
        });
    }
    if path
        .split('/')
        .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
    {
        return Err(RouteError::InvalidPath {
            path: path.to_string(),
            reason: "captures are written `{name}` and `{*name}`, not `:name` or `*name`",
        });
    }
    Ok(())
}
