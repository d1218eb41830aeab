//! Nested route declaration.
//!
//! # Data Flow
//! ```text
//! on("repos/{owner}") ─┐ push path segment
//!   get(..) ───────────┤ push default method
//!     is("issues", h) ─┤ join path, resolve method
//!                      └→ Engine::register(GET, "/repos/{owner}/issues", h)
//! ```
//!
//! # Design Decisions
//! - Every operation takes `&self`, so a callback may capture the tree or
//!   receive it as an argument (`on_fn`, `with_method_fn`)
//! - Scopes are left through drop guards: an error or a panic inside a
//!   callback still restores both contexts before the caller sees it
//! - Explicit methods on a leaf replace the enclosing method scope entirely
//! - A leaf with neither is a `RouteError::MissingMethod`, reported before
//!   anything is registered

use std::cell::RefCell;
use std::convert::Infallible;

use axum::extract::Request;
use axum::handler::Handler;
use axum::response::IntoResponse;
use axum::routing::{on, on_service};
use tower::Service;

use crate::config::TreeConfig;
use crate::routing::context::{Entered, MethodContext, PathContext};
use crate::routing::engine::{AxumEngine, Engine};
use crate::routing::mount::StripPrefix;
use crate::routing::router::Routes;
use crate::routing::types::{Method, RouteError, RouteResult};

/// Builder declaring routes as a tree of path and method scopes.
///
/// ```no_run
/// use route_tree::{Method, RouteTree};
///
/// let tree = RouteTree::new();
/// tree.get(|| {
///     tree.is("", || async { "home" }, &[])?;
///     tree.on("hello", || {
///         tree.is("world", || async { "Hello world!" }, &[])?;
///         tree.is("", || async { "Hello!" }, &[])
///     })
/// })?;
/// tree.is("hello", || async { "created" }, &[Method::Post])?;
/// let routes = tree.into_routes();
/// # Ok::<(), route_tree::RouteError>(())
/// ```
pub struct RouteTree<E = AxumEngine> {
    engine: RefCell<E>,
    path: RefCell<PathContext>,
    methods: RefCell<MethodContext>,
    config: TreeConfig,
}

impl RouteTree<AxumEngine> {
    /// An empty tree over a fresh axum router, with default settings.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self::with_engine(AxumEngine::new(), config)
    }

    /// Declares a whole tree through `f` and returns the finished routes.
    pub fn build<F>(config: TreeConfig, f: F) -> RouteResult<Routes>
    where
        F: FnOnce(&Self) -> RouteResult,
    {
        let tree = Self::with_config(config);
        f(&tree)?;
        Ok(tree.into_routes())
    }

    /// Ends construction. The returned routes no longer depend on any scope state.
    pub fn into_routes(self) -> Routes {
        let engine = self.into_engine();
        tracing::debug!(paths = engine.path_count(), "Route tree compiled");
        Routes::new(engine.into_router())
    }
}

impl Default for RouteTree<AxumEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Engine> RouteTree<E> {
    pub fn with_engine(engine: E, config: TreeConfig) -> Self {
        Self {
            engine: RefCell::new(engine),
            path: RefCell::new(PathContext::new()),
            methods: RefCell::new(MethodContext::new()),
            config,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Copy of the path context at the point of the call.
    pub fn path_context(&self) -> PathContext {
        self.path.borrow().clone()
    }

    /// Copy of the method context at the point of the call.
    pub fn method_context(&self) -> MethodContext {
        self.methods.borrow().clone()
    }

    /// Absolute path of the current scope.
    pub fn current_path(&self) -> String {
        self.path.borrow().full_path()
    }

    /// The method a leaf declared here would default to.
    pub fn current_method(&self) -> Option<Method> {
        self.methods.borrow().current()
    }

    pub fn into_engine(self) -> E {
        self.engine.into_inner()
    }

    /// Runs `f` with `segment` appended to the path prefix.
    pub fn on<F>(&self, segment: &str, f: F) -> RouteResult
    where
        F: FnOnce() -> RouteResult,
    {
        let _scope = Entered::new(&self.path, segment.to_string());
        f()
    }

    /// Like [`on`](Self::on), handing the tree to `f`.
    ///
    /// Lets route groups live in their own functions.
    pub fn on_fn<F>(&self, segment: &str, f: F) -> RouteResult
    where
        F: FnOnce(&Self) -> RouteResult,
    {
        self.on(segment, || f(self))
    }

    /// Runs `f` with `method` as the default for leaves without explicit methods.
    pub fn with_method<F>(&self, method: Method, f: F) -> RouteResult
    where
        F: FnOnce() -> RouteResult,
    {
        let _scope = Entered::new(&self.methods, method);
        f()
    }

    pub fn with_method_fn<F>(&self, method: Method, f: F) -> RouteResult
    where
        F: FnOnce(&Self) -> RouteResult,
    {
        self.with_method(method, || f(self))
    }

    pub fn get<F>(&self, f: F) -> RouteResult
    where
        F: FnOnce() -> RouteResult,
    {
        self.with_method(Method::Get, f)
    }

    pub fn post<F>(&self, f: F) -> RouteResult
    where
        F: FnOnce() -> RouteResult,
    {
        self.with_method(Method::Post, f)
    }

    pub fn put<F>(&self, f: F) -> RouteResult
    where
        F: FnOnce() -> RouteResult,
    {
        self.with_method(Method::Put, f)
    }

    pub fn patch<F>(&self, f: F) -> RouteResult
    where
        F: FnOnce() -> RouteResult,
    {
        self.with_method(Method::Patch, f)
    }

    pub fn delete<F>(&self, f: F) -> RouteResult
    where
        F: FnOnce() -> RouteResult,
    {
        self.with_method(Method::Delete, f)
    }

    /// Declares a leaf served by an axum handler.
    ///
    /// With a non-empty `methods` the handler is registered once per listed
    /// method, whatever method scope encloses it. With an empty `methods` the
    /// innermost method scope decides, and outside any method scope the call
    /// fails with [`RouteError::MissingMethod`].
    pub fn is<H, T>(&self, segment: &str, handler: H, methods: &[Method]) -> RouteResult
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        let path = self.leaf_path(segment);
        for method in self.resolve(&path, methods)? {
            let route = on(method.filter(), handler.clone());
            self.engine
                .borrow_mut()
                .register(method, &path, route)
                .inspect_err(|err| tracing::warn!(error = %err, "Route registration failed"))?;
            tracing::debug!(method = %method, path = %path, "Registered route");
        }
        Ok(())
    }

    /// Declares a leaf served by an external [`Service`].
    ///
    /// Methods are resolved exactly as for [`is`](Self::is).
    pub fn handler<S>(&self, segment: &str, service: S, methods: &[Method]) -> RouteResult
    where
        S: Service<Request, Error = Infallible> + Clone + Send + Sync + 'static,
        S::Response: IntoResponse + 'static,
        S::Future: Send + 'static,
    {
        let path = self.leaf_path(segment);
        let methods = self.resolve(&path, methods)?;
        self.register_service(&path, service, &methods)
    }

    /// Hands everything below `prefix` to `service`.
    ///
    /// A catch-all route is registered for each of the configured mount
    /// methods. The service sees paths relative to the mount point: with
    /// `prefix` `"api/v1/events"`, a request for `/api/v1/events/list`
    /// reaches it as `/list`. The stripped prefix is the full path of the
    /// mount point, enclosing scopes included.
    pub fn on_handler<S>(&self, prefix: &str, service: S) -> RouteResult
    where
        S: Service<Request, Error = Infallible> + Clone + Send + Sync + 'static,
        S::Response: IntoResponse + 'static,
        S::Future: Send + 'static,
    {
        let _scope = Entered::new(&self.path, prefix.to_string());
        let mount = self.current_path();
        let delegate = StripPrefix::new(&mount, service);
        let methods = &self.config.mount_methods;

        tracing::info!(prefix = %mount, methods = ?methods, "Mounting subtree");

        let catch_all = self.leaf_path(&format!("{{*{}}}", self.config.subpath_param));
        self.register_service(&catch_all, delegate.clone(), methods)?;

        // Catch-alls never match an empty remainder.
        if self.config.mount_root {
            for path in mount_points(&mount) {
                self.register_service(&path, delegate.clone(), methods)?;
            }
        }
        Ok(())
    }

    /// Full path of `segment` declared in the current scope.
    fn leaf_path(&self, segment: &str) -> String {
        let _leaf = Entered::new(&self.path, segment.to_string());
        self.current_path()
    }

    fn resolve(&self, path: &str, explicit: &[Method]) -> RouteResult<Vec<Method>> {
        if !explicit.is_empty() {
            return Ok(explicit.to_vec());
        }
        match self.current_method() {
            Some(method) => Ok(vec![method]),
            None => {
                tracing::warn!(path = %path, "Leaf declared outside a method scope");
                Err(RouteError::MissingMethod {
                    path: path.to_string(),
                })
            }
        }
    }

    fn register_service<S>(&self, path: &str, service: S, methods: &[Method]) -> RouteResult
    where
        S: Service<Request, Error = Infallible> + Clone + Send + Sync + 'static,
        S::Response: IntoResponse + 'static,
        S::Future: Send + 'static,
    {
        for &method in methods {
            let route = on_service(method.filter(), service.clone());
            self.engine
                .borrow_mut()
                .register_external(method, path, route)
                .inspect_err(|err| tracing::warn!(error = %err, "Route registration failed"))?;
            tracing::debug!(method = %method, path = %path, "Registered external route");
        }
        Ok(())
    }
}

/// Paths naming the mount point itself: `/p` and `/p/`, or just `/` at the root.
fn mount_points(mount: &str) -> Vec<String> {
    if mount == "/" {
        vec![mount.to_string()]
    } else {
        vec![mount.to_string(), format!("{mount}/")]
    }
}
