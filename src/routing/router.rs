//! Serving a finished route tree.
//!
//! # Responsibilities
//! - Hold the compiled engine once construction has ended
//! - Dispatch requests to it
//!
//! # Design Decisions
//! - Immutable after construction (cheap to clone, shareable across tasks)
//! - No-match and wrong-method responses are axum's 404 and 405

use std::convert::Infallible;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::response::Response;
use axum::Router;
use tower::{Service, ServiceExt};

/// Routes produced by a [`RouteTree`](crate::RouteTree), ready to serve.
#[derive(Debug, Clone)]
pub struct Routes {
    router: Router,
}

impl Routes {
    pub(crate) fn new(router: Router) -> Self {
        Self { router }
    }

    /// Serve a single request.
    pub async fn serve(&self, req: Request) -> Response {
        match self.router.clone().oneshot(req).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }

    /// The underlying axum router, e.g. to add layers or pass to `axum::serve`.
    pub fn into_router(self) -> Router {
        self.router
    }
}

impl From<Routes> for Router {
    fn from(routes: Routes) -> Self {
        routes.router
    }
}

impl Service<Request> for Routes {
    type Response = Response;
    type Error = Infallible;
    type Future = <Router as Service<Request>>::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Service::<Request>::poll_ready(&mut self.router, cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        Service::<Request>::call(&mut self.router, req)
    }
}
