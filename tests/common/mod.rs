//! Shared utilities for integration tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::MethodRouter;
use route_tree::routing::Engine;
use route_tree::{Method, RouteResult, Routes};

/// Send a bodiless request and collect the response.
#[allow(dead_code)]
pub async fn send(routes: &Routes, method: Method, uri: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method(axum::http::Method::from(method))
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let res = routes.serve(req).await;
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Engine that only records what it is asked to register.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct Recorder {
    pub routes: Vec<(Method, String)>,
}

#[allow(dead_code)]
impl Recorder {
    pub fn sorted(&self) -> Vec<(Method, String)> {
        let mut routes = self.routes.clone();
        routes.sort_by(|a, b| (a.1.as_str(), a.0.as_str()).cmp(&(b.1.as_str(), b.0.as_str())));
        routes
    }
}

impl Engine for Recorder {
    fn register(&mut self, method: Method, path: &str, _route: MethodRouter) -> RouteResult {
        self.routes.push((method, path.to_string()));
        Ok(())
    }
}
