//! Path rewriting for mounted subtrees.
//!
//! # Responsibilities
//! - Remove the mount prefix from the request path before delegating
//! - Keep the query string and the rest of the URI untouched
//! - Record where the subtree was mounted
//!
//! # Design Decisions
//! - Only a leading, segment-aligned prefix is removed; later occurrences of
//!   the same text are part of the subtree path
//! - Captures in the prefix match whatever segment the router matched
//! - An empty remainder is served as `/`
//! - The rewrite happens on the request value handed to the subtree; the
//!   caller's request is never observed in a rewritten state

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::{OriginalUri, Request};
use axum::http::uri::PathAndQuery;
use axum::http::Uri;
use tower::{Layer, Service};

/// Request extension carrying the prefix a subtree is mounted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPrefix(pub Arc<str>);

impl MountPrefix {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Wraps a service so it sees request paths relative to `prefix`.
#[derive(Debug, Clone)]
pub struct StripPrefix<S> {
    prefix: Arc<str>,
    inner: S,
}

impl<S> StripPrefix<S> {
    /// The prefix gains a leading `/` if it lacks one; trailing slashes are dropped.
    pub fn new(prefix: &str, inner: S) -> Self {
        Self {
            prefix: normalize_prefix(prefix).into(),
            inner,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> Service<Request> for StripPrefix<S>
where
    S: Service<Request>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        if let Some(uri) = strip_uri(&self.prefix, req.uri()) {
            tracing::trace!(
                prefix = %self.prefix,
                from = %req.uri(),
                to = %uri,
                "Delegating to mounted subtree"
            );
            let original = std::mem::replace(req.uri_mut(), uri);
            if req.extensions().get::<OriginalUri>().is_none() {
                req.extensions_mut().insert(OriginalUri(original));
            }
        }
        req.extensions_mut().insert(MountPrefix(self.prefix.clone()));
        self.inner.call(req)
    }
}

/// [`Layer`] producing [`StripPrefix`] services.
#[derive(Debug, Clone)]
pub struct StripPrefixLayer {
    prefix: Arc<str>,
}

impl StripPrefixLayer {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: normalize_prefix(prefix).into(),
        }
    }
}

impl<S> Layer<S> for StripPrefixLayer {
    type Service = StripPrefix<S>;

    fn layer(&self, inner: S) -> Self::Service {
        StripPrefix {
            prefix: self.prefix.clone(),
            inner,
        }
    }
}

/// `"api/v1/"` becomes `"/api/v1"`; the root prefix becomes `""`.
pub(crate) fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() || trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// The path left after removing a leading `prefix`.
///
/// The prefix is compared segment by segment. A `{name}` capture in the
/// prefix stands for any one non-empty segment of `path`, so a mount
/// declared under `users/{id}` strips `/users/5` as well. Returns `None`
/// when `path` does not start with `prefix` on a segment boundary.
pub fn strip_path<'a>(prefix: &str, path: &'a str) -> Option<&'a str> {
    let mut rest = path;
    for expected in prefix.split('/').filter(|s| !s.is_empty()) {
        let tail = rest.strip_prefix('/')?;
        let end = tail.find('/').unwrap_or(tail.len());
        let segment = &tail[..end];
        let matched = if is_capture(expected) {
            !segment.is_empty()
        } else {
            segment == expected
        };
        if !matched {
            return None;
        }
        rest = &tail[end..];
    }

    if rest.is_empty() {
        Some("/")
    } else {
        Some(rest)
    }
}

fn is_capture(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

fn strip_uri(prefix: &str, uri: &Uri) -> Option<Uri> {
    let path = strip_path(prefix, uri.path())?;
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query).ok()?);
    Uri::from_parts(parts).ok()
}
