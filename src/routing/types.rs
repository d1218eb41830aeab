//! Method tokens and routing error definitions.

use std::fmt;
use std::str::FromStr;

use axum::routing::MethodFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// HTTP methods a route tree can declare.
///
/// The set is fixed; mounts forward every one of them by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Every method, in declaration order.
    pub const ALL: [Method; 5] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// The axum filter selecting exactly this method.
    pub fn filter(self) -> MethodFilter {
        match self {
            Method::Get => MethodFilter::GET,
            Method::Post => MethodFilter::POST,
            Method::Put => MethodFilter::PUT,
            Method::Patch => MethodFilter::PATCH,
            Method::Delete => MethodFilter::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for axum::http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => axum::http::Method::GET,
            Method::Post => axum::http::Method::POST,
            Method::Put => axum::http::Method::PUT,
            Method::Patch => axum::http::Method::PATCH,
            Method::Delete => axum::http::Method::DELETE,
        }
    }
}

/// Returned when a string names no supported method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported HTTP method: {0}")]
pub struct MethodParseError(pub String);

impl FromStr for Method {
    type Err = MethodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MethodParseError(s.to_string()))
    }
}

/// Errors raised while building a route tree.
///
/// All of them are construction-time failures: a tree that produced one
/// should not be served.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A leaf was declared with no explicit methods outside any method scope.
    #[error("cannot declare `{path}` outside a method scope without passing methods explicitly")]
    MissingMethod { path: String },

    /// The same method and path were registered twice.
    #[error("{method} {path} is already registered")]
    Duplicate { method: Method, path: String },

    /// The matcher refused the pattern, usually because it overlaps one
    /// registered earlier or has a malformed capture.
    #[error("route `{path}` rejected by the matcher: {source}")]
    Rejected {
        path: String,
        #[source]
        source: matchit::InsertError,
    },

    /// The path pattern is not accepted by the engine.
    #[error("invalid route `{path}`: {reason}")]
    InvalidPath { path: String, reason: &'static str },
}

/// Result type for tree construction.
pub type RouteResult<T = ()> = Result<T, RouteError>;
