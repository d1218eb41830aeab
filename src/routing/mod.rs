//! Route tree subsystem.
//!
//! # Data Flow
//! ```text
//! Tree construction (single-threaded, depth-first):
//!     on / get / post / ... (scope openers)
//!     → context.rs (push path segment or default method)
//!     → tree.rs (leaf: join path, resolve method)
//!     → engine.rs (flat registration into axum)
//!
//! Mounted subtrees:
//!     on_handler(prefix, service)
//!     → catch-all route per method
//!     → mount.rs (strip prefix, delegate)
//!
//! Serving:
//!     router.rs (Routes) → axum matching → handler
//! ```
//!
//! # Design Decisions
//! - The tree never interprets path tokens; axum owns matching and captures
//! - Contexts exist only while the tree is built; `Routes` carries none

pub mod context;
pub mod engine;
pub mod mount;
pub mod router;
pub mod tree;
pub mod types;

pub use context::{MethodContext, PathContext};
pub use engine::{AxumEngine, Engine};
pub use mount::{MountPrefix, StripPrefix, StripPrefixLayer};
pub use router::Routes;
pub use tree::RouteTree;
pub use types::{Method, MethodParseError, RouteError, RouteResult};
