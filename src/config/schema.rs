//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::routing::Method;

/// Settings applied while a route tree is declared.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Name of the catch-all capture used by mounted subtrees
    /// (`/prefix/{*subpath}`).
    pub subpath_param: String,

    /// Methods forwarded to mounted subtrees.
    pub mount_methods: Vec<Method>,

    /// Also route the bare mount point (`/prefix` and `/prefix/`) into the
    /// subtree, where it is seen as `/`.
    pub mount_root: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            subpath_param: "subpath".to_string(),
            mount_methods: Method::ALL.to_vec(),
            mount_root: true,
        }
    }
}
