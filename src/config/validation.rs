//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the catch-all name is usable inside `{*name}`
//! - Check mounts forward at least one method, each only once
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TreeConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::TreeConfig;
use crate::routing::Method;

/// A single semantic problem in a [`TreeConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("subpath_param must not be empty")]
    EmptySubpathParam,

    #[error("subpath_param `{0}` may only contain ASCII letters, digits and `_`")]
    InvalidSubpathParam(String),

    #[error("mount_methods must list at least one method")]
    NoMountMethods,

    #[error("mount_methods lists {0} more than once")]
    DuplicateMountMethod(Method),
}

pub fn validate_config(config: &TreeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let param = &config.subpath_param;
    if param.is_empty() {
        errors.push(ValidationError::EmptySubpathParam);
    } else if !param.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        errors.push(ValidationError::InvalidSubpathParam(param.clone()));
    }

    if config.mount_methods.is_empty() {
        errors.push(ValidationError::NoMountMethods);
    }
    for (i, method) in config.mount_methods.iter().enumerate() {
        // Report each repeated method once, at its first repeat.
        if config.mount_methods[..i].iter().filter(|m| *m == method).count() == 1 {
            errors.push(ValidationError::DuplicateMountMethod(*method));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
