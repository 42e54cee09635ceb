//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route pattern compiles
//! - Validate value ranges (redirect codes are 3xx)
//! - Detect duplicate patterns, where a later rule replaces an earlier one
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::collection::anchor;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("routing.default_controller must not be empty")]
    EmptyDefaultController,

    #[error("routing.default_method must not be empty")]
    EmptyDefaultMethod,

    #[error("route #{index} has an invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        reason: String,
    },

    #[error("route #{index} ('{pattern}') has an empty target")]
    EmptyTarget { index: usize, pattern: String },

    #[error("route #{index} duplicates pattern '{pattern}'; only the last definition is used")]
    DuplicatePattern { index: usize, pattern: String },

    #[error("route #{index} ('{pattern}') has redirect status {status}, expected 300-399")]
    InvalidRedirectStatus {
        index: usize,
        pattern: String,
        status: u16,
    },
}

/// Validate a parsed configuration, collecting every problem.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.routing.default_controller.trim().is_empty() {
        errors.push(ValidationError::EmptyDefaultController);
    }
    if config.routing.default_method.trim().is_empty() {
        errors.push(ValidationError::EmptyDefaultMethod);
    }

    let mut seen = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if let Err(e) = regex::Regex::new(&anchor(&route.pattern)) {
            errors.push(ValidationError::InvalidPattern {
                index,
                pattern: route.pattern.clone(),
                reason: e.to_string(),
            });
        }

        if route.target.is_empty() {
            errors.push(ValidationError::EmptyTarget {
                index,
                pattern: route.pattern.clone(),
            });
        }

        if !seen.insert(route.pattern.as_str()) {
            errors.push(ValidationError::DuplicatePattern {
                index,
                pattern: route.pattern.clone(),
            });
        }

        if let Some(status) = route.redirect {
            if !(300..=399).contains(&status) {
                errors.push(ValidationError::InvalidRedirectStatus {
                    index,
                    pattern: route.pattern.clone(),
                    status,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
