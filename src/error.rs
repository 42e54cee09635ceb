//! Error types for route resolution.
//!
//! Redirects and unmatched paths are not errors; they are [`Outcome`]
//! variants. Only configuration defects surface here.
//!
//! [`Outcome`]: crate::routing::Outcome

use thiserror::Error;

/// Fatal routing errors.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// The route collection cannot produce a dispatchable default.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A route pattern failed to compile.
    #[error("Invalid route pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for routing operations.
pub type RoutingResult<T> = Result<T, RoutingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RoutingError::Configuration("no default route".into());
        assert_eq!(err.to_string(), "Configuration error: no default route");

        let source = regex::Regex::new("users/(").unwrap_err();
        let err = RoutingError::InvalidPattern {
            pattern: "users/(".into(),
            source,
        };
        assert!(err.to_string().contains("'users/('"));
    }
}
