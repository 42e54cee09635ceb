//! Request path router.
//!
//! Resolves a request path to a controller, method and params, first by
//! an ordered table of pattern rules, then by controller directory
//! conventions.

pub mod config;
pub mod error;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use error::{RoutingError, RoutingResult};
pub use routing::{Outcome, Resolution, RouteCollection, Router, SharedRouter};
