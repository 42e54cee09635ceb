//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path
//!     → router.rs (entry point, fresh Resolution per call)
//!     → matcher.rs (ordered rules: closure, back-references, redirects)
//!     → auto.rs (directory/controller conventions via probe.rs)
//!     → Return: Resolved, Redirect or NotFound
//!
//! Route Compilation (at startup / reload):
//!     RouteConfig[]
//!     → collection.rs (compile anchored patterns, keep order)
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled up front, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (table order)
//! - Controller lookups go through ExistenceProbe, never direct I/O

pub mod auto;
pub mod collection;
pub mod matcher;
pub mod probe;
pub mod router;
pub mod state;

pub use collection::{Closure, RouteCollection, Rule, Target};
pub use matcher::substitute_backrefs;
pub use probe::{ExistenceProbe, FsProbe, MemoryProbe};
pub use router::{NotFoundOverride, Outcome, Router, SharedRouter};
pub use state::{Controller, MatchedRoute, Resolution};
