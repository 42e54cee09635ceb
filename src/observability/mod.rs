//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing produces:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (resolution counters)
//! ```
//!
//! # Design Decisions
//! - Default-controller use is logged at info, rule matches at debug
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
