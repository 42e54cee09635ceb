//! Resolution metrics.
//!
//! # Metrics
//! - `router_resolutions_total` (counter): resolutions by outcome
//!   (`resolved`, `redirect`, `not_found`)
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; the host installs the recorder
//! - Without a recorder every call is a no-op

/// Count one resolution with the given outcome label.
pub fn record_resolution(outcome: &'static str) {
    metrics::counter!("router_resolutions_total", "outcome" => outcome).increment(1);
}
