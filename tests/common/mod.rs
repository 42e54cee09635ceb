//! Shared fixtures for integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use request_router::routing::{MemoryProbe, RouteCollection, Router};

/// Build a router over an in-memory controller tree.
#[allow(dead_code)]
pub fn router(routes: RouteCollection, probe: MemoryProbe) -> Router {
    Router::new(Arc::new(routes), Arc::new(probe))
}

/// A fresh scratch directory unique to this test process.
#[allow(dead_code)]
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("request-router-it-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
