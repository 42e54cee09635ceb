//! Route lookup entry point.
//!
//! # Responsibilities
//! - Resolve a request path to a controller, method and params
//! - Try explicit rules first, then controller conventions
//! - Return redirects and misses as explicit outcomes
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Every call builds a fresh Resolution; no state carries over
//! - Only configuration defects are errors

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;

use crate::config::schema::RouterConfig;
use crate::error::RoutingResult;
use crate::observability::metrics;
use crate::routing::auto::auto_route;
use crate::routing::collection::{Closure, RouteCollection, Target};
use crate::routing::matcher::{check_routes, RuleMatch};
use crate::routing::probe::{ExistenceProbe, FsProbe};
use crate::routing::state::{Controller, Resolution};

/// Result of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A handler was identified.
    Resolved(Resolution),
    /// A redirect rule matched; dispatch should redirect to `target`.
    Redirect { target: String, status: u16 },
    /// No rule matched and convention routing is disabled.
    NotFound { path: String },
}

impl Outcome {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Resolved(_) => "resolved",
            Outcome::Redirect { .. } => "redirect",
            Outcome::NotFound { .. } => "not_found",
        }
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        match self {
            Outcome::Resolved(resolution) => Some(resolution),
            _ => None,
        }
    }
}

/// Fallback handler to use when dispatch cannot find anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundOverride {
    Controller { controller: String, method: String },
    Closure(Closure),
}

/// Resolves request paths against a route collection.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Arc<RouteCollection>,
    probe: Arc<dyn ExistenceProbe>,
    index_page: String,
    translate_uri_dashes: bool,
}

impl Router {
    pub fn new(routes: Arc<RouteCollection>, probe: Arc<dyn ExistenceProbe>) -> Self {
        Self {
            routes,
            probe,
            index_page: "index.php".to_string(),
            translate_uri_dashes: false,
        }
    }

    /// Build a router from loaded configuration with a filesystem probe.
    pub fn from_config(config: &RouterConfig) -> RoutingResult<Self> {
        let routes = RouteCollection::from_config(&config.routing, &config.routes)?;
        let probe = FsProbe::new(&config.controllers.root, config.controllers.extension.as_str());

        Ok(Self::new(Arc::new(routes), Arc::new(probe))
            .with_index_page(&config.routing.index_page)
            .with_translate_uri_dashes(config.routing.translate_uri_dashes))
    }

    pub fn with_index_page(mut self, page: &str) -> Self {
        self.index_page = page.to_string();
        self
    }

    pub fn with_translate_uri_dashes(mut self, translate: bool) -> Self {
        self.translate_uri_dashes = translate;
        self
    }

    pub fn index_page(&self) -> &str {
        &self.index_page
    }

    pub fn translate_uri_dashes(&self) -> bool {
        self.translate_uri_dashes
    }

    pub fn routes(&self) -> &RouteCollection {
        &self.routes
    }

    /// Resolve `path` to an outcome.
    pub fn resolve(&self, path: &str) -> RoutingResult<Outcome> {
        let state = Resolution::new(&self.routes);
        self.resolve_with(path, state)
    }

    /// Resolve `path` with controllers looked up under `directory` only.
    pub fn resolve_within(&self, path: &str, directory: &str) -> RoutingResult<Outcome> {
        let mut state = Resolution::new(&self.routes);
        let directory = directory.trim_matches('/');
        if directory.is_empty() {
            state.directory = Some(String::new());
        } else {
            state.push_directory(directory);
        }
        self.resolve_with(path, state)
    }

    fn resolve_with(&self, path: &str, mut state: Resolution) -> RoutingResult<Outcome> {
        let path = path.trim_matches('/');

        let outcome = if path.is_empty() {
            self.resolve_empty(state)
        } else {
            let probe = self.probe.as_ref();
            match check_routes(path, &self.routes, probe, self.translate_uri_dashes, &mut state)? {
                RuleMatch::Matched => Outcome::Resolved(state),
                RuleMatch::Redirect { target, status } => Outcome::Redirect { target, status },
                RuleMatch::NoMatch if !self.routes.should_auto_route() => {
                    tracing::debug!(path = %path, "No route matched and auto-routing is disabled");
                    Outcome::NotFound {
                        path: path.to_string(),
                    }
                }
                RuleMatch::NoMatch => {
                    auto_route(path, probe, self.translate_uri_dashes, &mut state)?;
                    Outcome::Resolved(state)
                }
            }
        };

        metrics::record_resolution(outcome.kind());
        Ok(outcome)
    }

    /// The empty path runs the default controller, namespaced.
    fn resolve_empty(&self, mut state: Resolution) -> Outcome {
        if let Controller::Named(name) = &mut state.controller {
            if !name.contains('\\') {
                name.insert_str(0, self.routes.default_namespace());
            }
        }
        Outcome::Resolved(state)
    }

    /// The configured 404 override, split into controller and method.
    pub fn not_found_override(&self) -> Option<NotFoundOverride> {
        match self.routes.override_404()? {
            Target::Controller(target) => {
                let mut parts = target.split("::");
                let controller = parts.next().unwrap_or_default().to_string();
                let method = parts
                    .next()
                    .filter(|m| !m.is_empty())
                    .unwrap_or(self.routes.default_method())
                    .to_string();
                Some(NotFoundOverride::Controller { controller, method })
            }
            Target::Closure(closure) => Some(NotFoundOverride::Closure(closure.clone())),
        }
    }
}

/// A router that can be replaced while requests are being resolved.
///
/// Readers take a snapshot with [`SharedRouter::load`] and keep using it
/// for the whole resolution, even if a reload swaps in a new router.
#[derive(Debug)]
pub struct SharedRouter {
    inner: ArcSwap<Router>,
}

impl SharedRouter {
    pub fn new(router: Router) -> Self {
        Self {
            inner: ArcSwap::from_pointee(router),
        }
    }

    pub fn load(&self) -> Arc<Router> {
        self.inner.load_full()
    }

    pub fn store(&self, router: Router) {
        self.inner.store(Arc::new(router));
    }

    /// Resolve against the current snapshot.
    pub fn resolve(&self, path: &str) -> RoutingResult<Outcome> {
        self.load().resolve(path)
    }
}
