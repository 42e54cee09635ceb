//! Ordered route table.
//!
//! # Responsibilities
//! - Store compiled route rules in insertion order
//! - Track which patterns redirect, and with which status
//! - Hold the defaults used when a path names no controller or method
//!
//! # Design Decisions
//! - Patterns are compiled when added; a bad pattern fails immediately
//! - Immutable once handed to a Router (shared via Arc)

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::config::schema::{RouteConfig, RoutingConfig};
use crate::error::{RoutingError, RoutingResult};

/// Wrap a route pattern so it must match the whole path.
///
/// The non-capturing group keeps alternations inside the anchors and
/// leaves capture group numbering untouched.
pub fn anchor(pattern: &str) -> String {
    format!("^(?:{pattern})$")
}

type ClosureFn = dyn Fn(&[String]) -> String + Send + Sync;

/// A callable route target.
///
/// The router never invokes it; the dispatch layer calls it with the
/// collected params.
#[derive(Clone)]
pub struct Closure {
    label: String,
    func: Arc<ClosureFn>,
}

impl Closure {
    pub fn new<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[String]) -> String + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            func: Arc::new(func),
        }
    }

    /// Name used in logs and JSON output.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Invoke the closure with positional params.
    pub fn call(&self, params: &[String]) -> String {
        (self.func)(params)
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure").field("label", &self.label).finish()
    }
}

impl PartialEq for Closure {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl Eq for Closure {}

impl Serialize for Closure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("closure:{}", self.label))
    }
}

/// What a matched route points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Target {
    /// `Controller::method/arg/...`, possibly with `$n` back-references.
    Controller(String),
    /// A callable that receives the captured groups.
    Closure(Closure),
}

impl From<&str> for Target {
    fn from(s: &str) -> Self {
        Target::Controller(s.to_string())
    }
}

impl From<String> for Target {
    fn from(s: String) -> Self {
        Target::Controller(s)
    }
}

impl From<Closure> for Target {
    fn from(c: Closure) -> Self {
        Target::Closure(c)
    }
}

/// A compiled route rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: String,
    regex: Regex,
    target: Target,
}

impl Rule {
    fn compile(pattern: &str, target: Target) -> RoutingResult<Self> {
        let regex = Regex::new(&anchor(pattern)).map_err(|source| RoutingError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            target,
        })
    }

    /// The pattern as configured, without anchors.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The anchored, compiled pattern.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn target(&self) -> &Target {
        &self.target
    }
}

/// The route table consulted by the Router.
#[derive(Debug, Clone)]
pub struct RouteCollection {
    rules: Vec<Rule>,
    redirects: HashMap<String, u16>,
    default_controller: String,
    default_method: String,
    default_namespace: String,
    auto_route: bool,
    override_404: Option<Target>,
}

impl Default for RouteCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteCollection {
    /// Create an empty collection with stock defaults.
    pub fn new() -> Self {
        let defaults = RoutingConfig::default();
        Self {
            rules: Vec::new(),
            redirects: HashMap::new(),
            default_controller: defaults.default_controller,
            default_method: defaults.default_method,
            default_namespace: defaults.default_namespace,
            auto_route: defaults.auto_route,
            override_404: None,
        }
    }

    /// Build a collection from loaded configuration, keeping route order.
    pub fn from_config(routing: &RoutingConfig, routes: &[RouteConfig]) -> RoutingResult<Self> {
        let mut collection = Self::new()
            .with_default_controller(&routing.default_controller)
            .with_default_method(&routing.default_method)
            .with_default_namespace(&routing.default_namespace)
            .with_auto_route(routing.auto_route);

        if let Some(target) = &routing.override_404 {
            collection = collection.with_404_override(target.as_str());
        }

        for route in routes {
            match route.redirect {
                Some(status) => collection.add_redirect(&route.pattern, &route.target, status)?,
                None => collection.add(&route.pattern, route.target.as_str())?,
            };
        }

        Ok(collection)
    }

    /// Add a rule. Later rules only match if earlier ones did not.
    ///
    /// Re-adding a pattern replaces the earlier rule in place and clears
    /// any redirect recorded for it.
    pub fn add(&mut self, pattern: &str, target: impl Into<Target>) -> RoutingResult<&mut Self> {
        let rule = Rule::compile(pattern, target.into())?;
        self.redirects.remove(pattern);
        match self.rules.iter_mut().find(|r| r.pattern == pattern) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
        Ok(self)
    }

    /// Append a rule that redirects to `target` with `status`.
    pub fn add_redirect(&mut self, pattern: &str, target: &str, status: u16) -> RoutingResult<&mut Self> {
        self.add(pattern, target)?;
        self.redirects.insert(pattern.to_string(), status);
        Ok(self)
    }

    /// Append a closure rule.
    pub fn add_closure<F>(&mut self, pattern: &str, label: &str, func: F) -> RoutingResult<&mut Self>
    where
        F: Fn(&[String]) -> String + Send + Sync + 'static,
    {
        self.add(pattern, Closure::new(label, func))
    }

    pub fn with_default_controller(mut self, controller: &str) -> Self {
        self.default_controller = controller.to_string();
        self
    }

    pub fn with_default_method(mut self, method: &str) -> Self {
        self.default_method = method.to_string();
        self
    }

    pub fn with_default_namespace(mut self, namespace: &str) -> Self {
        self.default_namespace = namespace.to_string();
        self
    }

    pub fn with_auto_route(mut self, enabled: bool) -> Self {
        self.auto_route = enabled;
        self
    }

    pub fn with_404_override(mut self, target: impl Into<Target>) -> Self {
        self.override_404 = Some(target.into());
        self
    }

    /// Rules in match order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_redirect(&self, pattern: &str) -> bool {
        self.redirects.contains_key(pattern)
    }

    /// Redirect status for `pattern`, 302 if none was recorded.
    pub fn redirect_code(&self, pattern: &str) -> u16 {
        self.redirects.get(pattern).copied().unwrap_or(302)
    }

    pub fn default_controller(&self) -> &str {
        &self.default_controller
    }

    pub fn default_method(&self) -> &str {
        &self.default_method
    }

    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    pub fn should_auto_route(&self) -> bool {
        self.auto_route
    }

    pub fn override_404(&self) -> Option<&Target> {
        self.override_404.as_ref()
    }
}
