//! Per-request resolution state.
//!
//! A [`Resolution`] is created fresh for every call to the router, filled
//! in by exactly one of the rule matcher or the convention resolver, and
//! handed back to the caller. Nothing here outlives the request.

use serde::{Serialize, Serializer};

use crate::error::{RoutingError, RoutingResult};
use crate::routing::collection::{Closure, RouteCollection, Target};
use crate::routing::probe::ExistenceProbe;

/// The controller a request resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Controller {
    /// A controller name, e.g. `Users` or `App\Controllers\Home`.
    Named(String),
    /// A closure route; dispatch calls it with the params.
    Closure(Closure),
}

impl Controller {
    /// The controller name, if this is not a closure.
    pub fn name(&self) -> Option<&str> {
        match self {
            Controller::Named(name) => Some(name),
            Controller::Closure(_) => None,
        }
    }
}

/// The rule that produced a resolution, with its target after
/// back-reference substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedRoute {
    pub pattern: String,
    pub target: Target,
}

/// A resolved handler identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    #[serde(serialize_with = "serialize_directory")]
    pub(crate) directory: Option<String>,
    pub(crate) controller: Controller,
    pub(crate) method: String,
    pub(crate) params: Vec<String>,
    pub(crate) matched_route: Option<MatchedRoute>,
}

fn serialize_directory<S: Serializer>(directory: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(directory.as_deref().unwrap_or(""))
}

/// Upper-case the first character, leaving the rest untouched.
pub(crate) fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Resolution {
    /// Start from the collection's defaults.
    pub(crate) fn new(routes: &RouteCollection) -> Self {
        Self {
            directory: None,
            controller: Controller::Named(routes.default_controller().to_string()),
            method: routes.default_method().to_string(),
            params: Vec::new(),
            matched_route: None,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Controller name, or `None` for closure routes.
    pub fn controller_name(&self) -> Option<&str> {
        self.controller.name()
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Sub-directory the controller lives in, `""` when at the root.
    pub fn directory(&self) -> &str {
        self.directory.as_deref().unwrap_or("")
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn matched_route(&self) -> Option<&MatchedRoute> {
        self.matched_route.as_ref()
    }

    /// Append `dir` to the directory, stripping slashes and periods.
    pub(crate) fn push_directory(&mut self, dir: &str) {
        let clean = dir.trim_matches('/').replace('.', "");
        let directory = self.directory.get_or_insert_with(String::new);
        directory.push_str(&clean);
        directory.push('/');
    }

    /// Apply `Controller::method/arg/...` segments from a string target.
    pub(crate) fn set_request(
        &mut self,
        mut segments: Vec<String>,
        probe: &dyn ExistenceProbe,
        translate_dashes: bool,
    ) -> RoutingResult<()> {
        if segments.is_empty() {
            return self.set_default_controller(probe);
        }

        if translate_dashes {
            for segment in segments.iter_mut().take(2) {
                *segment = segment.replace('-', "_");
            }
        }

        let head = segments.remove(0);
        let mut parts = head.split("::");
        let controller = parts.next().unwrap_or_default();
        let method = parts.next().unwrap_or_default();

        self.controller = Controller::Named(controller.to_string());

        // Keep the default method when the target names none.
        if !method.is_empty() {
            self.method = method.to_string();
        }

        self.params = segments;
        Ok(())
    }

    /// Fall back to the configured default controller.
    ///
    /// The default may carry a method as `Controller/method`. When no
    /// controller of that name exists under the current directory the
    /// state is left alone; dispatch will report the miss.
    pub(crate) fn set_default_controller(&mut self, probe: &dyn ExistenceProbe) -> RoutingResult<()> {
        let default = match &self.controller {
            Controller::Named(name) if !name.is_empty() => name.clone(),
            _ => {
                return Err(RoutingError::Configuration(
                    "unable to determine what should be displayed: no default route has been specified"
                        .to_string(),
                ))
            }
        };

        let class = match default.split_once('/') {
            Some((class, method)) => {
                if !method.is_empty() {
                    self.method = method.to_string();
                }
                class
            }
            None => default.as_str(),
        };

        let class = ucfirst(class);
        if !probe.controller_exists(self.directory(), &class) {
            return Ok(());
        }

        self.controller = Controller::Named(class);
        tracing::info!(
            controller = %self.controller.name().unwrap_or_default(),
            method = %self.method,
            "Used the default controller"
        );
        Ok(())
    }
}
