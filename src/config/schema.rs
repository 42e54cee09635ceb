//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the request router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Defaults and global routing switches.
    pub routing: RoutingConfig,

    /// Explicit route rules, checked in file order.
    pub routes: Vec<RouteConfig>,

    /// Where convention routing looks for controllers.
    pub controllers: ControllersConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Routing defaults and switches.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Controller used when a path resolves to nothing more specific.
    /// May carry a method as `Controller/method`.
    pub default_controller: String,

    /// Method used when a route or path names none.
    pub default_method: String,

    /// Namespace prepended to the default controller for the empty path.
    pub default_namespace: String,

    /// Fall back to directory/controller conventions when no rule matches.
    pub auto_route: bool,

    /// Translate `-` to `_` in controller and method segments.
    pub translate_uri_dashes: bool,

    /// Front controller file name. Not used for matching.
    pub index_page: String,

    /// Target used by the caller when nothing could be resolved.
    pub override_404: Option<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_controller: "Home".to_string(),
            default_method: "index".to_string(),
            default_namespace: String::new(),
            auto_route: true,
            translate_uri_dashes: false,
            index_page: "index.php".to_string(),
            override_404: None,
        }
    }
}

/// A single explicit route rule.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Regular expression matched against the whole path.
    pub pattern: String,

    /// `Controller::method/arg/...`, may contain `$n` back-references.
    pub target: String,

    /// Redirect status code; when set the rule redirects to `target`.
    #[serde(default)]
    pub redirect: Option<u16>,
}

/// Controller lookup settings for convention routing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControllersConfig {
    /// Root directory holding controllers and sub-directories.
    pub root: String,

    /// File extension of controller files, without the dot.
    pub extension: String,
}

impl Default for ControllersConfig {
    fn default() -> Self {
        Self {
            root: "app/Controllers".to_string(),
            extension: "rs".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
