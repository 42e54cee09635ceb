//! Convention-based routing.
//!
//! When no explicit rule matches, path segments are mapped onto the
//! controllers directory: leading segments that name sub-directories (and
//! not controllers) are descended into, the next segment names the
//! controller, the one after it the method, and the rest become params.
//!
//! ```text
//! admin/users/edit/7
//!     → "Admin" controller?  no; "admin" directory? yes → directory = admin/
//!     → "Users" controller in admin/? yes → stop
//!     → controller = Users, method = edit, params = [7]
//! ```

use crate::error::RoutingResult;
use crate::routing::probe::ExistenceProbe;
use crate::routing::state::{ucfirst, Controller, Resolution};

/// Descend into sub-directories named by leading segments.
///
/// Returns the segments left once a controller is found or a segment
/// names no directory. An empty result means every segment was a directory.
pub(crate) fn validate_request(
    mut segments: Vec<String>,
    probe: &dyn ExistenceProbe,
    translate_dashes: bool,
    state: &mut Resolution,
) -> Vec<String> {
    // An explicit directory disables descent.
    let directory_override = state.directory.is_some();

    while let Some(first) = segments.first() {
        let candidate = if translate_dashes {
            ucfirst(&first.replace('-', "_"))
        } else {
            ucfirst(first)
        };

        if !probe.controller_exists(state.directory(), &candidate)
            && !directory_override
            && probe.directory_exists(state.directory(), first)
        {
            let dir = segments.remove(0);
            state.push_directory(&dir);
            tracing::debug!(directory = %state.directory(), "Descended into controller directory");
            continue;
        }

        return segments;
    }

    segments
}

/// Resolve `path` by controller and directory conventions.
pub(crate) fn auto_route(
    path: &str,
    probe: &dyn ExistenceProbe,
    translate_dashes: bool,
    state: &mut Resolution,
) -> RoutingResult<()> {
    let segments = path.split('/').map(str::to_string).collect();
    let mut segments = validate_request(segments, probe, translate_dashes, state).into_iter();

    match segments.next() {
        Some(controller) => state.controller = Controller::Named(ucfirst(&controller)),
        None => state.set_default_controller(probe)?,
    }

    // Otherwise the default method already set stays.
    if let Some(method) = segments.next() {
        state.method = method;
    }

    let params: Vec<String> = segments.collect();
    if !params.is_empty() {
        state.params = params;
    }

    Ok(())
}
