//! Explicit route matching.
//!
//! # Responsibilities
//! - Walk the route table in order and stop at the first anchored match
//! - Hand captured groups to closure targets
//! - Substitute `$n` back-references into string targets
//! - Signal redirects before any state is touched
//!
//! # Design Decisions
//! - First match wins; no specificity scoring
//! - Redirects are only recognised for string targets

use regex::Captures;

use crate::error::RoutingResult;
use crate::routing::collection::{RouteCollection, Target};
use crate::routing::probe::ExistenceProbe;
use crate::routing::state::{Controller, MatchedRoute, Resolution};

/// What the rule pass decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RuleMatch {
    /// A rule matched and the resolution state was filled in.
    Matched,
    /// A redirect rule matched; the state is untouched.
    Redirect { target: String, status: u16 },
    /// No rule matched.
    NoMatch,
}

/// Expand `$n`, `${n}` and `\n` placeholders from `caps`.
///
/// Group numbers take up to two digits greedily, so `$12` is group twelve.
/// Groups that do not exist or did not participate expand to nothing.
pub fn substitute_backrefs(template: &str, caps: &Captures<'_>) -> String {
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len());
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let sigil = bytes[i];
        if sigil != b'$' && sigil != b'\\' {
            i += 1;
            continue;
        }

        let braced = sigil == b'$' && bytes.get(i + 1) == Some(&b'{');
        let digits_start = if braced { i + 2 } else { i + 1 };
        let mut digits_end = digits_start;
        while digits_end < bytes.len() && digits_end - digits_start < 2 && bytes[digits_end].is_ascii_digit() {
            digits_end += 1;
        }

        let closed = !braced || bytes.get(digits_end) == Some(&b'}');
        if digits_end == digits_start || !closed {
            i += 1;
            continue;
        }

        // Digits are ASCII, so the slice is on char boundaries.
        let group: usize = template[digits_start..digits_end].parse().unwrap_or(0);
        out.push_str(&template[literal_start..i]);
        out.push_str(caps.get(group).map(|m| m.as_str()).unwrap_or(""));

        i = if braced { digits_end + 1 } else { digits_end };
        literal_start = i;
    }

    out.push_str(&template[literal_start..]);
    out
}

/// Captured groups for a closure, whole match excluded.
///
/// Trailing groups that did not participate are dropped; unmatched groups
/// before the last participating one become empty strings.
fn closure_params(caps: &Captures<'_>) -> Vec<String> {
    let groups: Vec<_> = caps.iter().skip(1).collect();
    let len = groups.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
    groups[..len]
        .iter()
        .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
        .collect()
}

/// Match `path` against the route table, filling `state` on success.
pub(crate) fn check_routes(
    path: &str,
    routes: &RouteCollection,
    probe: &dyn ExistenceProbe,
    translate_dashes: bool,
    state: &mut Resolution,
) -> RoutingResult<RuleMatch> {
    let rules = routes.rules();
    if rules.is_empty() {
        return Ok(RuleMatch::NoMatch);
    }

    for rule in rules {
        let Some(caps) = rule.regex().captures(path) else {
            continue;
        };

        let template = match rule.target() {
            Target::Closure(closure) => {
                state.controller = Controller::Closure(closure.clone());
                state.params = closure_params(&caps);
                state.matched_route = Some(MatchedRoute {
                    pattern: rule.pattern().to_string(),
                    target: rule.target().clone(),
                });

                tracing::debug!(
                    pattern = %rule.pattern(),
                    closure = %closure.label(),
                    "Route matched closure"
                );
                return Ok(RuleMatch::Matched);
            }
            Target::Controller(template) => template,
        };

        let target = if template.contains('$') && rule.pattern().contains('(') {
            substitute_backrefs(template, &caps)
        } else {
            template.clone()
        };

        if routes.is_redirect(rule.pattern()) {
            let status = routes.redirect_code(rule.pattern());
            tracing::debug!(pattern = %rule.pattern(), target = %target, status, "Route redirects");
            return Ok(RuleMatch::Redirect { target, status });
        }

        tracing::debug!(pattern = %rule.pattern(), target = %target, "Route matched");

        let segments = target.split('/').map(str::to_string).collect();
        state.set_request(segments, probe, translate_dashes)?;
        state.matched_route = Some(MatchedRoute {
            pattern: rule.pattern().to_string(),
            target: Target::Controller(target),
        });
        return Ok(RuleMatch::Matched);
    }

    Ok(RuleMatch::NoMatch)
}
