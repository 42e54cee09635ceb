//! End-to-end resolution behaviour against in-memory controller trees.

use std::sync::Arc;

use request_router::routing::{
    Controller, MemoryProbe, Outcome, RouteCollection, Router, Target,
};
use request_router::RoutingError;

mod common;

fn resolved(router: &Router, path: &str) -> request_router::Resolution {
    match router.resolve(path).unwrap() {
        Outcome::Resolved(resolution) => resolution,
        other => panic!("expected resolution for {path:?}, got {other:?}"),
    }
}

#[test]
fn test_first_match_wins() {
    let mut routes = RouteCollection::new();
    routes.add(r"users/(\d+)", "Users::show/$1").unwrap();
    routes.add("users/(.*)", "Users::search/$1").unwrap();
    let router = common::router(routes, MemoryProbe::new());

    let r = resolved(&router, "users/42");
    assert_eq!(r.controller_name(), Some("Users"));
    assert_eq!(r.method(), "show");
    assert_eq!(r.params(), ["42"]);

    let matched = r.matched_route().unwrap();
    assert_eq!(matched.pattern, r"users/(\d+)");
    assert_eq!(matched.target, Target::Controller("Users::show/42".into()));

    let r = resolved(&router, "users/bob");
    assert_eq!(r.method(), "search");
    assert_eq!(r.params(), ["bob"]);
}

#[test]
fn test_back_reference_substitution() {
    let mut routes = RouteCollection::new();
    routes.add("news/(.+)", "News::article/$1").unwrap();
    let router = common::router(routes, MemoryProbe::new());

    let r = resolved(&router, "news/hello-world");
    assert_eq!(r.controller_name(), Some("News"));
    assert_eq!(r.method(), "article");
    assert_eq!(r.params(), ["hello-world"]);
}

#[test]
fn test_closure_receives_captures_in_order() {
    let mut routes = RouteCollection::new();
    routes
        .add_closure(r"products/(\d+)/(\d+)", "product", |params| params.join(":"))
        .unwrap();
    let router = common::router(routes, MemoryProbe::new());

    let r = resolved(&router, "products/5/9");
    assert_eq!(r.params(), ["5", "9"]);
    match r.controller() {
        Controller::Closure(closure) => {
            assert_eq!(closure.label(), "product");
            assert_eq!(closure.call(r.params()), "5:9");
        }
        other => panic!("expected closure, got {other:?}"),
    }
    assert_eq!(r.controller_name(), None);
}

#[test]
fn test_redirect_short_circuits() {
    let mut routes = RouteCollection::new();
    routes.add_redirect("old-blog/(.*)", "blog/$1", 301).unwrap();
    routes.add("old-blog/(.+)", "Blog::show/$1").unwrap();
    let router = common::router(routes, MemoryProbe::new());

    assert_eq!(
        router.resolve("old-blog/first-post").unwrap(),
        Outcome::Redirect {
            target: "blog/first-post".into(),
            status: 301,
        }
    );
}

#[test]
fn test_readded_pattern_uses_latest_definition() {
    let mut routes = RouteCollection::new();
    routes.add("x", "Pages::x").unwrap();
    routes.add_redirect("x", "elsewhere", 301).unwrap();
    let router = common::router(routes, MemoryProbe::new());
    assert_eq!(
        router.resolve("x").unwrap(),
        Outcome::Redirect {
            target: "elsewhere".into(),
            status: 301,
        }
    );

    let mut routes = RouteCollection::new();
    routes.add_redirect("x", "elsewhere", 301).unwrap();
    routes.add("x", "Pages::x").unwrap();
    let router = common::router(routes, MemoryProbe::new());
    let r = resolved(&router, "x");
    assert_eq!(r.controller_name(), Some("Pages"));
    assert_eq!(r.method(), "x");
}

#[test]
fn test_closure_optional_segments() {
    let mut routes = RouteCollection::new();
    routes
        .add_closure(r"blog(?:/(\d+))?", "blog", |params| params.join(","))
        .unwrap();
    let router = common::router(routes, MemoryProbe::new());

    assert!(resolved(&router, "blog").params().is_empty());
    assert_eq!(resolved(&router, "blog/5").params(), ["5"]);
}

#[test]
fn test_closure_routes_never_redirect() {
    let mut routes = RouteCollection::new();
    routes.add_redirect("go", "elsewhere", 302).unwrap();
    let router = common::router(routes, MemoryProbe::new());
    assert!(matches!(router.resolve("go").unwrap(), Outcome::Redirect { .. }));

    let mut routes = RouteCollection::new();
    routes.add_closure("go", "inline", |_| String::new()).unwrap();
    let router = common::router(routes, MemoryProbe::new());
    assert!(matches!(router.resolve("go").unwrap(), Outcome::Resolved(_)));
}

#[test]
fn test_fallback_descends_into_directory() {
    let probe = MemoryProbe::new()
        .with_directory("Admin")
        .with_controller("Admin/Users");
    let router = common::router(RouteCollection::new(), probe);

    let r = resolved(&router, "Admin/Users/index/7");
    assert_eq!(r.directory(), "Admin/");
    assert_eq!(r.controller_name(), Some("Users"));
    assert_eq!(r.method(), "index");
    assert_eq!(r.params(), ["7"]);
    assert!(r.matched_route().is_none());

    // The segment after the controller is always the method.
    let r = resolved(&router, "Admin/Users/7");
    assert_eq!(r.controller_name(), Some("Users"));
    assert_eq!(r.method(), "7");
    assert!(r.params().is_empty());
}

#[test]
fn test_empty_method_keeps_default() {
    let mut routes = RouteCollection::new().with_default_method("landing");
    routes.add("blog", "Blog::").unwrap();
    routes.add("blog/(.+)", "Blog::/$1").unwrap();
    let router = common::router(routes, MemoryProbe::new());

    let r = resolved(&router, "blog");
    assert_eq!(r.controller_name(), Some("Blog"));
    assert_eq!(r.method(), "landing");

    let r = resolved(&router, "blog/intro");
    assert_eq!(r.method(), "landing");
    assert_eq!(r.params(), ["intro"]);
}

#[test]
fn test_resolution_is_idempotent() {
    let mut routes = RouteCollection::new();
    routes.add(r"users/(\d+)", "Users::show/$1").unwrap();
    let probe = MemoryProbe::new()
        .with_directory("admin")
        .with_controller("admin/Reports");
    let router = common::router(routes, probe);

    for path in ["users/7", "admin/reports/daily/3", "", "nope"] {
        let first = router.resolve(path).unwrap();
        let second = router.resolve(path).unwrap();
        assert_eq!(first, second, "path {path:?}");
    }

    // A descent on one call must not leak into the next.
    let r = resolved(&router, "admin/reports");
    assert_eq!(r.directory(), "admin/");
    let r = resolved(&router, "users/7");
    assert_eq!(r.directory(), "");
}

#[test]
fn test_empty_path_namespace_prefixing() {
    let routes = RouteCollection::new()
        .with_default_controller("Home")
        .with_default_namespace("App\\Controllers\\");
    let router = common::router(routes, MemoryProbe::new());
    assert_eq!(resolved(&router, "").controller_name(), Some("App\\Controllers\\Home"));

    let routes = RouteCollection::new()
        .with_default_controller("App\\Controllers\\Home")
        .with_default_namespace("App\\Controllers\\");
    let router = common::router(routes, MemoryProbe::new());
    assert_eq!(resolved(&router, "").controller_name(), Some("App\\Controllers\\Home"));
}

#[test]
fn test_not_found_without_auto_route() {
    let mut routes = RouteCollection::new().with_auto_route(false);
    routes.add("about", "Pages::about").unwrap();
    let router = common::router(routes, MemoryProbe::new().with_controller("Contact"));

    assert!(matches!(router.resolve("about").unwrap(), Outcome::Resolved(_)));
    assert_eq!(
        router.resolve("contact").unwrap(),
        Outcome::NotFound {
            path: "contact".into()
        }
    );
}

#[test]
fn test_missing_default_is_configuration_error() {
    let routes = RouteCollection::new().with_default_controller("");
    let probe = MemoryProbe::new().with_directory("admin");
    let router = common::router(routes, probe);

    let err = router.resolve("admin").unwrap_err();
    assert!(matches!(err, RoutingError::Configuration(_)));
}

#[test]
fn test_directory_override() {
    let probe = MemoryProbe::new()
        .with_directory("api")
        .with_directory("api/v1")
        .with_controller("api/Users");
    let router = common::router(RouteCollection::new(), probe);

    let r = match router.resolve_within("v1/list", "api").unwrap() {
        Outcome::Resolved(r) => r,
        other => panic!("unexpected outcome {other:?}"),
    };
    assert_eq!(r.directory(), "api/");
    assert_eq!(r.controller_name(), Some("V1"));
    assert_eq!(r.method(), "list");
}

#[test]
fn test_router_is_shareable_across_threads() {
    let mut routes = RouteCollection::new();
    routes.add(r"item/(\d+)", "Items::show/$1").unwrap();
    let router = Arc::new(common::router(routes, MemoryProbe::new()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let router = router.clone();
            std::thread::spawn(move || {
                let path = format!("item/{i}");
                match router.resolve(&path).unwrap() {
                    Outcome::Resolved(r) => r.params().to_vec(),
                    other => panic!("unexpected outcome {other:?}"),
                }
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), vec![i.to_string()]);
    }
}

#[test]
fn test_outcome_json_shape() {
    let mut routes = RouteCollection::new();
    routes.add("a/(.+)", "Alpha::beta/$1").unwrap();
    routes.add_redirect("r", "elsewhere", 308).unwrap();
    let router = common::router(routes, MemoryProbe::new());

    let json = serde_json::to_value(router.resolve("a/x").unwrap()).unwrap();
    assert_eq!(json["outcome"], "resolved");
    assert_eq!(json["controller"], "Alpha");
    assert_eq!(json["method"], "beta");
    assert_eq!(json["params"][0], "x");
    assert_eq!(json["directory"], "");

    let json = serde_json::to_value(router.resolve("r").unwrap()).unwrap();
    assert_eq!(json["outcome"], "redirect");
    assert_eq!(json["status"], 308);
}
